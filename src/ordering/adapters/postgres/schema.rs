//! Diesel schema for the ordering context.

diesel::table! {
    /// Purchase orders placed with vendors.
    purchase_orders (id) {
        /// Order identifier.
        id -> Uuid,
        /// Generated monthly document code.
        #[max_length = 40]
        po_number -> Varchar,
        /// Generated financial-year order number.
        #[max_length = 60]
        order_number -> Varchar,
        /// Budget category kind.
        #[max_length = 20]
        category_kind -> Varchar,
        /// Budget record identifier.
        category_ref -> Uuid,
        /// Vendor record identifier.
        vendor -> Uuid,
        /// Vendor quotation reference.
        #[max_length = 100]
        quotation_ref -> Varchar,
        /// Vendor quotation date.
        quotation_date -> Date,
        /// Priced line items as a JSON document.
        lines -> Jsonb,
        /// Total of the line costs, in paise.
        total_cost -> Int8,
        /// GST across the order, in paise.
        total_gst -> Int8,
        /// Grand total, in paise.
        grand_total -> Int8,
        /// Free-form order notes.
        #[max_length = 100]
        notes -> Nullable<Varchar>,
        /// Creating account.
        created_by -> Uuid,
        /// Approving account.
        approved_by -> Nullable<Uuid>,
        /// Decision timestamp.
        decided_at -> Nullable<Timestamptz>,
        /// Lifecycle status.
        #[max_length = 20]
        status -> Varchar,
        /// Order-level remark.
        remark -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last-update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Vendor invoices recorded against purchase orders.
    invoices (id) {
        /// Invoice identifier.
        id -> Uuid,
        /// Purchase order the invoice bills against.
        order_id -> Uuid,
        /// Vendor bill number, unique across invoices.
        bill_number -> Int8,
        /// Date printed on the bill.
        bill_date -> Date,
        /// Billed amount, in paise.
        amount -> Int8,
        /// Lifecycle status.
        #[max_length = 20]
        status -> Varchar,
        /// Recording account.
        created_by -> Uuid,
        /// Deciding account.
        approved_by -> Nullable<Uuid>,
        /// Decision timestamp.
        decided_at -> Nullable<Timestamptz>,
        /// Comment from the recording account.
        comment -> Nullable<Text>,
        /// Decision remark.
        remark -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last-update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(purchase_orders, invoices);
