//! Diesel schema for the requisition context.

diesel::table! {
    /// Stock requisitions drawing from existing inventory.
    requisitions (id) {
        /// Requisition identifier.
        id -> Uuid,
        /// Generated requisition code.
        #[max_length = 40]
        code -> Varchar,
        /// Budget category kind.
        #[max_length = 20]
        category_kind -> Varchar,
        /// Budget record identifier.
        category_ref -> Uuid,
        /// Date the stock is required by.
        required_by -> Date,
        /// Line items as a JSON document.
        lines -> Jsonb,
        /// Requesting account.
        requested_by -> Uuid,
        /// Approving account.
        approved_by -> Nullable<Uuid>,
        /// Issuing account.
        issued_by -> Nullable<Uuid>,
        /// Decision timestamp.
        decided_at -> Nullable<Timestamptz>,
        /// Issue timestamp.
        issued_at -> Nullable<Timestamptz>,
        /// Lifecycle status.
        #[max_length = 20]
        status -> Varchar,
        /// Requisition-level remark.
        remark -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last-update timestamp.
        updated_at -> Timestamptz,
    }
}
