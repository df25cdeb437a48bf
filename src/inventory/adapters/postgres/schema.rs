//! Diesel schema for inventory persistence.

diesel::table! {
    /// Catalogued stock items.
    stock_items (id) {
        /// Internal item identifier.
        id -> Uuid,
        /// Item class tag.
        #[max_length = 30]
        class -> Varchar,
        /// Catalogue code, unique per item.
        #[max_length = 60]
        code -> Varchar,
        /// Human-readable item name.
        #[max_length = 200]
        name -> Varchar,
        /// Unit of measure.
        #[max_length = 40]
        unit -> Varchar,
        /// Current stock level in whole units.
        quantity -> Int4,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last-update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Inward stock entries.
    restocks (id) {
        /// Internal entry identifier.
        id -> Uuid,
        /// Generated inward code.
        #[max_length = 40]
        code -> Varchar,
        /// Replenished item.
        item -> Uuid,
        /// Free-form consignment description.
        description -> Nullable<Text>,
        /// Units received.
        quantity -> Int4,
        /// Unit of measure.
        #[max_length = 40]
        unit -> Varchar,
        /// Chemical grade, where applicable.
        #[max_length = 60]
        grade -> Nullable<Varchar>,
        /// CAS registry number, where applicable.
        #[max_length = 40]
        cas_number -> Nullable<Varchar>,
        /// Hazard classification, where applicable.
        #[max_length = 60]
        hazard_class -> Nullable<Varchar>,
        /// Vendor reference.
        vendor -> Nullable<Uuid>,
        /// Vendor invoice reference.
        #[max_length = 100]
        invoice_reference -> Nullable<Varchar>,
        /// Expiry date for perishable stock.
        expiry_date -> Nullable<Date>,
        /// Next maintenance date for equipment.
        maintenance_date -> Nullable<Date>,
        /// Account that recorded the entry.
        recorded_by -> Uuid,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Issue logs for stock drawn against workflow documents.
    issue_logs (id) {
        /// Internal log identifier.
        id -> Uuid,
        /// Issued item.
        item -> Uuid,
        /// Source document reference payload.
        source -> Jsonb,
        /// Units issued.
        issued -> Int4,
        /// Units returned.
        returned -> Int4,
        /// Units lost or damaged.
        lost_or_damaged -> Int4,
        /// Recipient e-mail address.
        #[max_length = 320]
        issued_to -> Varchar,
        /// Issue timestamp.
        issued_at -> Timestamptz,
        /// Return timestamp, once closed.
        returned_at -> Nullable<Timestamptz>,
        /// Lifecycle status tag.
        #[max_length = 20]
        status -> Varchar,
    }
}
