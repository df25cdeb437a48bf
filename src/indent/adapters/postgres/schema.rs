//! Diesel schema for the purchase request context.

diesel::table! {
    /// Purchase requests covering new indents and order requests.
    purchase_requests (id) {
        /// Request identifier.
        id -> Uuid,
        /// Generated request code.
        #[max_length = 40]
        code -> Varchar,
        /// Document flavour tag.
        #[max_length = 20]
        kind -> Varchar,
        /// Budget category kind.
        #[max_length = 20]
        category_kind -> Varchar,
        /// Budget record identifier.
        category_ref -> Uuid,
        /// Date the items are required by.
        required_by -> Date,
        /// Line items as a JSON document.
        lines -> Jsonb,
        /// Requesting account.
        requested_by -> Uuid,
        /// Approving account.
        approved_by -> Nullable<Uuid>,
        /// Ordering account.
        ordered_by -> Nullable<Uuid>,
        /// Decision timestamp.
        decided_at -> Nullable<Timestamptz>,
        /// Ordering timestamp.
        ordered_at -> Nullable<Timestamptz>,
        /// Lifecycle status.
        #[max_length = 20]
        status -> Varchar,
        /// Request-level remark.
        remark -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last-update timestamp.
        updated_at -> Timestamptz,
    }
}
