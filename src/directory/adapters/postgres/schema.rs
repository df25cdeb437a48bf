//! Diesel schema for user directory persistence.

diesel::table! {
    /// Departmental user accounts with role assignments.
    user_accounts (id) {
        /// Internal account identifier.
        id -> Uuid,
        /// Human-readable display name.
        #[max_length = 200]
        display_name -> Varchar,
        /// Unique, lowercased e-mail address.
        #[max_length = 320]
        email -> Varchar,
        /// Role tags held by the account, as a JSON array.
        roles -> Jsonb,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
