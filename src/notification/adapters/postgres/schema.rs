//! Diesel schema for notification persistence.

diesel::table! {
    /// Role-addressed notification records.
    notifications (id) {
        /// Internal record identifier.
        id -> Uuid,
        /// Human-readable title.
        #[max_length = 300]
        title -> Varchar,
        /// Full message body.
        message -> Text,
        /// Workflow event kind tag.
        #[max_length = 50]
        kind -> Varchar,
        /// Account that triggered the event.
        actor -> Uuid,
        /// Referenced document payload, if any.
        subject -> Nullable<Jsonb>,
        /// Addressed role tags, as a JSON array.
        recipients -> Jsonb,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// UTC day of creation; part of the duplicate-detection key.
        created_on -> Date,
        /// Expiry timestamp.
        expires_at -> Timestamptz,
    }
}
