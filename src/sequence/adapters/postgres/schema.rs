//! Diesel schema for counter persistence.

diesel::table! {
    /// Named counters backing document code generation.
    sequences (prefix) {
        /// Counter key (document kind + period, or order-number prefix).
        #[max_length = 120]
        prefix -> Varchar,
        /// Last issued counter value.
        counter -> Int8,
    }
}
