//! Diesel schema for board persistence.

diesel::table! {
    /// Board records, tombstones included.
    boards (id) {
        /// Board identifier.
        id -> Uuid,
        /// Owning user identifier.
        owner_id -> Uuid,
        /// Trimmed board name.
        #[max_length = 255]
        name -> Varchar,
        /// Soft-delete flag.
        deleted -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
