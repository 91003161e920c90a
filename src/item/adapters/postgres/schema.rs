//! Diesel schema for item persistence.

diesel::table! {
    /// Item records, tombstones included.
    items (id) {
        /// Item identifier.
        id -> Uuid,
        /// Owning board identifier.
        board_id -> Uuid,
        /// Workflow column.
        #[max_length = 20]
        column_name -> Varchar,
        /// 1-based order within the column; 0 for tombstones.
        position -> Int4,
        /// Soft-delete flag.
        deleted -> Bool,
        /// Trimmed item title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional description.
        description -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
