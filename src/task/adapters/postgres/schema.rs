//! Diesel schema for task persistence.

diesel::table! {
    /// Task records, each owned by one identity.
    tasks (id) {
        /// Store-assigned identifier.
        id -> Int8,
        /// Owning identity.
        owner_id -> Int8,
        /// Trimmed description text.
        #[max_length = 200]
        description -> Varchar,
        /// Completion flag.
        done -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
