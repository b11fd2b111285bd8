//! Diesel schema for task persistence.

diesel::table! {
    /// Task records with status and terminal output.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Task lifecycle status.
        #[max_length = 16]
        status -> Varchar,
        /// Output recorded with the terminal status.
        output -> Nullable<Jsonb>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
