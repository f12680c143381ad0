//! Diesel schema for task registry persistence.

diesel::table! {
    /// Task definitions with allocation and lifecycle stamps.
    tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Task name.
        #[max_length = 200]
        name -> Varchar,
        /// Owning pillar in storage form.
        #[max_length = 20]
        pillar -> Varchar,
        /// Owning category identifier.
        category_id -> Uuid,
        /// Optional sub-category identifier.
        sub_category_id -> Nullable<Uuid>,
        /// Minutes expected per period.
        allocated_minutes -> Int4,
        /// Recurrence frequency in storage form.
        #[max_length = 20]
        frequency -> Varchar,
        /// Whether the task participates in allocation.
        is_active -> Bool,
        /// Global completion timestamp.
        completed_at -> Nullable<Timestamptz>,
        /// Global "not applicable" timestamp.
        na_marked_at -> Nullable<Timestamptz>,
        /// Soft-delete timestamp.
        deleted_at -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
