//! Diesel schema for period tracking persistence.

diesel::table! {
    /// Minutes logged per task, period, and sub-unit.
    time_entries (task_id, granularity, anchor_date, sub_unit) {
        /// Task the minutes belong to.
        task_id -> Uuid,
        /// Period granularity in storage form.
        #[max_length = 10]
        granularity -> Varchar,
        /// Canonical first date of the period.
        anchor_date -> Date,
        /// Slot inside the period.
        sub_unit -> Int4,
        /// Logged minutes, always positive.
        minutes -> Int4,
        /// Task name captured at creation.
        #[max_length = 200]
        task_name -> Varchar,
        /// Pillar captured at creation.
        #[max_length = 20]
        pillar -> Varchar,
        /// Category name captured at creation.
        #[max_length = 100]
        category_name -> Varchar,
        /// Sub-category name captured at creation.
        #[max_length = 100]
        sub_category_name -> Nullable<Varchar>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Per-period task overrides.
    task_period_statuses (task_id, granularity, anchor_date) {
        /// Task the override applies to.
        task_id -> Uuid,
        /// Period granularity in storage form.
        #[max_length = 10]
        granularity -> Varchar,
        /// Canonical first date of the period.
        anchor_date -> Date,
        /// State tag.
        #[max_length = 20]
        state -> Varchar,
        /// Completion timestamp for the completed state.
        completed_at -> Nullable<Timestamptz>,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Cached reconciliation results, one row per period.
    period_summaries (granularity, anchor_date) {
        /// Period granularity in storage form.
        #[max_length = 10]
        granularity -> Varchar,
        /// Canonical first date of the period.
        anchor_date -> Date,
        /// Minutes expected across counted tasks.
        total_allocated -> Int8,
        /// Minutes logged across the period.
        total_spent -> Int8,
        /// Completeness flag.
        is_complete -> Bool,
        /// When the totals were derived.
        computed_at -> Timestamptz,
    }
}
