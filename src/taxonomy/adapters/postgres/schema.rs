//! Diesel schema for taxonomy persistence.

diesel::table! {
    /// Categories grouped under a fixed pillar.
    categories (id) {
        /// Category identifier.
        id -> Uuid,
        /// Owning pillar in storage form.
        #[max_length = 20]
        pillar -> Varchar,
        /// Category name.
        #[max_length = 100]
        name -> Varchar,
        /// Optional description.
        description -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Sub-categories grouped under a category.
    sub_categories (id) {
        /// Sub-category identifier.
        id -> Uuid,
        /// Parent category identifier.
        category_id -> Uuid,
        /// Sub-category name.
        #[max_length = 100]
        name -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(sub_categories -> categories (category_id));
diesel::allow_tables_to_appear_in_same_query!(categories, sub_categories);
