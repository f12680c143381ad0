//! Diesel row models for taxonomy persistence.

use super::schema::{categories, sub_categories};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result and insert row for categories.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CategoryRow {
    /// Category identifier.
    pub id: uuid::Uuid,
    /// Pillar storage value.
    pub pillar: String,
    /// Category name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result and insert row for sub-categories.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = sub_categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SubCategoryRow {
    /// Sub-category identifier.
    pub id: uuid::Uuid,
    /// Parent category identifier.
    pub category_id: uuid::Uuid,
    /// Sub-category name.
    pub name: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
