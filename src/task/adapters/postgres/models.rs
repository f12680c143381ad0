//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result and insert row for task records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct TaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Task name.
    pub name: String,
    /// Pillar storage value.
    pub pillar: String,
    /// Owning category identifier.
    pub category_id: uuid::Uuid,
    /// Optional sub-category identifier.
    pub sub_category_id: Option<uuid::Uuid>,
    /// Minutes expected per period.
    pub allocated_minutes: i32,
    /// Frequency storage value.
    pub frequency: String,
    /// Whether the task participates in allocation.
    pub is_active: bool,
    /// Global completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Global "not applicable" timestamp.
    pub na_marked_at: Option<DateTime<Utc>>,
    /// Soft-delete timestamp.
    pub deleted_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
