//! Immutable record of how a task was named when time was first logged.

use crate::taxonomy::domain::Pillar;
use serde::{Deserialize, Serialize};

/// Snapshot of task and taxonomy names captured when a time entry is created.
///
/// Entries keep their snapshot for life: later renames, re-parenting, or
/// deletion of the task leave logged history readable as it was recorded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskSnapshot {
    /// Task name at entry creation time.
    pub task_name: String,
    /// Pillar at entry creation time.
    pub pillar: Pillar,
    /// Category name at entry creation time.
    pub category_name: String,
    /// Sub-category name at entry creation time, if the task had one.
    pub sub_category_name: Option<String>,
}

impl TaskSnapshot {
    /// Returns the recorded task name.
    #[must_use]
    pub fn task_name(&self) -> &str {
        &self.task_name
    }
}
