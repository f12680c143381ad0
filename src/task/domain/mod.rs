//! Domain model for the task registry.
//!
//! The mutable [`Task`] aggregate is kept apart from the immutable
//! [`TaskSnapshot`] that time entries embed, so renaming or retiring a task
//! never rewrites history.

mod error;
mod frequency;
mod ids;
mod snapshot;
mod task;

pub use error::{ParseFrequencyError, TaskDomainError};
pub use frequency::Frequency;
pub use ids::{AllocatedMinutes, TaskId, TaskName};
pub use snapshot::TaskSnapshot;
pub use task::{PersistedTaskData, Task, TaskDraft, TaskPlacement};
