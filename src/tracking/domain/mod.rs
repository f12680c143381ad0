//! Domain model for period tracking.
//!
//! Everything here is free of I/O. [`reconcile`] is the single place where
//! allocation, spent minutes, and completeness are derived.

mod anchor;
mod changes;
mod entry;
mod error;
mod granularity;
mod reconcile;
mod status;
mod summary;

pub use anchor::{PeriodAnchor, SubUnit};
pub use changes::PeriodChanges;
pub use entry::{PersistedTimeEntryData, TimeEntry, TimeEntryKey};
pub use error::{ParseGranularityError, TrackingDomainError};
pub use granularity::Granularity;
pub use reconcile::reconcile;
pub use status::{PeriodTaskState, TaskPeriodStatus};
pub use summary::PeriodSummary;
