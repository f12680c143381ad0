//! Port definitions for period tracking persistence.
//!
//! The repository ports are read-side; every write goes through
//! [`TrackingUnitOfWork`] so one request commits or rolls back as a whole.

mod entries;
mod error;
mod statuses;
mod summaries;
mod unit_of_work;

pub use entries::TimeEntryRepository;
pub use error::{TrackingRepositoryError, TrackingRepositoryResult};
pub use statuses::TaskStatusRepository;
pub use summaries::PeriodSummaryRepository;
pub use unit_of_work::{PurgedTask, TrackingUnitOfWork};
