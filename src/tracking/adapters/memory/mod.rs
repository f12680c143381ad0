//! In-memory adapters for tracking ports.

mod entries;
mod statuses;
mod summaries;
mod unit_of_work;

pub use entries::InMemoryTimeEntryRepository;
pub use statuses::InMemoryTaskStatusRepository;
pub use summaries::InMemoryPeriodSummaryRepository;
pub use unit_of_work::InMemoryTrackingUnitOfWork;

use crate::tracking::ports::TrackingRepositoryError;

fn lock_error(err: impl std::fmt::Display) -> TrackingRepositoryError {
    TrackingRepositoryError::persistence(std::io::Error::other(err.to_string()))
}
