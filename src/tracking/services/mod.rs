//! Application services for period tracking.

mod analytics;
mod entries;
mod error;
mod reconciliation;
mod statuses;

pub use analytics::{AnalyticsService, CompletionRate, PillarBreakdown, PillarMinutes};
pub use entries::{BulkSaveOutcome, EntryInput, TimeEntryService};
pub use error::{TrackingServiceError, TrackingServiceResult};
pub use reconciliation::ReconciliationService;
pub use statuses::{StatusOutcome, TaskStatusService};
