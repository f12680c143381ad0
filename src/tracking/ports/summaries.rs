//! Repository port for cached period summaries.

use super::TrackingRepositoryResult;
use crate::tracking::domain::{Granularity, PeriodAnchor, PeriodSummary};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Summary cache read contract: one row per anchor.
#[async_trait]
pub trait PeriodSummaryRepository: Send + Sync {
    /// Returns the cached summary of a period.
    async fn find(&self, anchor: PeriodAnchor) -> TrackingRepositoryResult<Option<PeriodSummary>>;

    /// Lists cached summaries of the granularity whose anchor date lies in
    /// `from..=to`, oldest first.
    async fn list_range(
        &self,
        granularity: Granularity,
        from: NaiveDate,
        to: NaiveDate,
    ) -> TrackingRepositoryResult<Vec<PeriodSummary>>;
}
