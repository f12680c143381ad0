//! Fetches reconciliation inputs and maintains the summary cache.

use super::TrackingServiceResult;
use crate::task::ports::{TaskQuery, TaskRepository};
use crate::tracking::{
    domain::{
        Granularity, PeriodAnchor, PeriodChanges, PeriodSummary, TrackingDomainError, reconcile,
    },
    ports::{
        PeriodSummaryRepository, TaskStatusRepository, TimeEntryRepository, TrackingUnitOfWork,
    },
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, info};

/// Runs reconciliation against stored tasks, entries, and statuses.
///
/// Every period write passes through [`ReconciliationService::commit`], which
/// stores the staged rows and the refreshed summary in one unit of work.
pub struct ReconciliationService<C>
where
    C: Clock + Send + Sync,
{
    tasks: Arc<dyn TaskRepository>,
    entries: Arc<dyn TimeEntryRepository>,
    statuses: Arc<dyn TaskStatusRepository>,
    summaries: Arc<dyn PeriodSummaryRepository>,
    unit_of_work: Arc<dyn TrackingUnitOfWork>,
    clock: Arc<C>,
}

impl<C> ReconciliationService<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a reconciliation service.
    #[must_use]
    pub fn new(
        tasks: Arc<dyn TaskRepository>,
        entries: Arc<dyn TimeEntryRepository>,
        statuses: Arc<dyn TaskStatusRepository>,
        summaries: Arc<dyn PeriodSummaryRepository>,
        unit_of_work: Arc<dyn TrackingUnitOfWork>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            tasks,
            entries,
            statuses,
            summaries,
            unit_of_work,
            clock,
        }
    }

    /// Recomputes a period and stores the result in the cache.
    ///
    /// # Errors
    ///
    /// Returns [`super::TrackingServiceError`] when any store fails.
    pub async fn reconcile(&self, anchor: PeriodAnchor) -> TrackingServiceResult<PeriodSummary> {
        self.commit(PeriodChanges::new(anchor)).await
    }

    /// Applies staged writes and the summary they produce as one unit.
    ///
    /// The summary is derived from the stored rows with the changes laid
    /// over them, so nothing is written when derivation or the commit fails.
    ///
    /// # Errors
    ///
    /// Returns [`super::TrackingServiceError`] when any store fails; the
    /// period is then left as it was.
    pub async fn commit(&self, changes: PeriodChanges) -> TrackingServiceResult<PeriodSummary> {
        let anchor = changes.anchor();
        let tasks = self
            .tasks
            .list(TaskQuery::active_with_frequency(
                anchor.granularity().frequency(),
            ))
            .await?;
        let statuses = changes.statuses_after(self.statuses.list_for_period(anchor).await?);
        let entries = changes.entries_after(self.entries.list_for_period(anchor, None).await?);

        let summary = reconcile(anchor, &tasks, &entries, &statuses, self.clock.utc());
        self.unit_of_work.commit_period(&changes, &summary).await?;
        debug!(
            period = %anchor,
            allocated = summary.total_allocated,
            spent = summary.total_spent,
            complete = summary.is_complete,
            staged = !changes.is_empty(),
            "period reconciled"
        );
        Ok(summary)
    }

    /// Returns the cached summary of a period without recomputing it.
    ///
    /// # Errors
    ///
    /// Returns [`super::TrackingServiceError::Repository`] when the cache
    /// cannot be read.
    pub async fn cached(&self, anchor: PeriodAnchor) -> TrackingServiceResult<Option<PeriodSummary>> {
        Ok(self.summaries.find(anchor).await?)
    }

    /// Returns the cached summary, reconciling when none is stored yet.
    ///
    /// # Errors
    ///
    /// Returns [`super::TrackingServiceError`] when any store fails.
    pub async fn summary(&self, anchor: PeriodAnchor) -> TrackingServiceResult<PeriodSummary> {
        match self.cached(anchor).await? {
            Some(summary) => Ok(summary),
            None => self.reconcile(anchor).await,
        }
    }

    /// Lists cached summaries for periods starting in the range.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingDomainError::InvertedRange`] for a reversed range or
    /// a repository error when the cache cannot be read.
    pub async fn list_cached(
        &self,
        granularity: Granularity,
        from: NaiveDate,
        to: NaiveDate,
    ) -> TrackingServiceResult<Vec<PeriodSummary>> {
        if to < from {
            return Err(TrackingDomainError::InvertedRange { from, to }.into());
        }
        let start = PeriodAnchor::containing(granularity, from)?.date();
        Ok(self.summaries.list_range(granularity, start, to).await?)
    }

    /// Re-derives every period in the range, one after another.
    ///
    /// # Errors
    ///
    /// Stops at the first failing period and returns its error.
    pub async fn recalculate_range(
        &self,
        granularity: Granularity,
        from: NaiveDate,
        to: NaiveDate,
    ) -> TrackingServiceResult<Vec<PeriodSummary>> {
        let anchors = PeriodAnchor::between(granularity, from, to)?;
        let mut summaries = Vec::with_capacity(anchors.len());
        for anchor in anchors {
            summaries.push(self.reconcile(anchor).await?);
        }
        info!(
            granularity = %granularity,
            %from,
            %to,
            periods = summaries.len(),
            "summaries recalculated"
        );
        Ok(summaries)
    }
}
