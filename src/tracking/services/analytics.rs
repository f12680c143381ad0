//! Read-only aggregates over logged entries and cached summaries.

use super::TrackingServiceResult;
use crate::taxonomy::domain::Pillar;
use crate::tracking::{
    domain::{Granularity, PeriodAnchor, TrackingDomainError},
    ports::{PeriodSummaryRepository, TimeEntryRepository},
};
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;

/// Minutes spent in one pillar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PillarMinutes {
    /// Pillar recorded in the entry snapshots.
    pub pillar: Pillar,
    /// Minutes logged against that pillar.
    pub spent_minutes: u64,
}

/// Spent minutes per pillar over a range of periods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PillarBreakdown {
    /// Period granularity the entries were logged at.
    pub granularity: Granularity,
    /// First anchor date considered.
    pub from: NaiveDate,
    /// Last date considered.
    pub to: NaiveDate,
    /// One row per pillar in display order, zeros included.
    pub pillars: Vec<PillarMinutes>,
    /// Minutes across all pillars.
    pub total_spent: u64,
}

/// Complete versus total cached summaries over a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompletionRate {
    /// Period granularity.
    pub granularity: Granularity,
    /// Cached summaries flagged complete.
    pub complete: u64,
    /// Cached summaries in range.
    pub total: u64,
}

/// Aggregates history without mutating it.
#[derive(Clone)]
pub struct AnalyticsService {
    entries: Arc<dyn TimeEntryRepository>,
    summaries: Arc<dyn PeriodSummaryRepository>,
}

impl AnalyticsService {
    /// Creates an analytics service.
    #[must_use]
    pub fn new(
        entries: Arc<dyn TimeEntryRepository>,
        summaries: Arc<dyn PeriodSummaryRepository>,
    ) -> Self {
        Self { entries, summaries }
    }

    /// Sums spent minutes per pillar using the pillar each entry recorded
    /// when it was created.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingDomainError::InvertedRange`] for a reversed range or
    /// a repository error when entries cannot be read.
    pub async fn pillar_breakdown(
        &self,
        granularity: Granularity,
        from: NaiveDate,
        to: NaiveDate,
    ) -> TrackingServiceResult<PillarBreakdown> {
        let start = range_start(granularity, from, to)?;
        let entries = self.entries.list_range(granularity, start, to).await?;

        let pillars: Vec<PillarMinutes> = Pillar::ALL
            .into_iter()
            .map(|pillar| PillarMinutes {
                pillar,
                spent_minutes: entries
                    .iter()
                    .filter(|entry| entry.snapshot().pillar == pillar)
                    .map(|entry| u64::from(entry.minutes()))
                    .sum(),
            })
            .collect();
        let total_spent = pillars.iter().map(|row| row.spent_minutes).sum();

        Ok(PillarBreakdown {
            granularity,
            from: start,
            to,
            pillars,
            total_spent,
        })
    }

    /// Counts complete cached summaries against all cached summaries.
    ///
    /// Periods that were never reconciled are not counted.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingDomainError::InvertedRange`] for a reversed range or
    /// a repository error when the cache cannot be read.
    pub async fn completion_rate(
        &self,
        granularity: Granularity,
        from: NaiveDate,
        to: NaiveDate,
    ) -> TrackingServiceResult<CompletionRate> {
        let start = range_start(granularity, from, to)?;
        let summaries = self.summaries.list_range(granularity, start, to).await?;
        let complete = summaries.iter().filter(|summary| summary.is_complete).count();

        Ok(CompletionRate {
            granularity,
            complete: u64::try_from(complete).unwrap_or(u64::MAX),
            total: u64::try_from(summaries.len()).unwrap_or(u64::MAX),
        })
    }
}

fn range_start(
    granularity: Granularity,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<NaiveDate, TrackingDomainError> {
    if to < from {
        return Err(TrackingDomainError::InvertedRange { from, to });
    }
    Ok(PeriodAnchor::containing(granularity, from)?.date())
}
