//! In-memory summary cache.

use super::lock_error;
use crate::tracking::{
    domain::{Granularity, PeriodAnchor, PeriodSummary},
    ports::{PeriodSummaryRepository, TrackingRepositoryResult},
};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory summary cache.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPeriodSummaryRepository {
    pub(super) state: Arc<RwLock<BTreeMap<PeriodAnchor, PeriodSummary>>>,
}

impl InMemoryPeriodSummaryRepository {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PeriodSummaryRepository for InMemoryPeriodSummaryRepository {
    async fn find(&self, anchor: PeriodAnchor) -> TrackingRepositoryResult<Option<PeriodSummary>> {
        let summaries = self.state.read().map_err(lock_error)?;
        Ok(summaries.get(&anchor).copied())
    }

    async fn list_range(
        &self,
        granularity: Granularity,
        from: NaiveDate,
        to: NaiveDate,
    ) -> TrackingRepositoryResult<Vec<PeriodSummary>> {
        let summaries = self.state.read().map_err(lock_error)?;
        Ok(summaries
            .values()
            .filter(|summary| summary.anchor.granularity() == granularity)
            .filter(|summary| (from..=to).contains(&summary.anchor.date()))
            .copied()
            .collect())
    }
}
