//! Derived per-period totals.

use super::PeriodAnchor;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Allocation, spent minutes, and completeness of one period.
///
/// Summaries are only ever produced by [`super::reconcile`]; storage keeps
/// the latest result per anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSummary {
    /// Period the totals describe.
    pub anchor: PeriodAnchor,
    /// Minutes expected across counted tasks.
    pub total_allocated: u64,
    /// Minutes logged across every entry of the period.
    pub total_spent: u64,
    /// `true` when spent equals allocated and something was logged.
    pub is_complete: bool,
    /// When the totals were derived.
    pub computed_at: DateTime<Utc>,
}

impl PeriodSummary {
    /// Builds a summary, deriving completeness from the totals.
    #[must_use]
    pub const fn new(
        anchor: PeriodAnchor,
        total_allocated: u64,
        total_spent: u64,
        computed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            anchor,
            total_allocated,
            total_spent,
            is_complete: total_allocated == total_spent && total_spent > 0,
            computed_at,
        }
    }
}
