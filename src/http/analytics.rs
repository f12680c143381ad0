//! Read-only analytics handlers.

use super::{ApiError, AppState};
use crate::tracking::domain::Granularity;
use crate::tracking::services::{CompletionRate, PillarBreakdown};
use axum::Json;
use axum::extract::{Query, State};
use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(super) struct AnalyticsQuery {
    granularity: Granularity,
    from: NaiveDate,
    to: NaiveDate,
}

pub(super) async fn pillar_breakdown(
    State(state): State<AppState>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<PillarBreakdown>, ApiError> {
    let breakdown = state
        .analytics
        .pillar_breakdown(query.granularity, query.from, query.to)
        .await?;
    Ok(Json(breakdown))
}

pub(super) async fn completion_rate(
    State(state): State<AppState>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<CompletionRate>, ApiError> {
    let rate = state
        .analytics
        .completion_rate(query.granularity, query.from, query.to)
        .await?;
    Ok(Json(rate))
}
