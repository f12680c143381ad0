//! Period tracking handlers: entries, statuses, and cached summaries.

use super::{ApiError, AppState, parse_anchor};
use crate::task::domain::TaskId;
use crate::tracking::domain::{
    Granularity, PeriodSummary, SubUnit, TaskPeriodStatus, TimeEntry,
};
use crate::tracking::services::{BulkSaveOutcome, EntryInput, StatusOutcome};
use axum::Json;
use axum::extract::{Path, Query, State};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub(super) struct EntryFilter {
    task_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub(super) struct BulkSaveBody {
    entries: Vec<EntryInput>,
}

#[derive(Debug, Deserialize)]
pub(super) struct SummaryOptions {
    #[serde(default)]
    live: bool,
}

#[derive(Debug, Deserialize)]
pub(super) struct DateRange {
    from: NaiveDate,
    to: NaiveDate,
}

pub(super) async fn list_entries(
    State(state): State<AppState>,
    Path((granularity, date)): Path<(String, String)>,
    Query(filter): Query<EntryFilter>,
) -> Result<Json<Vec<TimeEntry>>, ApiError> {
    let anchor = parse_anchor(&granularity, &date)?;
    let entries = state
        .entries
        .entries(anchor, filter.task_id.map(TaskId::from_uuid))
        .await?;
    Ok(Json(entries))
}

pub(super) async fn save_entries(
    State(state): State<AppState>,
    Path((granularity, date)): Path<(String, String)>,
    Json(body): Json<BulkSaveBody>,
) -> Result<Json<BulkSaveOutcome>, ApiError> {
    let anchor = parse_anchor(&granularity, &date)?;
    Ok(Json(state.entries.bulk_save(anchor, body.entries).await?))
}

pub(super) async fn delete_entry(
    State(state): State<AppState>,
    Path((granularity, date, task_id, sub_unit)): Path<(String, String, Uuid, u32)>,
) -> Result<Json<PeriodSummary>, ApiError> {
    let anchor = parse_anchor(&granularity, &date)?;
    let summary = state
        .entries
        .delete_entry(TaskId::from_uuid(task_id), anchor, SubUnit::new(sub_unit))
        .await?;
    Ok(Json(summary))
}

pub(super) async fn get_status(
    State(state): State<AppState>,
    Path((granularity, date, task_id)): Path<(String, String, Uuid)>,
) -> Result<Json<Option<TaskPeriodStatus>>, ApiError> {
    let anchor = parse_anchor(&granularity, &date)?;
    let status = state
        .statuses
        .status(TaskId::from_uuid(task_id), anchor)
        .await?;
    Ok(Json(status))
}

pub(super) async fn track_status(
    State(state): State<AppState>,
    Path((granularity, date, task_id)): Path<(String, String, Uuid)>,
) -> Result<Json<StatusOutcome>, ApiError> {
    let anchor = parse_anchor(&granularity, &date)?;
    let outcome = state
        .statuses
        .track(TaskId::from_uuid(task_id), anchor)
        .await?;
    Ok(Json(outcome))
}

pub(super) async fn complete_status(
    State(state): State<AppState>,
    Path((granularity, date, task_id)): Path<(String, String, Uuid)>,
) -> Result<Json<StatusOutcome>, ApiError> {
    let anchor = parse_anchor(&granularity, &date)?;
    let outcome = state
        .statuses
        .mark_complete(TaskId::from_uuid(task_id), anchor)
        .await?;
    Ok(Json(outcome))
}

pub(super) async fn na_status(
    State(state): State<AppState>,
    Path((granularity, date, task_id)): Path<(String, String, Uuid)>,
) -> Result<Json<StatusOutcome>, ApiError> {
    let anchor = parse_anchor(&granularity, &date)?;
    let outcome = state
        .statuses
        .mark_na(TaskId::from_uuid(task_id), anchor)
        .await?;
    Ok(Json(outcome))
}

pub(super) async fn reset_status(
    State(state): State<AppState>,
    Path((granularity, date, task_id)): Path<(String, String, Uuid)>,
) -> Result<Json<StatusOutcome>, ApiError> {
    let anchor = parse_anchor(&granularity, &date)?;
    let outcome = state
        .statuses
        .reset(TaskId::from_uuid(task_id), anchor)
        .await?;
    Ok(Json(outcome))
}

pub(super) async fn list_summaries(
    State(state): State<AppState>,
    Path(granularity): Path<String>,
    Query(range): Query<DateRange>,
) -> Result<Json<Vec<PeriodSummary>>, ApiError> {
    let parsed = Granularity::try_from(granularity.as_str())?;
    let summaries = state
        .reconciler
        .list_cached(parsed, range.from, range.to)
        .await?;
    Ok(Json(summaries))
}

pub(super) async fn get_summary(
    State(state): State<AppState>,
    Path((granularity, date)): Path<(String, String)>,
    Query(options): Query<SummaryOptions>,
) -> Result<Json<PeriodSummary>, ApiError> {
    let anchor = parse_anchor(&granularity, &date)?;
    let summary = if options.live {
        state.reconciler.reconcile(anchor).await?
    } else {
        state.reconciler.summary(anchor).await?
    };
    Ok(Json(summary))
}
