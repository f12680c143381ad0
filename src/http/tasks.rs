//! Task registry handlers.

use super::{ApiError, AppState};
use crate::task::domain::{Frequency, Task, TaskId, TaskPlacement};
use crate::task::ports::TaskQuery;
use crate::task::services::{CreateTaskRequest, TaskRegistryError, UpdateTaskRequest};
use crate::taxonomy::domain::{CategoryId, Pillar, SubCategoryId};
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub(super) struct TaskFilter {
    frequency: Option<Frequency>,
    pillar: Option<Pillar>,
    category_id: Option<Uuid>,
    #[serde(default)]
    include_inactive: bool,
}

#[derive(Debug, Deserialize)]
pub(super) struct PlacementBody {
    pillar: Pillar,
    category_id: Uuid,
    sub_category_id: Option<Uuid>,
}

impl PlacementBody {
    fn into_placement(self) -> TaskPlacement {
        let placement = TaskPlacement::new(self.pillar, CategoryId::from_uuid(self.category_id));
        match self.sub_category_id {
            Some(id) => placement.with_sub_category(SubCategoryId::from_uuid(id)),
            None => placement,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct CreateTaskBody {
    name: String,
    #[serde(flatten)]
    placement: PlacementBody,
    allocated_minutes: u64,
    frequency: Frequency,
}

#[derive(Debug, Deserialize)]
pub(super) struct UpdateTaskBody {
    name: Option<String>,
    allocated_minutes: Option<u64>,
    frequency: Option<Frequency>,
    placement: Option<PlacementBody>,
    is_active: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub(super) struct DeleteOptions {
    #[serde(default)]
    hard: bool,
}

pub(super) async fn list_tasks(
    State(state): State<AppState>,
    Query(filter): Query<TaskFilter>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let query = TaskQuery {
        frequency: filter.frequency,
        pillar: filter.pillar,
        category_id: filter.category_id.map(CategoryId::from_uuid),
        include_inactive: filter.include_inactive,
    };
    Ok(Json(state.tasks.list(query).await?))
}

pub(super) async fn create_task(
    State(state): State<AppState>,
    Json(body): Json<CreateTaskBody>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let request = CreateTaskRequest::new(
        body.name,
        body.placement.into_placement(),
        body.allocated_minutes,
        body.frequency,
    );
    let task = state.tasks.create(request).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

pub(super) async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Task>, ApiError> {
    let task_id = TaskId::from_uuid(id);
    state
        .tasks
        .find(task_id)
        .await?
        .map(Json)
        .ok_or_else(|| TaskRegistryError::NotFound(task_id).into())
}

pub(super) async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateTaskBody>,
) -> Result<Json<Task>, ApiError> {
    let mut request = UpdateTaskRequest::new();
    if let Some(name) = body.name {
        request = request.with_name(name);
    }
    if let Some(minutes) = body.allocated_minutes {
        request = request.with_allocated_minutes(minutes);
    }
    if let Some(frequency) = body.frequency {
        request = request.with_frequency(frequency);
    }
    if let Some(placement) = body.placement {
        request = request.with_placement(placement.into_placement());
    }
    if let Some(active) = body.is_active {
        request = request.with_active(active);
    }
    let task = state.tasks.update(TaskId::from_uuid(id), request).await?;
    Ok(Json(task))
}

pub(super) async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(options): Query<DeleteOptions>,
) -> Result<Response, ApiError> {
    let task_id = TaskId::from_uuid(id);
    if options.hard {
        let outcome = state.tasks.hard_delete(task_id).await?;
        return Ok(Json(outcome).into_response());
    }
    let task = state.tasks.soft_delete(task_id).await?;
    Ok(Json(task).into_response())
}

pub(super) async fn complete_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Task>, ApiError> {
    Ok(Json(state.tasks.complete(TaskId::from_uuid(id)).await?))
}

pub(super) async fn mark_task_na(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Task>, ApiError> {
    Ok(Json(state.tasks.mark_na(TaskId::from_uuid(id)).await?))
}

pub(super) async fn reopen_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Task>, ApiError> {
    Ok(Json(state.tasks.reopen(TaskId::from_uuid(id)).await?))
}
