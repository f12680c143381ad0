//! Pillar taxonomy handlers.

use super::{ApiError, AppState};
use crate::taxonomy::domain::{Category, CategoryId, Pillar, SubCategory};
use crate::taxonomy::ports::TaxonomyRepositoryError;
use crate::taxonomy::services::{CreateCategoryRequest, UpdateCategoryRequest};
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub(super) struct CategoryFilter {
    pillar: Option<Pillar>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CreateCategoryBody {
    pillar: Pillar,
    name: String,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct UpdateCategoryBody {
    name: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CreateSubCategoryBody {
    name: String,
}

pub(super) async fn list_categories(
    State(state): State<AppState>,
    Query(filter): Query<CategoryFilter>,
) -> Result<Json<Vec<Category>>, ApiError> {
    Ok(Json(state.taxonomy.list_categories(filter.pillar).await?))
}

pub(super) async fn create_category(
    State(state): State<AppState>,
    Json(body): Json<CreateCategoryBody>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    let mut request = CreateCategoryRequest::new(body.pillar, body.name);
    if let Some(description) = body.description {
        request = request.with_description(description);
    }
    let category = state.taxonomy.create_category(request).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

pub(super) async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Category>, ApiError> {
    let category_id = CategoryId::from_uuid(id);
    state
        .taxonomy
        .find_category(category_id)
        .await?
        .map(Json)
        .ok_or_else(|| TaxonomyRepositoryError::CategoryNotFound(category_id).into())
}

pub(super) async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateCategoryBody>,
) -> Result<Json<Category>, ApiError> {
    let mut request = UpdateCategoryRequest::new();
    if let Some(name) = body.name {
        request = request.with_name(name);
    }
    if let Some(description) = body.description {
        request = request.with_description(Some(description));
    }
    let category = state
        .taxonomy
        .update_category(CategoryId::from_uuid(id), request)
        .await?;
    Ok(Json(category))
}

pub(super) async fn list_sub_categories(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<SubCategory>>, ApiError> {
    let sub_categories = state
        .taxonomy
        .list_sub_categories(CategoryId::from_uuid(id))
        .await?;
    Ok(Json(sub_categories))
}

pub(super) async fn create_sub_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<CreateSubCategoryBody>,
) -> Result<(StatusCode, Json<SubCategory>), ApiError> {
    let sub_category = state
        .taxonomy
        .create_sub_category(CategoryId::from_uuid(id), body.name)
        .await?;
    Ok((StatusCode::CREATED, Json(sub_category)))
}
