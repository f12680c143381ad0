//! JSON-over-HTTP transport for the application services.
//!
//! Routes live under `/api` plus a bare `/health` probe. Handlers parse
//! paths and bodies, call one service operation, and map errors through
//! [`ApiError`].

mod analytics;
mod error;
mod taxonomy;
mod tasks;
mod tracking;

pub use error::ApiError;

use crate::app::Services;
use crate::taxonomy::domain::Pillar;
use crate::tracking::domain::{Granularity, PeriodAnchor};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use mockable::DefaultClock;
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Services shared by every handler.
pub type AppState = Arc<Services<DefaultClock>>;

/// Builds the application router.
#[must_use]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/pillars", get(pillars))
        // Taxonomy.
        .route(
            "/api/categories",
            get(taxonomy::list_categories).post(taxonomy::create_category),
        )
        .route(
            "/api/categories/{id}",
            get(taxonomy::get_category).patch(taxonomy::update_category),
        )
        .route(
            "/api/categories/{id}/sub-categories",
            get(taxonomy::list_sub_categories).post(taxonomy::create_sub_category),
        )
        // Task registry.
        .route("/api/tasks", get(tasks::list_tasks).post(tasks::create_task))
        .route(
            "/api/tasks/{id}",
            get(tasks::get_task)
                .patch(tasks::update_task)
                .delete(tasks::delete_task),
        )
        .route("/api/tasks/{id}/complete", post(tasks::complete_task))
        .route("/api/tasks/{id}/na", post(tasks::mark_task_na))
        .route("/api/tasks/{id}/reopen", post(tasks::reopen_task))
        // Period tracking.
        .route(
            "/api/time-entries/{granularity}/{date}",
            get(tracking::list_entries).put(tracking::save_entries),
        )
        .route(
            "/api/time-entries/{granularity}/{date}/{task_id}/{sub_unit}",
            delete(tracking::delete_entry),
        )
        .route(
            "/api/task-status/{granularity}/{date}/{task_id}",
            get(tracking::get_status).delete(tracking::reset_status),
        )
        .route(
            "/api/task-status/{granularity}/{date}/{task_id}/track",
            post(tracking::track_status),
        )
        .route(
            "/api/task-status/{granularity}/{date}/{task_id}/complete",
            post(tracking::complete_status),
        )
        .route(
            "/api/task-status/{granularity}/{date}/{task_id}/na",
            post(tracking::na_status),
        )
        .route("/api/summaries/{granularity}", get(tracking::list_summaries))
        .route(
            "/api/summaries/{granularity}/{date}",
            get(tracking::get_summary),
        )
        // Analytics.
        .route("/api/analytics/pillars", get(analytics::pillar_breakdown))
        .route("/api/analytics/completion", get(analytics::completion_rate))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
struct PillarView {
    pillar: Pillar,
    name: &'static str,
    daily_allocation_minutes: u32,
}

async fn pillars() -> Json<Vec<PillarView>> {
    Json(
        Pillar::ALL
            .into_iter()
            .map(|pillar| PillarView {
                pillar,
                name: pillar.display_name(),
                daily_allocation_minutes: pillar.daily_allocation_minutes(),
            })
            .collect(),
    )
}

fn parse_anchor(granularity: &str, date: &str) -> Result<PeriodAnchor, ApiError> {
    let parsed = Granularity::try_from(granularity)?;
    Ok(PeriodAnchor::parse(parsed, date)?)
}
