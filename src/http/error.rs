//! Mapping from service errors to HTTP responses.

use crate::task::ports::TaskRepositoryError;
use crate::task::services::TaskRegistryError;
use crate::taxonomy::ports::TaxonomyRepositoryError;
use crate::taxonomy::services::TaxonomyServiceError;
use crate::tracking::domain::{ParseGranularityError, TrackingDomainError};
use crate::tracking::ports::TrackingRepositoryError;
use crate::tracking::services::TrackingServiceError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

/// Error response carrying a status code and a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Creates a 400 response.
    #[must_use]
    pub fn bad_request(message: impl ToString) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.to_string(),
        }
    }

    /// Creates a 404 response.
    #[must_use]
    pub fn not_found(message: impl ToString) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.to_string(),
        }
    }

    /// Creates a 500 response, logging the cause.
    #[must_use]
    pub fn internal(cause: impl std::fmt::Display) -> Self {
        error!(error = %cause, "request failed");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "internal server error".to_owned(),
        }
    }

    /// Returns the response status.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<TrackingDomainError> for ApiError {
    fn from(err: TrackingDomainError) -> Self {
        Self::bad_request(err)
    }
}

impl From<ParseGranularityError> for ApiError {
    fn from(err: ParseGranularityError) -> Self {
        Self::bad_request(err)
    }
}

impl From<TaxonomyRepositoryError> for ApiError {
    fn from(err: TaxonomyRepositoryError) -> Self {
        match err {
            TaxonomyRepositoryError::CategoryNotFound(_) => Self::not_found(err),
            TaxonomyRepositoryError::DuplicateCategoryName { .. }
            | TaxonomyRepositoryError::DuplicateSubCategoryName { .. } => Self::bad_request(err),
            TaxonomyRepositoryError::Persistence(_) => Self::internal(err),
        }
    }
}

impl From<TaskRepositoryError> for ApiError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(_) => Self::not_found(err),
            TaskRepositoryError::DuplicateTask(_) => Self::bad_request(err),
            TaskRepositoryError::Persistence(_) => Self::internal(err),
        }
    }
}

impl From<TrackingRepositoryError> for ApiError {
    fn from(err: TrackingRepositoryError) -> Self {
        match err {
            TrackingRepositoryError::UnknownTask(_) => Self::bad_request(err),
            TrackingRepositoryError::Persistence(_) => Self::internal(err),
        }
    }
}

impl From<TaxonomyServiceError> for ApiError {
    fn from(err: TaxonomyServiceError) -> Self {
        match err {
            TaxonomyServiceError::Domain(inner) => Self::bad_request(inner),
            TaxonomyServiceError::Repository(inner) => inner.into(),
        }
    }
}

impl From<TaskRegistryError> for ApiError {
    fn from(err: TaskRegistryError) -> Self {
        match err {
            TaskRegistryError::Domain(inner) => Self::bad_request(inner),
            TaskRegistryError::Repository(inner) => inner.into(),
            TaskRegistryError::Taxonomy(inner) => inner.into(),
            TaskRegistryError::Tracking(inner) => inner.into(),
            TaskRegistryError::NotFound(_) => Self::not_found(err),
            TaskRegistryError::UnknownCategory(_)
            | TaskRegistryError::CategoryPillarMismatch { .. }
            | TaskRegistryError::UnknownSubCategory(_)
            | TaskRegistryError::SubCategoryMismatch { .. } => Self::bad_request(err),
        }
    }
}

impl From<TrackingServiceError> for ApiError {
    fn from(err: TrackingServiceError) -> Self {
        match err {
            TrackingServiceError::Domain(inner) => inner.into(),
            TrackingServiceError::Repository(inner) => inner.into(),
            TrackingServiceError::Tasks(inner) => inner.into(),
            TrackingServiceError::Taxonomy(inner) => inner.into(),
            TrackingServiceError::EntryNotFound { .. } => Self::not_found(err),
            TrackingServiceError::UnknownTask(_)
            | TrackingServiceError::TaskRetired(_)
            | TrackingServiceError::UnknownCategory(_)
            | TrackingServiceError::DuplicateSlot { .. } => Self::bad_request(err),
        }
    }
}
