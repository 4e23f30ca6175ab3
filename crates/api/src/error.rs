//! Unified error handling with Sentry integration.
//!
//! Handlers return `Result<T, AppError>`. Every error is rendered as a
//! problem-details body ([`ErrorResponse`]); server errors are captured to
//! Sentry before responding. The request path and correlation id are filled
//! in afterwards by [`crate::middleware::problem_details`].

use std::collections::BTreeMap;

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::services::CatalogError;
use crate::validation::ValidationErrors;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request fields failed validation.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// Malformed request (unparseable body, query or path).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A catalog operation failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Problem family, deciding status, type URI and title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadRequest,
    NotFound,
    Business,
    Internal,
}

impl ErrorKind {
    #[must_use]
    pub const fn status(self) -> StatusCode {
        match self {
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Business => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::BadRequest => "bad-request",
            Self::NotFound => "not-found",
            Self::Business => "business",
            Self::Internal => "internal",
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::BadRequest => "Bad Request",
            Self::NotFound => "Not Found",
            Self::Business => "Business rule violated",
            Self::Internal => "Internal server error",
        }
    }
}

/// Problem-details error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    pub error_type: String,
    pub status: u16,
    /// Application error code, or the numeric status when there is none.
    pub code: String,
    pub title: String,
    pub detail: String,
    /// Request path.
    pub instance: String,
    /// Correlation id of the request.
    pub trace_id: String,
    /// Validation failures keyed by field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

impl ErrorResponse {
    /// A body for `kind` with path and correlation id still blank.
    #[must_use]
    pub fn new(kind: ErrorKind, code: Option<&str>, detail: impl Into<String>) -> Self {
        let status = kind.status().as_u16();
        Self {
            error_type: format!("https://marketplace.com/errors/{}", kind.slug()),
            status,
            code: code.map_or_else(|| status.to_string(), str::to_string),
            title: kind.title().to_string(),
            detail: detail.into(),
            instance: String::new(),
            trace_id: String::new(),
            errors: None,
        }
    }
}

impl AppError {
    /// Problem family of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) | Self::BadRequest(_) => ErrorKind::BadRequest,
            Self::Catalog(err) => match err {
                CatalogError::NotFound { .. } => ErrorKind::NotFound,
                CatalogError::BusinessRule { .. } => ErrorKind::Business,
                CatalogError::BadRequest { .. } => ErrorKind::BadRequest,
                CatalogError::DataIntegrity(_) | CatalogError::Repository(_) => {
                    ErrorKind::Internal
                }
            },
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// The problem-details body for this error.
    #[must_use]
    pub fn to_problem(&self) -> ErrorResponse {
        const INTERNAL_DETAIL: &str = "An unexpected error occurred";

        let kind = self.kind();
        // Don't expose internal error details to clients
        if kind == ErrorKind::Internal {
            return ErrorResponse::new(kind, None, INTERNAL_DETAIL);
        }

        match self {
            Self::Validation(errors) => {
                let mut problem = ErrorResponse::new(kind, None, errors.to_string());
                problem.errors = Some(errors.to_map());
                problem
            }
            Self::BadRequest(message) => ErrorResponse::new(kind, None, message.clone()),
            Self::Catalog(err) => ErrorResponse::new(kind, err.code(), err.to_string()),
            Self::Internal(_) => ErrorResponse::new(kind, None, INTERNAL_DETAIL),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let problem = self.to_problem();

        // Capture server errors to Sentry
        if self.kind() == ErrorKind::Internal {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, code = %problem.code, "Request rejected");
        }

        let status = self.kind().status();
        let mut response = (
            status,
            [(header::CONTENT_TYPE, "application/problem+json")],
            Json(&problem),
        )
            .into_response();
        response.extensions_mut().insert(problem);
        response
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
