//! Completes problem-details error bodies.
//!
//! [`crate::error::AppError`] renders its body without knowing the request.
//! This middleware fills in `instance` (the request path) and `traceId`
//! (the correlation id) and re-serializes the body.

use axum::{
    body::Body,
    extract::Request,
    http::header,
    middleware::Next,
    response::Response,
};

use super::CorrelationId;
use crate::error::ErrorResponse;

/// Middleware that fills request details into error bodies.
///
/// Must run inside `correlation_id_middleware`.
pub async fn problem_details_middleware(request: Request, next: Next) -> Response {
    let instance = request.uri().path().to_string();
    let trace_id = request
        .extensions()
        .get::<CorrelationId>()
        .map(|id| id.as_str().to_string())
        .unwrap_or_default();

    let mut response = next.run(request).await;
    let Some(mut problem) = response.extensions_mut().remove::<ErrorResponse>() else {
        return response;
    };

    problem.instance = instance;
    problem.trace_id = trace_id;

    match serde_json::to_vec(&problem) {
        Ok(bytes) => {
            let (mut parts, _) = response.into_parts();
            parts.headers.remove(header::CONTENT_LENGTH);
            parts.extensions.insert(problem);
            Response::from_parts(parts, Body::from(bytes))
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize problem details");
            response
        }
    }
}
