//! Request/response logging middleware.
//!
//! Logs every request with its body on the way in and the status with its
//! body on the way out. Bodies are buffered so the handler still sees them;
//! only the first 64 KiB of each is logged.

use axum::{
    body::{Body, Bytes},
    extract::Request,
    middleware::Next,
    response::Response,
};

use crate::error::AppError;

/// Longest body prefix written to the log.
const MAX_LOGGED_BODY: usize = 64 * 1024;

/// Largest request body accepted.
const MAX_REQUEST_BODY: usize = 2 * 1024 * 1024;

/// Middleware that logs request and response bodies.
///
/// # Errors
///
/// Returns `AppError::BadRequest` if the request body cannot be read or is
/// larger than 2 MiB, and `AppError::Internal` if the response body cannot
/// be read.
pub async fn request_logging_middleware(request: Request, next: Next) -> Result<Response, AppError> {
    let (parts, body) = request.into_parts();
    let bytes = axum::body::to_bytes(body, MAX_REQUEST_BODY)
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read request body: {e}")))?;

    tracing::info!(
        body = %body_preview(&bytes),
        "Incoming Request: {} {}",
        parts.method,
        parts.uri.path()
    );

    let response = next.run(Request::from_parts(parts, Body::from(bytes))).await;

    let (parts, body) = response.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to read response body: {e}")))?;

    tracing::info!(
        body = %body_preview(&bytes),
        "Outgoing Response: {}",
        parts.status.as_u16()
    );

    Ok(Response::from_parts(parts, Body::from(bytes)))
}

fn body_preview(bytes: &Bytes) -> String {
    let shown = bytes.get(..MAX_LOGGED_BODY).unwrap_or(bytes);
    String::from_utf8_lossy(shown).into_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{Router, http, middleware, routing::post};
    use tower::ServiceExt;

    use super::*;

    #[tokio::test]
    async fn test_body_passes_through() {
        let app = Router::new()
            .route("/echo", post(|body: String| async move { body }))
            .layer(middleware::from_fn(request_logging_middleware));

        let response = app
            .oneshot(
                http::Request::builder()
                    .method("POST")
                    .uri("/echo")
                    .body(Body::from("hola"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), http::StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"hola");
    }

    #[test]
    fn test_preview_is_capped() {
        let big = Bytes::from(vec![b'a'; MAX_LOGGED_BODY + 10]);
        assert_eq!(body_preview(&big).len(), MAX_LOGGED_BODY);
        assert_eq!(body_preview(&Bytes::from_static(b"short")), "short");
    }
}
