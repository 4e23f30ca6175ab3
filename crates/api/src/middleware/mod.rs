//! HTTP middleware stack for the API.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (`http_request` span)
//! 3. Correlation id (read or generate `X-Correlation-ID`)
//! 4. Problem details (fill `instance` and `traceId` on error bodies)
//! 5. Request/response logging

pub mod correlation_id;
pub mod logging;
pub mod problem_details;

pub use correlation_id::{CORRELATION_ID_HEADER, CorrelationId, correlation_id_middleware};
pub use logging::request_logging_middleware;
pub use problem_details::problem_details_middleware;
