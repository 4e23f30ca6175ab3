//! Health check handlers.

use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::state::AppState;

const HEALTHY: &str = "Healthy";

/// Overall health report.
#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub checks: Vec<HealthCheck>,
}

/// One named check within the report.
#[derive(Debug, Serialize)]
pub struct HealthCheck {
    pub name: &'static str,
    pub status: &'static str,
    pub description: &'static str,
    pub data: AppInfo,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppInfo {
    pub app_version: &'static str,
    pub server_time_utc: DateTime<Utc>,
}

/// Liveness health check endpoint.
///
/// Reports the running version and server clock. Does not check dependencies.
pub async fn health() -> Json<HealthReport> {
    Json(HealthReport {
        status: HEALTHY,
        checks: vec![HealthCheck {
            name: "app_info",
            status: HEALTHY,
            description: "App info OK",
            data: AppInfo {
                app_version: env!("CARGO_PKG_VERSION"),
                server_time_utc: Utc::now(),
            },
        }],
    })
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the data file cannot be read.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    if state.store().is_readable().await {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}
