//! Health check endpoint

use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use hr_api::AppState;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Overall status; the process is up in both cases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Ok,
    Degraded,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    /// Whether the database answered a ping
    pub database: bool,
    pub version: String,
    pub response_time_ms: u64,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let start = Instant::now();

    let database = match state.db.ping().await {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "Database health check failed");
            false
        }
    };

    let report = HealthReport {
        status: if database {
            HealthStatus::Ok
        } else {
            HealthStatus::Degraded
        },
        database,
        version: env!("CARGO_PKG_VERSION").to_string(),
        response_time_ms: start.elapsed().as_millis() as u64,
        timestamp: chrono::Utc::now(),
    };

    (StatusCode::OK, Json(report))
}
