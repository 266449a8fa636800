//! Health check endpoints for liveness and readiness probes.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

/// Readiness probe detail.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub api_server: String,
}

/// Liveness probe — always returns OK if the process is running.
pub async fn live() -> &'static str {
    "OK"
}

/// Readiness probe — checks that the API server answers at all.
pub async fn ready(State(state): State<AppState>) -> Json<HealthStatus> {
    let api_status = match state.backend.ping().await {
        Ok(_) => "connected".to_string(),
        Err(e) => {
            tracing::warn!(error = %e, "API server health check failed");
            format!("error: {e}")
        }
    };

    Json(HealthStatus {
        status: "ok".to_string(),
        api_server: api_status,
    })
}
