//! Dashboard route: counts for the overview page.

use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::services::dashboard::{self, DashboardSummary};
use crate::AppState;

/// GET /dashboard — aggregated resource counts.
pub async fn summary(State(state): State<AppState>) -> Result<Json<DashboardSummary>, AppError> {
    let summary = dashboard::compute_summary(&state.backend).await?;
    Ok(Json(summary))
}
