//! Node deploy log route.

use axum::extract::{Path, State};

use crate::AppState;

/// GET /node_log/{name} — plain-text deploy log of a node.
pub async fn show(State(state): State<AppState>, Path(name): Path<String>) -> String {
    state.node_logs.read_log(&name).await
}
