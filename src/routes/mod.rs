//! Route definitions for the gateway.

pub mod dashboard;
pub mod health;
pub mod node_logs;
pub mod resources;

use std::path::Path;

use axum::{routing::get, Router};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let assets = static_assets(&state.config.static_dir);

    let api = Router::new()
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
        .route("/dashboard", get(dashboard::summary))
        .route("/node_log/{name}", get(node_logs::show))
        .route(
            "/{resource}",
            get(resources::list).post(resources::create),
        )
        .route(
            "/{resource}/{id}",
            get(resources::get_by_id)
                .post(resources::update)
                .delete(resources::delete),
        );

    api.merge(assets)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Index page, templates, and front-end assets served straight from disk.
fn static_assets(dir: &Path) -> Router<AppState> {
    Router::new()
        .route_service("/", ServeFile::new(dir.join("index.html")))
        .nest_service("/templates", ServeDir::new(dir.join("templates")))
        .nest_service("/js", ServeDir::new(dir.join("js")))
        .nest_service("/css", ServeDir::new(dir.join("css")))
        .nest_service("/img", ServeDir::new(dir.join("img")))
}
