pub mod config;
pub mod errors;
pub mod models;
pub mod routes;
pub mod services;

use services::backend::BackendClient;
use services::node_logs::NodeLogIndex;

/// Shared application state passed to all Axum handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: config::AppConfig,
    pub backend: BackendClient,
    pub node_logs: NodeLogIndex,
}

impl AppState {
    pub fn new(config: config::AppConfig) -> Result<Self, reqwest::Error> {
        let backend = BackendClient::new(&config)?;
        let node_logs = NodeLogIndex::new(config.node_log_list.clone());
        Ok(Self {
            config,
            backend,
            node_logs,
        })
    }
}
