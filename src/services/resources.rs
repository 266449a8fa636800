//! Generic list/create/get/update/delete over the API server's collections.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::errors::{ApiError, AppError};
use crate::models::resource::ResourceKind;
use crate::services::backend::{BackendClient, Created};
use crate::services::node_logs::NodeLogIndex;

/// Message returned when an update targets a type the gateway won't update.
pub const INVALID_UPDATE: &str = "Invalid resource to update";

/// Confirmation body for a successful delete.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Deleted {
    pub message: String,
}

/// List a collection exactly as the API server returns it.
pub async fn list(backend: &BackendClient, kind: ResourceKind) -> Result<Vec<Value>, AppError> {
    match backend.fetch(kind.as_str()).await? {
        Value::Array(items) => Ok(items),
        other => {
            tracing::warn!(resource = %kind, body = %other, "List response is not an array");
            Err(AppError::BackendRejected(ApiError::new(
                "There was an issue fetching your data",
                200,
                format!("Expected a list of {kind}"),
            )))
        }
    }
}

/// Create a resource, then run the post-create hook for its type.
pub async fn create(
    backend: &BackendClient,
    node_logs: &NodeLogIndex,
    kind: ResourceKind,
    payload: &Map<String, Value>,
) -> Result<Value, AppError> {
    let created = backend.submit(kind.as_str(), payload).await?;
    after_create(node_logs, kind, &created).await;
    Ok(created.body)
}

/// Side effects of a successful create. Failures here never fail the create.
async fn after_create(node_logs: &NodeLogIndex, kind: ResourceKind, created: &Created) {
    if !kind.records_deploy_log() {
        return;
    }

    let name = created.body.get("name").and_then(Value::as_str);
    match (name, created.deploy_log.as_deref()) {
        (Some(name), Some(log)) => match node_logs.record(name, log).await {
            Ok(true) => {}
            Ok(false) => tracing::warn!(node = name, "Blank node name or deploy log, not recorded"),
            Err(e) => tracing::warn!(error = %e, node = name, "Failed to record node deploy log"),
        },
        _ => tracing::warn!(resource = %kind, "Create response lacks name or deploy log header"),
    }
}

/// Fetch a single item.
pub async fn get(backend: &BackendClient, kind: ResourceKind, id: &str) -> Result<Value, AppError> {
    backend.fetch(&kind.item_path(id)).await
}

/// Update an item. A client-supplied `id` is never forwarded.
pub async fn update(
    backend: &BackendClient,
    kind: ResourceKind,
    id: &str,
    mut payload: Map<String, Value>,
) -> Result<Value, AppError> {
    payload.remove("id");
    backend.replace(kind, id, &payload).await
}

/// Delete an item; the API server must answer 204.
pub async fn delete(backend: &BackendClient, kind: ResourceKind, id: &str) -> Result<Deleted, AppError> {
    backend.remove(kind, id).await?;
    tracing::info!(resource = %kind, id, "Deleted resource");
    Ok(Deleted {
        message: format!("Deleted {kind} with id {id}"),
    })
}
