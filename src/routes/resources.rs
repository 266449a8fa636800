//! Resource routes: collection list/create and item get/update/delete.

use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use serde_json::{Map, Value};

use crate::errors::AppError;
use crate::models::resource::ResourceKind;
use crate::services::resources::{self as resource_service, Deleted};
use crate::AppState;

/// GET /{resource} — list a collection.
pub async fn list(
    State(state): State<AppState>,
    Path(resource): Path<String>,
) -> Result<Json<Vec<Value>>, AppError> {
    let kind: ResourceKind = resource.parse()?;
    let items = resource_service::list(&state.backend, kind).await?;
    Ok(Json(items))
}

/// POST /{resource} — create a new resource.
pub async fn create(
    State(state): State<AppState>,
    Path(resource): Path<String>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let kind: ResourceKind = resource.parse()?;
    let payload = parse_payload(&body)?;
    let created = resource_service::create(&state.backend, &state.node_logs, kind, &payload).await?;
    Ok(Json(created))
}

/// GET /{resource}/{id} — fetch one resource.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path((resource, id)): Path<(String, String)>,
) -> Result<Json<Value>, AppError> {
    let kind: ResourceKind = resource.parse()?;
    let item = resource_service::get(&state.backend, kind, &id).await?;
    Ok(Json(item))
}

/// POST /{resource}/{id} — update a provider or license key.
pub async fn update(
    State(state): State<AppState>,
    Path((resource, id)): Path<(String, String)>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let kind = match resource.parse::<ResourceKind>() {
        Ok(kind) if kind.is_updatable() => kind,
        _ => {
            return Err(AppError::Validation(
                resource_service::INVALID_UPDATE.to_string(),
            ))
        }
    };

    let payload = parse_payload(&body)?;
    let item = resource_service::update(&state.backend, kind, &id, payload).await?;
    Ok(Json(item))
}

/// DELETE /{resource}/{id} — delete one resource.
pub async fn delete(
    State(state): State<AppState>,
    Path((resource, id)): Path<(String, String)>,
) -> Result<Json<Deleted>, AppError> {
    let kind: ResourceKind = resource.parse()?;
    let deleted = resource_service::delete(&state.backend, kind, &id).await?;
    Ok(Json(deleted))
}

/// Decode a request body as a JSON object regardless of its content type.
fn parse_payload(body: &[u8]) -> Result<Map<String, Value>, AppError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(payload)) => Ok(payload),
        Ok(_) => Err(AppError::Validation(
            "Invalid request body: expected a JSON object".to_string(),
        )),
        Err(e) => Err(AppError::Validation(format!("Invalid request body: {e}"))),
    }
}
