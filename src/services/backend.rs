//! HTTP client for the provisioning API server.
//!
//! Every call goes to `{API_SERVER_URL}/{path}`. Transport failures (refused
//! connections, DNS errors, timeouts) become `AppError::BackendUnreachable`
//! with a synthesized 500; responses whose status signals failure become
//! `AppError::BackendRejected` carrying the real status and the normalized
//! reason. Nothing is retried.

use reqwest::{Client, Response, StatusCode};
use serde_json::{Map, Value};

use crate::config::AppConfig;
use crate::errors::{ApiError, AppError};
use crate::models::resource::ResourceKind;
use crate::services::normalize;

/// Response header carrying the deploy log location of a new node.
pub const DEPLOY_LOG_HEADER: &str = "X-Deploy-Log";

/// Highest status a create call may return and still count as success.
const MAX_CREATE_SUCCESS_STATUS: u16 = 210;

/// Result of a successful create call.
#[derive(Debug, Clone)]
pub struct Created {
    pub body: Value,
    /// Value of the `X-Deploy-Log` header, when present.
    pub deploy_log: Option<String>,
}

/// Thin wrapper over a pooled `reqwest::Client` bound to the API server.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(config: &AppConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(config.api_timeout()).build()?;
        Ok(Self {
            http,
            base_url: config.api_server_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GET a path; anything but 200 is a failure.
    pub async fn fetch(&self, path: &str) -> Result<Value, AppError> {
        const CONTEXT: &str = "There was an issue fetching your data";

        tracing::debug!(path, "GET from API server");
        let response = self.http.get(self.url(path)).send().await.map_err(unreachable)?;
        let (status, body) = read(response).await?;
        if status != StatusCode::OK {
            return Err(rejected(CONTEXT, status, &body));
        }
        decode(CONTEXT, status, &body)
    }

    /// POST a form-encoded payload to a collection.
    ///
    /// Statuses above 210 are failures, not only 4xx/5xx. Field-level
    /// violations from the body's `params` are attached to the error.
    pub async fn submit(&self, path: &str, payload: &Map<String, Value>) -> Result<Created, AppError> {
        let context = format!("Could not create a new {path}");

        tracing::debug!(path, "POST to API server");
        let response = self
            .http
            .post(self.url(path))
            .form(&form_fields(payload))
            .send()
            .await
            .map_err(unreachable)?;
        let deploy_log = response
            .headers()
            .get(DEPLOY_LOG_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let (status, body) = read(response).await?;

        if status.as_u16() > MAX_CREATE_SUCCESS_STATUS {
            let err = ApiError::new(context, status.as_u16(), normalize::reason(&body, phrase(status)))
                .with_invalid_params(normalize::invalid_params(&body));
            return Err(AppError::BackendRejected(err));
        }

        Ok(Created {
            body: decode(&context, status, &body)?,
            deploy_log,
        })
    }

    /// PUT a form-encoded payload to an item; anything but 200 is a failure.
    ///
    /// The payload is sent as given; callers drop the `id` field first.
    pub async fn replace(
        &self,
        kind: ResourceKind,
        id: &str,
        payload: &Map<String, Value>,
    ) -> Result<Value, AppError> {
        let context = format!("The {kind} with ID {id} couldnot be updated");

        tracing::debug!(resource = %kind, id, "PUT to API server");
        let response = self
            .http
            .put(self.url(&kind.item_path(id)))
            .form(&form_fields(payload))
            .send()
            .await
            .map_err(unreachable)?;
        let (status, body) = read(response).await?;
        if status != StatusCode::OK {
            return Err(rejected(&context, status, &body));
        }
        decode(&context, status, &body)
    }

    /// DELETE an item; only 204 counts as success.
    pub async fn remove(&self, kind: ResourceKind, id: &str) -> Result<(), AppError> {
        tracing::debug!(resource = %kind, id, "DELETE on API server");
        let response = self
            .http
            .delete(self.url(&kind.item_path(id)))
            .send()
            .await
            .map_err(unreachable)?;
        let (status, body) = read(response).await?;
        if status != StatusCode::NO_CONTENT {
            let context = format!("The {kind} with id {id} couldn't be deleted.");
            return Err(rejected(&context, status, &body));
        }
        Ok(())
    }

    /// Status of a bare GET on the base URL, for readiness probes.
    pub async fn ping(&self) -> Result<StatusCode, reqwest::Error> {
        let response = self.http.get(&self.base_url).send().await?;
        Ok(response.status())
    }
}

/// Encode a JSON object as form fields.
///
/// Arrays expand to repeated keys, `null` fields are dropped, and nested
/// objects travel as their JSON text.
pub fn form_fields(payload: &Map<String, Value>) -> Vec<(String, String)> {
    let mut fields = Vec::with_capacity(payload.len());
    for (key, value) in payload {
        match value {
            Value::Null => {}
            Value::Array(items) => {
                for item in items {
                    if let Some(text) = scalar_text(item) {
                        fields.push((key.clone(), text));
                    }
                }
            }
            other => {
                if let Some(text) = scalar_text(other) {
                    fields.push((key.clone(), text));
                }
            }
        }
    }
    fields
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

async fn read(response: Response) -> Result<(StatusCode, Vec<u8>), AppError> {
    let status = response.status();
    let body = response.bytes().await.map_err(unreachable)?;
    Ok((status, body.to_vec()))
}

fn phrase(status: StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or("Unknown Status")
}

fn unreachable(err: reqwest::Error) -> AppError {
    tracing::error!(error = %err, timeout = err.is_timeout(), "No response from API server");
    AppError::BackendUnreachable(ApiError::new(
        "No response from API Server",
        500,
        "Connection Error",
    ))
}

fn rejected(context: &str, status: StatusCode, body: &[u8]) -> AppError {
    AppError::BackendRejected(ApiError::new(
        context,
        status.as_u16(),
        normalize::reason(body, phrase(status)),
    ))
}

fn decode(context: &str, status: StatusCode, body: &[u8]) -> Result<Value, AppError> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::warn!(error = %e, status = status.as_u16(), "Undecodable API server response");
        AppError::BackendRejected(ApiError::new(
            context,
            status.as_u16(),
            "Invalid JSON in API response",
        ))
    })
}
