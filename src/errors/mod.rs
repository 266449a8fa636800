//! Unified error handling: every failure the browser sees is a `{"message"}` body.

use std::collections::BTreeMap;
use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Normalized description of a failed backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// Context of the operation that failed.
    pub message: String,
    pub status_code: u16,
    /// Reason extracted from the backend response.
    pub reason: String,
    /// Field name to violation, as reported in the backend's `params`.
    pub invalid_params: BTreeMap<String, String>,
}

impl ApiError {
    pub fn new(message: impl Into<String>, status_code: u16, reason: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code,
            reason: reason.into(),
            invalid_params: BTreeMap::new(),
        }
    }

    pub fn with_invalid_params(mut self, params: BTreeMap<String, String>) -> Self {
        self.invalid_params = params;
        self
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} API server returned Code: {} Reason: {} ",
            self.message, self.status_code, self.reason
        )?;
        if !self.invalid_params.is_empty() {
            let details: Vec<String> = self
                .invalid_params
                .iter()
                .map(|(field, violation)| format!("{field}: {violation}"))
                .collect();
            write!(f, "=>  {}", details.join("    "))?;
        }
        Ok(())
    }
}

/// JSON body emitted for every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            message: message.into(),
        })
    }
}

/// Application error type covering backend and local failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AppError {
    /// No response at all: connection refused, DNS, timeout.
    #[error("{0}")]
    BackendUnreachable(ApiError),

    /// The backend answered with a status that signals failure.
    #[error("{0}")]
    BackendRejected(ApiError),

    /// The request breaks this gateway's own rules and never reached the backend.
    #[error("{0}")]
    Validation(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::BackendUnreachable(e) => {
                tracing::error!(error = %e, "API server unreachable");
            }
            AppError::BackendRejected(e) => {
                tracing::warn!(status = e.status_code, reason = %e.reason, "API server rejected request");
            }
            AppError::Validation(msg) => {
                tracing::debug!(error = %msg, "Rejected request locally");
            }
        }

        // Fixed 400; the backend status travels in the message text.
        (StatusCode::BAD_REQUEST, ErrorBody::new(self.to_string())).into_response()
    }
}
