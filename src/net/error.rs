//! Error type shared by every service call.
//!
//! ERROR HANDLING
//! ==============
//! Services propagate `ApiError` untouched; the UI renders its `Display`
//! output as the user-facing error string.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("invalid response: {0}")]
    Decode(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("{0}")]
    Rejected(String),
    #[error("{0}")]
    Invalid(String),
}

impl ApiError {
    /// Build a `Status` error from a non-2xx response body.
    ///
    /// Backends report failures as `{ "message": ... }` or `{ "error": ... }`;
    /// anything else falls back to a generic status line.
    pub fn from_status(status: u16, body: &Value) -> Self {
        let message = body_message(body).unwrap_or_else(|| request_failed_message(status));
        Self::Status { status, message }
    }

    /// HTTP status code, when the failure came from the backend.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn body_message(body: &Value) -> Option<String> {
    ["message", "error"]
        .iter()
        .filter_map(|key| body.get(key).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_owned)
}

fn request_failed_message(status: u16) -> String {
    format!("request failed: {status}")
}
