//! REST transport seam for the Taiga API.
//!
//! Repositories build paths and query strings and hand them to a
//! [`Transport`]; the transport performs the HTTP exchange and returns the
//! decoded JSON body. [`http::HttpTransport`] is the reqwest-backed
//! implementation, tests plug in an in-memory one.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::constants::{
    ERROR_COMMON, ERROR_NETWORK, ERROR_NOT_FOUND, ERROR_NO_PROJECT, ERROR_PERMISSION, ERROR_UNAUTHORIZED,
};

pub mod http;
pub mod requests;
pub mod responses;

/// Query string pairs, in order
pub type Query<'a> = [(&'a str, String)];

/// Failures of a REST call, classified the way the UI reports them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Not authenticated")]
    Unauthorized,

    #[error("Permission denied")]
    Forbidden,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Unexpected HTTP status {0}")]
    Status(u16),

    #[error("Invalid response data: {0}")]
    Decode(String),

    #[error("No project selected")]
    NoProjectSelected,
}

impl ApiError {
    /// Classify a non-success HTTP response.
    ///
    /// Taiga puts a human-readable reason in `_error_message` for 400s.
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            400 => {
                let message = serde_json::from_str::<Value>(body)
                    .ok()
                    .and_then(|v| v.get("_error_message").and_then(Value::as_str).map(str::to_string))
                    .unwrap_or_else(|| body.trim().to_string());
                ApiError::Validation(message)
            }
            401 => ApiError::Unauthorized,
            403 => ApiError::Forbidden,
            404 => ApiError::NotFound(body.trim().to_string()),
            code => ApiError::Status(code),
        }
    }

    /// Message suitable for showing to the user
    pub fn user_message(&self) -> &str {
        match self {
            ApiError::Network(_) => ERROR_NETWORK,
            ApiError::Unauthorized => ERROR_UNAUTHORIZED,
            ApiError::Forbidden => ERROR_PERMISSION,
            ApiError::Validation(message) if !message.is_empty() => message.as_str(),
            ApiError::NotFound(_) => ERROR_NOT_FOUND,
            ApiError::NoProjectSelected => ERROR_NO_PROJECT,
            ApiError::Validation(_) | ApiError::Status(_) | ApiError::Decode(_) => ERROR_COMMON,
        }
    }
}

/// Decode a JSON body into a wire type
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

/// HTTP exchange with the Taiga API. Paths are relative to the API prefix,
/// e.g. `userstories/42`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, path: &str, query: &Query<'_>) -> Result<Value, ApiError>;

    async fn post(&self, path: &str, query: &Query<'_>, body: Option<Value>) -> Result<Value, ApiError>;

    async fn patch(&self, path: &str, body: Value) -> Result<Value, ApiError>;

    async fn delete(&self, path: &str) -> Result<(), ApiError>;

    /// POST to `server` instead of the session's server, without credentials.
    /// Used to log in, before the session points anywhere trustworthy.
    async fn post_anonymous(&self, server: &str, path: &str, body: Value) -> Result<Value, ApiError>;
}
