//! Wire DTOs for the auth API.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// The public projection of a user as returned by `/api/me` and the auth endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    /// Unique user identifier (UUID string).
    pub id: String,
    /// Normalized (trimmed, lowercase) email.
    pub email: String,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

/// Failure from an API call: either a non-2xx response or a transport error.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiError {
    /// HTTP status, or `0` when the request never completed.
    pub status: u16,
    /// Server-provided `error` text, or a generic `Request failed: <status>`.
    pub message: String,
    /// Parsed response body, if any.
    pub data: Option<serde_json::Value>,
}

impl ApiError {
    /// Build an error from a non-success response body.
    #[must_use]
    pub fn from_response(status: u16, data: Option<serde_json::Value>) -> Self {
        let message = data
            .as_ref()
            .and_then(|d| d.get("error"))
            .and_then(|e| match e {
                serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
                serde_json::Value::Null | serde_json::Value::Bool(false) | serde_json::Value::String(_) => None,
                other => Some(other.to_string()),
            })
            .unwrap_or_else(|| format!("Request failed: {status}"));
        Self { status, message, data }
    }

    /// Build an error for a request that never got a response.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self { status: 0, message: message.into(), data: None }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ApiError {}
