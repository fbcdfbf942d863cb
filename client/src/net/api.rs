//! REST helpers for the auth endpoints.
//!
//! Client-side (`csr`): real HTTP calls via `gloo-net`, with the browser
//! attaching the session cookie. Native builds get a stub transport that
//! always fails, so state and routing logic still compile and test off-wasm.
//!
//! ERROR HANDLING
//! ==============
//! Every non-2xx response becomes an [`ApiError`] carrying the status and
//! the server's `error` text; callers decide whether that is fatal.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde_json::Value;

use super::types::{ApiError, PublicUser};

pub const ME_PATH: &str = "/api/me";
pub const REGISTER_PATH: &str = "/api/auth/register";
pub const LOGIN_PATH: &str = "/api/auth/login";
pub const LOGOUT_PATH: &str = "/api/auth/logout";

/// Auth transport. Implemented over HTTP in the browser and faked in tests.
#[allow(async_fn_in_trait)]
pub trait AuthApi {
    /// `GET /api/me`.
    async fn me(&self) -> Result<PublicUser, ApiError>;
    /// `POST /api/auth/register`.
    async fn register(&self, email: &str, password: &str) -> Result<PublicUser, ApiError>;
    /// `POST /api/auth/login`.
    async fn login(&self, email: &str, password: &str) -> Result<PublicUser, ApiError>;
    /// `POST /api/auth/logout`.
    async fn logout(&self) -> Result<(), ApiError>;
}

/// Turn a raw response into its JSON body, or an [`ApiError`] for non-2xx statuses.
///
/// An empty body is `None`. A body that is not JSON is an error regardless of status.
pub(crate) fn interpret_response(status: u16, text: &str) -> Result<Option<Value>, ApiError> {
    let data = if text.is_empty() {
        None
    } else {
        let parsed = serde_json::from_str::<Value>(text).map_err(|e| ApiError {
            status,
            message: format!("invalid response body: {e}"),
            data: None,
        })?;
        Some(parsed)
    };

    if !(200..300).contains(&status) {
        return Err(ApiError::from_response(status, data));
    }
    Ok(data)
}

/// Pull `user` out of a successful `{ ok: true, user }` body.
pub(crate) fn user_from_body(status: u16, data: Option<Value>) -> Result<PublicUser, ApiError> {
    let user = data
        .as_ref()
        .and_then(|d| d.get("user"))
        .filter(|u| !u.is_null())
        .and_then(|u| serde_json::from_value::<PublicUser>(u.clone()).ok());
    match user {
        Some(user) => Ok(user),
        None => Err(ApiError { status, message: "response missing user".to_owned(), data }),
    }
}

pub(crate) fn credentials_body(email: &str, password: &str) -> Value {
    serde_json::json!({ "email": email, "password": password })
}

/// Browser HTTP transport.
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpAuthApi;

#[cfg(feature = "csr")]
async fn request(post: bool, path: &str, body: Option<&Value>) -> Result<(u16, Option<Value>), ApiError> {
    use gloo_net::http::Request;

    let builder = if post { Request::post(path) } else { Request::get(path) };
    let builder = builder.header("Content-Type", "application/json");
    let request = match body {
        Some(body) => builder.json(body),
        None => builder.build(),
    }
    .map_err(|e| ApiError::transport(e.to_string()))?;

    let resp = request.send().await.map_err(|e| {
        log::warn!("{path}: request failed: {e}");
        ApiError::transport(e.to_string())
    })?;
    let status = resp.status();
    let text = resp
        .text()
        .await
        .map_err(|e| ApiError::transport(e.to_string()))?;
    log::debug!("{path} -> {status}");
    interpret_response(status, &text).map(|data| (status, data))
}

#[cfg(not(feature = "csr"))]
async fn request(_post: bool, _path: &str, _body: Option<&Value>) -> Result<(u16, Option<Value>), ApiError> {
    Err(ApiError::transport("not available outside the browser"))
}

impl AuthApi for HttpAuthApi {
    async fn me(&self) -> Result<PublicUser, ApiError> {
        let (status, data) = request(false, ME_PATH, None).await?;
        user_from_body(status, data)
    }

    async fn register(&self, email: &str, password: &str) -> Result<PublicUser, ApiError> {
        let (status, data) = request(true, REGISTER_PATH, Some(&credentials_body(email, password))).await?;
        user_from_body(status, data)
    }

    async fn login(&self, email: &str, password: &str) -> Result<PublicUser, ApiError> {
        let (status, data) = request(true, LOGIN_PATH, Some(&credentials_body(email, password))).await?;
        user_from_body(status, data)
    }

    async fn logout(&self) -> Result<(), ApiError> {
        request(true, LOGOUT_PATH, None).await.map(|_| ())
    }
}
