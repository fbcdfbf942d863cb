//! Auth routes: register, login, logout, current user.
//!
//! Each handler translates an [`AuthFailure`] into the uniform
//! `{ ok: false, ... }` body. Internal failures are logged and answered with
//! a fixed per-route message; the underlying cause never reaches the client.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum_extra::extract::cookie::CookieJar;
use serde_json::{Value, json};

use crate::services::auth::{self as auth_svc, AuthFailure};
use crate::state::AppState;

const REGISTER_FAILED: &str = "Register failed";
const LOGIN_FAILED: &str = "Login failed";
const ME_FAILED: &str = "Me failed";

// =============================================================================
// REQUEST PARSING
// =============================================================================

/// Email/password pair pulled leniently from a JSON body.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct Credentials {
    pub email: String,
    pub password: String,
}

/// Coerce a JSON field to a string: missing/null become empty, scalars are stringified.
fn field_as_string(body: &Value, key: &str) -> String {
    match body.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Parse credentials without rejecting the request; junk bodies read as empty fields.
pub(crate) fn parse_credentials(body: &[u8]) -> Credentials {
    let value: Value = serde_json::from_slice(body).unwrap_or(Value::Null);
    Credentials { email: field_as_string(&value, "email"), password: field_as_string(&value, "password") }
}

// =============================================================================
// RESPONSES
// =============================================================================

pub(crate) fn failure_status(err: &AuthFailure) -> StatusCode {
    match err {
        AuthFailure::Validation(_) => StatusCode::BAD_REQUEST,
        AuthFailure::Conflict => StatusCode::CONFLICT,
        AuthFailure::InvalidCredentials | AuthFailure::Unauthenticated => StatusCode::UNAUTHORIZED,
        AuthFailure::Store(_) | AuthFailure::Password(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Render a failure as `{ ok: false, error }`, hiding internal causes behind `internal_message`.
fn failure_response(err: AuthFailure, internal_message: &'static str) -> Response {
    let status = failure_status(&err);
    let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!(error = %err, "{internal_message}");
        internal_message.to_owned()
    } else {
        err.to_string()
    };
    (status, Json(json!({ "ok": false, "error": message }))).into_response()
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `POST /api/auth/register`: create an account and start a session.
pub async fn register(State(state): State<AppState>, jar: CookieJar, body: Bytes) -> Response {
    let creds = parse_credentials(&body);
    match auth_svc::register(&state, &creds.email, &creds.password).await {
        Ok(session) => {
            tracing::info!(user_id = %session.user.id, "user registered");
            let jar = jar.add(state.cookies.issue(&session.token));
            (StatusCode::CREATED, jar, Json(json!({ "ok": true, "user": session.user }))).into_response()
        }
        Err(err) => failure_response(err, REGISTER_FAILED),
    }
}

/// `POST /api/auth/login`: verify credentials and start a session.
pub async fn login(State(state): State<AppState>, jar: CookieJar, body: Bytes) -> Response {
    let creds = parse_credentials(&body);
    match auth_svc::login(&state, &creds.email, &creds.password).await {
        Ok(session) => {
            tracing::info!(user_id = %session.user.id, "user logged in");
            let jar = jar.add(state.cookies.issue(&session.token));
            (jar, Json(json!({ "ok": true, "user": session.user }))).into_response()
        }
        Err(err) => failure_response(err, LOGIN_FAILED),
    }
}

/// `POST /api/auth/logout`: end the session and clear the cookie. Always succeeds.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    let token = state.cookies.read(&jar);
    if let Err(e) = auth_svc::logout(&state, token.as_ref()).await {
        tracing::warn!(error = %e, "session delete failed during logout");
    }

    let jar = jar.add(state.cookies.clear());
    (jar, Json(json!({ "ok": true }))).into_response()
}

/// `GET /api/me`: return the session's user, or 401 with `user: null`.
pub async fn me(State(state): State<AppState>, jar: CookieJar) -> Response {
    let token = state.cookies.read(&jar);
    match auth_svc::current_user(&state, token.as_ref()).await {
        Ok(user) => Json(json!({ "ok": true, "user": user })).into_response(),
        Err(AuthFailure::Unauthenticated) => {
            let body = Json(json!({ "ok": false, "user": null }));
            if state.cookies.present(&jar) {
                let jar = jar.add(state.cookies.clear());
                (StatusCode::UNAUTHORIZED, jar, body).into_response()
            } else {
                (StatusCode::UNAUTHORIZED, body).into_response()
            }
        }
        Err(err) => failure_response(err, ME_FAILED),
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
