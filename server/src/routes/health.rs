//! Liveness and database diagnostics.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

use crate::state::AppState;

/// `GET /api/health`: the process is up.
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "ok": true }))
}

/// `GET /api/db-check`: round-trip to the credential store.
pub async fn db_check(State(state): State<AppState>) -> Response {
    match state.users.count().await {
        Ok(count) => Json(json!({ "ok": true, "userCount": count })).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "db check failed");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "ok": false, "error": e.to_string() }))).into_response()
        }
    }
}
