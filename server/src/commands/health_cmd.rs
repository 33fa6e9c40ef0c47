//! Liveness/readiness endpoint

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::AppState;
use super::error::ApiError;

/// `200 {"status":"ok"}` once the database is open, `503` before
///
/// A failed initialization is reported with its cause instead of the
/// generic not-ready message.
pub async fn health(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    if state.db_state.is_ready().await {
        return Ok(Json(json!({ "status": "ok" })));
    }
    match state.db_state.init_failure().await {
        Some(reason) => Err(ApiError::Unavailable(format!(
            "Database initialization failed: {reason}"
        ))),
        None => Err(ApiError::Unavailable("Database not initialized".to_string())),
    }
}
