use axum::{extract::State, Json};
use serde_json::{json, Value};

use super::ApiState;

/// `GET /` — welcome payload with version and the health-check entry point.
pub async fn root(State(state): State<ApiState>) -> Json<Value> {
    Json(json!({
        "message": format!("Welcome to {}", state.config.app_name),
        "version": state.config.app_version,
        "health": format!("{}/health", state.config.api_prefix),
    }))
}
