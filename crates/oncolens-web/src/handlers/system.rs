//! Liveness probe.

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::SharedState;

pub async fn health(State(state): State<SharedState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "endpoint": state.predictor.endpoint(),
        "source_policy": state.config.input.source_policy,
        "sessions": state.sessions.len().await,
    }))
}
