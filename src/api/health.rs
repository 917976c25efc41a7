use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health - liveness, without touching the gateway
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "gatewayConfigured": state.gateway.is_configured(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
