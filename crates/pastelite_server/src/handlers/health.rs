use crate::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

/// `200 {"ok":true}` when the store answers within the deadline, else `503 {"ok":false}`.
pub async fn healthz(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match state.call(|service, _gate| service.ping()).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "ok": true }))),
        Err(err) => {
            tracing::warn!("Health check failed: {}", err);
            (StatusCode::SERVICE_UNAVAILABLE, Json(json!({ "ok": false })))
        }
    }
}
