use axum::extract::State;
use axum::Json;

use super::SharedBridge;

pub async fn accessories(State(bridge): State<SharedBridge>) -> Json<serde_json::Value> {
    let bridge = bridge.lock().await;
    Json(bridge.to_json())
}
