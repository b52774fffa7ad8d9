use axum::Json;
use bytes::Bytes;
use serde_json::{json, Value};

/// POST /debug/echo
///
/// Echoes the parsed JSON body back as `{"received": ...}` so a client can
/// confirm what the server saw. Never touches the chat pipeline. An
/// unparseable body is reported in a 200 response, not as an HTTP error.
pub async fn echo_handler(body: Bytes) -> Json<Value> {
    match serde_json::from_slice::<Value>(&body) {
        Ok(received) => Json(json!({ "received": received })),
        Err(_) => Json(json!({ "error": "invalid json" })),
    }
}
