// Route handlers for the function server

use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{json, Value};
use tracing::{debug, error};

use super::AppState;

/// Fixed liveness payload; succeeds whenever the listener is up, independent
/// of handler state.
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "name": state.identity.name,
    }))
}

/// Function metadata, capabilities in original insertion order.
pub async fn info(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "name": state.identity.name,
        "description": state.identity.description,
        "capabilities": state.identity.capabilities,
        "status": "running",
    }))
}

/// Invokes the attached handler with the request payload.
///
/// The input is the body's `input` field, falling back to the entire body.
/// Handler failures become HTTP 500 with the message embedded; they never
/// crash the process. The handler-missing branch is defensive: start()
/// refuses to serve without a handler, but the router can be driven manually.
pub async fn execute(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let input = body.get("input").cloned().unwrap_or(body);

    let Some(handler) = state.handler.get() else {
        error!(
            "Execution request received for '{}' with no handler attached",
            state.identity.name
        );
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "No function handler attached" })),
        );
    };

    debug!("Executing function '{}'", state.identity.name);

    match handler(input).await {
        Ok(result) => (StatusCode::OK, Json(result)),
        Err(e) => {
            error!("Function '{}' failed: {}", state.identity.name, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": format!("Function execution failed: {}", e) })),
            )
        }
    }
}
