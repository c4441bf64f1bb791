use axum::{
    body::Body,
    extract::State,
    http::StatusCode,
    response::Response,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info};

use super::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/nvidia", post(forward))
}

/// The body accepted from clients and forwarded verbatim upstream.
/// Messages stay an opaque JSON value; the relay does not interpret
/// them.
#[derive(Debug, Serialize, Deserialize)]
pub struct ForwardRequest {
    pub model: String,
    pub messages: Value,
    pub temperature: f64,
    pub max_tokens: u32,
}

/// One-route passthrough: copy the body, inject the bearer credential,
/// relay the upstream's status and body back unchanged. The upstream's
/// error text is NOT re-wrapped; only local faults produce the
/// `{"error": ...}` envelope.
async fn forward(State(state): State<AppState>, Json(req): Json<ForwardRequest>) -> Response {
    info!("forwarding request for model {}", req.model);

    let Some(api_key) = state.config.api_key.as_deref() else {
        return local_fault("NVIDIA_API_KEY is not set");
    };

    let result = state
        .http
        .post(&state.config.upstream_url)
        .header("Authorization", format!("Bearer {api_key}"))
        .json(&req)
        .send()
        .await;

    let resp = match result {
        Ok(resp) => resp,
        Err(e) => {
            error!("upstream call failed: {e}");
            return local_fault(&e.to_string());
        }
    };

    let status = resp.status();
    let body = match resp.text().await {
        Ok(body) => body,
        Err(e) => {
            error!("failed to read upstream body: {e}");
            return local_fault(&e.to_string());
        }
    };

    if status.is_success() {
        Response::builder()
            .status(StatusCode::OK)
            .header("Content-Type", "application/json")
            .body(Body::from(body))
            .unwrap()
    } else {
        error!("upstream error {status}");
        Response::builder()
            .status(status.as_u16())
            .body(Body::from(body))
            .unwrap()
    }
}

fn local_fault(message: &str) -> Response {
    let body = serde_json::json!({ "error": message });
    Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}
