use axum::{body::Body, http::StatusCode, response::Response, routing::post, Router};
use tokio::net::TcpListener;

use crate::config::RelayConfig;

/// A running test server with its base URL and background task handle.
pub struct TestServer {
    pub base_url: String,
    _handle: tokio::task::JoinHandle<()>,
}

async fn spawn_router(app: Router) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{addr}");
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    TestServer {
        base_url,
        _handle: handle,
    }
}

/// Spawn a relay on 127.0.0.1:0 with the given config.
pub async fn spawn_relay(config: RelayConfig) -> TestServer {
    spawn_router(crate::routes::build_router(config)).await
}

/// Spawn a stub upstream that answers `POST /v1/chat/completions` with a
/// fixed status and body. Point a relay's `upstream_url` at
/// `{base_url}/v1/chat/completions`.
pub async fn spawn_stub_upstream(status: u16, body: &str) -> TestServer {
    let body = body.to_string();
    let app = Router::new().route(
        "/v1/chat/completions",
        post(move || {
            let body = body.clone();
            async move {
                Response::builder()
                    .status(StatusCode::from_u16(status).unwrap())
                    .body(Body::from(body))
                    .unwrap()
            }
        }),
    );
    spawn_router(app).await
}
