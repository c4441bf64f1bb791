pub mod forward;
pub mod health;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;

use crate::config::RelayConfig;

pub struct InnerAppState {
    pub config: RelayConfig,
    pub http: reqwest::Client,
}

pub type AppState = Arc<InnerAppState>;

pub fn build_router(config: RelayConfig) -> Router {
    let state: AppState = Arc::new(InnerAppState {
        config,
        http: reqwest::Client::new(),
    });

    Router::new()
        .merge(health::routes())
        .merge(forward::routes())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
