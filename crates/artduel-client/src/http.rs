use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::traits::{ChatService, ServiceError};
use crate::wire::ChatRequest;

/// Async HTTP implementation of `ChatService`.
/// Talks to a running artduel-relay, which injects the upstream
/// credential; this client never sees it.
pub struct RelayClient {
    base_url: String,
    client: Client,
}

impl RelayClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Check if the relay is reachable. Used by the TUI's startup wait
    /// loop; not authenticated.
    pub async fn health_check(&self) -> Result<(), ServiceError> {
        let resp = self
            .client
            .get(format!("{}/api/health", self.base_url))
            .send()
            .await
            .map_err(|e| ServiceError::Internal(format!("connection failed: {e}")))?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(ServiceError::Internal(format!(
                "health check failed: {}",
                resp.status()
            )))
        }
    }
}

#[async_trait]
impl ChatService for RelayClient {
    async fn complete(&self, req: &ChatRequest) -> Result<String, ServiceError> {
        let resp = self
            .client
            .post(format!("{}/api/nvidia", self.base_url))
            .json(req)
            .send()
            .await
            .map_err(|e| ServiceError::Internal(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| ServiceError::Internal(format!("read body: {e}")))?;

        if !status.is_success() {
            return Err(ServiceError::Api {
                status: status.as_u16(),
                body,
            });
        }

        match content_from_body(&body) {
            Some(content) => Ok(content),
            None => Err(ServiceError::NoContent),
        }
    }
}

/// Pull the text content out of a 2xx response body.
///
/// The upstream's envelope shape varies between deployments, so the
/// known JSON paths are tried in priority order. A body that is not
/// JSON at all is used as raw text.
fn content_from_body(body: &str) -> Option<String> {
    let content = match serde_json::from_str::<Value>(body) {
        Ok(data) => extract_content(&data)?,
        Err(_) => body.to_string(),
    };
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}

/// Priority-ordered fallback chain over the possible content locations.
fn extract_content(data: &Value) -> Option<String> {
    const PATHS: &[&str] = &[
        "/choices/0/message/content",
        "/choices/0/text",
        "/output_text",
        "/message/content",
    ];
    PATHS
        .iter()
        .find_map(|path| {
            data.pointer(path)
                .and_then(Value::as_str)
                .filter(|s| !s.trim().is_empty())
        })
        .map(String::from)
}
