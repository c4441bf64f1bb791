use async_trait::async_trait;
use thiserror::Error;

use crate::wire::ChatRequest;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The relay (or the upstream through it) answered with a non-2xx
    /// status. The body is the raw error text.
    #[error("API Error {status}: {body}")]
    Api { status: u16, body: String },

    /// A 2xx response carried no extractable text content.
    #[error("no content returned")]
    NoContent,

    #[error("internal error: {0}")]
    Internal(String),
}

/// Abstraction over a chat-completion call.
///
/// The engine and TUI program against this trait. `RelayClient` is the
/// HTTP implementation; `MockChat` scripts responses for tests.
#[async_trait]
pub trait ChatService: Send + Sync {
    /// Submit one completion request and return the trimmed text content.
    async fn complete(&self, req: &ChatRequest) -> Result<String, ServiceError>;
}
