mod http;
mod mock;
mod traits;
mod wire;

pub use http::RelayClient;
pub use mock::MockChat;
pub use traits::{ChatService, ServiceError};
pub use wire::{ChatMessage, ChatRequest};
