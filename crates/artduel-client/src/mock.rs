use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::traits::{ChatService, ServiceError};
use crate::wire::ChatRequest;

/// A scripted `ChatService` for tests: returns preconfigured responses
/// in order and records every request it receives.
pub struct MockChat {
    script: Mutex<VecDeque<Result<String, ServiceError>>>,
    calls: Mutex<Vec<ChatRequest>>,
}

impl MockChat {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Script responses for each successive call, in order.
    pub fn with_responses(responses: Vec<&str>) -> Self {
        let mock = Self::new();
        for r in responses {
            mock.push_ok(r);
        }
        mock
    }

    pub fn push_ok(&self, content: &str) {
        self.script
            .lock()
            .unwrap()
            .push_back(Ok(content.to_string()));
    }

    pub fn push_err(&self, err: ServiceError) {
        self.script.lock().unwrap().push_back(Err(err));
    }

    /// Requests received so far, in call order.
    pub fn calls(&self) -> Vec<ChatRequest> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockChat {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatService for MockChat {
    async fn complete(&self, req: &ChatRequest) -> Result<String, ServiceError> {
        self.calls.lock().unwrap().push(req.clone());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ServiceError::Internal(
                "mock script exhausted".to_string(),
            )))
    }
}
