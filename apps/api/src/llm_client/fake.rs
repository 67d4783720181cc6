//! Scripted `TextGenerator` for tests. Never touches the network.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{CompletionRequest, LlmError, TextGenerator};

pub struct FakeGenerator {
    reply: Result<String, (u16, String)>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl FakeGenerator {
    /// Answers every request with `text`.
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            reply: Ok(text.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Fails every request with an API error.
    pub fn failing(status: u16, message: impl Into<String>) -> Self {
        Self {
            reply: Err((status, message.into())),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err((status, message)) => Err(LlmError::Api {
                status: *status,
                message: message.clone(),
            }),
        }
    }
}
