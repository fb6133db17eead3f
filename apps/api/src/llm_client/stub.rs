//! Test double for `CompletionClient`.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{CompletionClient, LlmError, ModelSelector};

enum Reply {
    Text(String),
    Failure { status: u16, message: String },
}

/// Returns the same canned reply for every call and records what it was asked.
pub struct StubCompletionClient {
    reply: Reply,
    calls: AtomicUsize,
    last_request: Mutex<Option<(ModelSelector, String)>>,
}

impl StubCompletionClient {
    pub fn replying(text: impl Into<String>) -> Self {
        Self::with_reply(Reply::Text(text.into()))
    }

    pub fn failing(status: u16, message: impl Into<String>) -> Self {
        Self::with_reply(Reply::Failure {
            status,
            message: message.into(),
        })
    }

    fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<(ModelSelector, String)> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for StubCompletionClient {
    async fn complete(&self, model: &ModelSelector, prompt: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some((model.clone(), prompt.to_string()));

        match &self.reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::Failure { status, message } => Err(LlmError::Api {
                status: *status,
                message: message.clone(),
            }),
        }
    }
}
