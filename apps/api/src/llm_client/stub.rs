//! Test double for `CompletionModel`: fixed reply, call counting, last prompt capture.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{CompletionModel, CompletionRequest, LlmError};

enum Reply {
    Text(Option<String>),
    Fail { status: u16 },
}

pub struct StubModel {
    reply: Reply,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
    last_json_mode: Mutex<Option<bool>>,
}

impl StubModel {
    fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
            last_json_mode: Mutex::new(None),
        }
    }

    pub fn text(text: &str) -> Self {
        Self::with_reply(Reply::Text(Some(text.to_string())))
    }

    pub fn empty() -> Self {
        Self::with_reply(Reply::Text(None))
    }

    pub fn failing(status: u16) -> Self {
        Self::with_reply(Reply::Fail { status })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }

    pub fn last_json_mode(&self) -> Option<bool> {
        *self.last_json_mode.lock().unwrap()
    }
}

#[async_trait]
impl CompletionModel for StubModel {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<Option<String>, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(request.prompt.to_string());
        *self.last_json_mode.lock().unwrap() = Some(request.json_mode);

        match &self.reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::Fail { status } => Err(LlmError::Api {
                status: *status,
                message: "stubbed provider failure".to_string(),
            }),
        }
    }
}
