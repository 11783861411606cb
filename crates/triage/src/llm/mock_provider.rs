//! Scripted provider for exercising the classification path without a
//! network.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::TriageError;

use super::provider::CompletionProvider;

#[derive(Debug, Clone)]
pub enum ScriptedReply {
    /// A raw response envelope, handed back as-is.
    Envelope(Value),
    /// A request failure with the given description.
    Failure(String),
}

/// Replies are consumed front to back; once the script runs out, every
/// further call fails like a network error.
#[derive(Default)]
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<ScriptedReply>>,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn new(replies: Vec<ScriptedReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    async fn complete(
        &self,
        _system_prompt: &str,
        _user_payload: &Value,
    ) -> Result<Value, TriageError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let reply = self
            .replies
            .lock()
            .expect("scripted reply queue poisoned")
            .pop_front();

        match reply {
            Some(ScriptedReply::Envelope(envelope)) => Ok(envelope),
            Some(ScriptedReply::Failure(description)) => Err(TriageError::Request(description)),
            None => Err(TriageError::Request("reply script exhausted".to_string())),
        }
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

/// Wraps a classification object in a chat-completion envelope, the way the
/// live service answers.
pub fn chat_envelope(content: &Value) -> Value {
    serde_json::json!({
        "choices": [
            { "message": { "role": "assistant", "content": content.to_string() } }
        ]
    })
}
