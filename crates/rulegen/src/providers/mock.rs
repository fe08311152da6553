use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::errors::ProviderError;
use crate::models::message::Message;
use crate::models::tool::Tool;
use crate::providers::base::{Completion, Provider, StopReason, Usage};

/// A mock provider that returns pre-configured responses for testing
pub struct MockProvider {
    responses: Arc<Mutex<Vec<Message>>>,
    calls: Arc<Mutex<usize>>,
}

impl MockProvider {
    /// Create a new mock provider with a sequence of responses
    pub fn new(responses: Vec<Message>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    /// Number of completions requested so far
    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }

    fn completion_for(message: Message) -> Completion {
        let stop_reason = if message.tool_requests().is_empty() {
            StopReason::EndTurn
        } else {
            StopReason::ToolUse
        };
        Completion {
            message,
            stop_reason,
            usage: Usage::default(),
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn complete(
        &self,
        _system: &str,
        _messages: &[Message],
        _tools: &[Tool],
    ) -> Result<Completion, ProviderError> {
        *self.calls.lock().unwrap() += 1;
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            // Return empty response if no more pre-configured responses
            Ok(Self::completion_for(Message::assistant().with_text("")))
        } else {
            Ok(Self::completion_for(responses.remove(0)))
        }
    }
}
