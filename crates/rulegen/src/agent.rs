use std::future::Future;

use crate::errors::AgentError;
use crate::models::message::Message;
use crate::providers::base::Provider;
use crate::tools::ToolRegistry;

pub const DEFAULT_MAX_ITERATIONS: usize = 5;

/// Outcome of one agent run
#[derive(Debug, Clone, PartialEq)]
pub struct AgentRunResult {
    pub final_text: String,
    pub iterations_used: usize,
}

/// Drives a single sequential conversation: send history to the provider,
/// execute any tool calls the model requested, feed the results back, and
/// stop once the model answers without tools or the iteration cap is hit.
///
/// Each run owns its own message history; the history is discarded when the
/// run ends. An `Agent` holds no per-run state, so one instance can serve
/// concurrent runs.
pub struct Agent {
    provider: Box<dyn Provider>,
    registry: ToolRegistry,
    max_iterations: usize,
}

impl Agent {
    pub fn new(provider: Box<dyn Provider>, registry: ToolRegistry) -> Self {
        Self {
            provider,
            registry,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        debug_assert!(max_iterations > 0);
        self.max_iterations = max_iterations;
        self
    }

    /// Run the loop to completion for one user input.
    ///
    /// On reaching the iteration cap the run ends successfully with the last
    /// text the model produced (possibly empty) rather than failing; callers
    /// can detect the cutoff through `iterations_used`.
    pub async fn run(
        &self,
        system_prompt: &str,
        user_input: &str,
    ) -> Result<AgentRunResult, AgentError> {
        let tools = self.registry.descriptors();
        let mut messages = vec![Message::user().with_text(user_input)];
        let mut iterations = 0;

        loop {
            let completion = self
                .provider
                .complete(system_prompt, &messages, &tools)
                .await?;
            iterations += 1;

            let response = completion.message;
            let text = response.concat_text();

            let requests: Vec<_> = response
                .tool_requests()
                .into_iter()
                .cloned()
                .collect();
            if requests.is_empty() {
                return Ok(AgentRunResult {
                    final_text: text,
                    iterations_used: iterations,
                });
            }

            messages.push(response);

            // One tool-result message answering every request from this turn,
            // in the original call order. Tool failures stay in the
            // conversation as results the model can react to.
            let mut tool_results = Message::user();
            for request in requests {
                let output = match request.tool_call {
                    Ok(call) => self.registry.dispatch(&call).await,
                    Err(e) => Err(e),
                };
                tool_results = tool_results.with_tool_response(request.id, output);
            }
            messages.push(tool_results);

            if iterations >= self.max_iterations {
                return Ok(AgentRunResult {
                    final_text: text,
                    iterations_used: iterations,
                });
            }
        }
    }

    /// Like [`run`](Self::run), but aborts with `AgentError::Cancelled` as
    /// soon as the supplied future resolves.
    pub async fn run_with_cancel(
        &self,
        system_prompt: &str,
        user_input: &str,
        cancel: impl Future<Output = ()> + Send,
    ) -> Result<AgentRunResult, AgentError> {
        tokio::select! {
            result = self.run(system_prompt, user_input) => result,
            _ = cancel => Err(AgentError::Cancelled),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tool::ToolCall;
    use crate::prompts::DEFAULT_SYSTEM_PROMPT;
    use crate::providers::mock::MockProvider;
    use crate::tools::weather::WeatherTool;
    use serde_json::json;

    fn weather_registry() -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(WeatherTool)).unwrap();
        registry
    }

    #[tokio::test]
    async fn test_plain_chat_single_dispatch() {
        // No tools configured: one dispatch, final text straight through
        let provider = MockProvider::new(vec![
            Message::assistant().with_text("The capital of France is Paris."),
        ]);
        let agent = Agent::new(Box::new(provider), ToolRegistry::new());

        let result = agent
            .run(DEFAULT_SYSTEM_PROMPT, "What is the capital of France?")
            .await
            .unwrap();

        assert_eq!(result.final_text, "The capital of France is Paris.");
        assert_eq!(result.iterations_used, 1);
    }

    #[tokio::test]
    async fn test_weather_tool_round_trip() {
        let provider = MockProvider::new(vec![
            Message::assistant().with_tool_request(
                "toolu_1",
                Ok(ToolCall::new("get_weather", json!({"city": "Tokyo"}))),
            ),
            Message::assistant().with_text("It's 68°F and partly cloudy in Tokyo."),
        ]);
        let agent = Agent::new(Box::new(provider), weather_registry());

        let result = agent
            .run(DEFAULT_SYSTEM_PROMPT, "What's the weather in Tokyo?")
            .await
            .unwrap();

        assert_eq!(result.final_text, "It's 68°F and partly cloudy in Tokyo.");
        assert_eq!(result.iterations_used, 2);
    }

    #[tokio::test]
    async fn test_unknown_tool_is_recovered() {
        // A bad tool name must flow back into the conversation, not abort
        let provider = MockProvider::new(vec![
            Message::assistant()
                .with_tool_request("toolu_1", Ok(ToolCall::new("invalid_tool", json!({})))),
            Message::assistant().with_text("Sorry, I could not look that up."),
        ]);
        let agent = Agent::new(Box::new(provider), weather_registry());

        let result = agent.run("", "weather?").await.unwrap();
        assert_eq!(result.final_text, "Sorry, I could not look that up.");
    }

    #[tokio::test]
    async fn test_iteration_cap_returns_last_text() {
        // A model that always asks for a tool: max_iterations = 1 means
        // exactly one dispatch and one tool phase, then a clean cutoff
        let provider = MockProvider::new(vec![
            Message::assistant()
                .with_text("Checking Tokyo.")
                .with_tool_request(
                    "toolu_1",
                    Ok(ToolCall::new("get_weather", json!({"city": "Tokyo"}))),
                ),
            Message::assistant().with_tool_request(
                "toolu_2",
                Ok(ToolCall::new("get_weather", json!({"city": "Paris"}))),
            ),
        ]);
        let agent = Agent::new(Box::new(provider), weather_registry()).with_max_iterations(1);

        let result = agent.run("", "weather everywhere").await.unwrap();
        assert_eq!(result.iterations_used, 1);
        assert_eq!(result.final_text, "Checking Tokyo.");
    }

    #[tokio::test]
    async fn test_multiple_tool_calls_in_one_turn() {
        let provider = MockProvider::new(vec![
            Message::assistant()
                .with_tool_request(
                    "toolu_1",
                    Ok(ToolCall::new("get_weather", json!({"city": "Tokyo"}))),
                )
                .with_tool_request(
                    "toolu_2",
                    Ok(ToolCall::new("get_weather", json!({"city": "Sydney"}))),
                ),
            Message::assistant().with_text("Both sunny enough."),
        ]);
        let agent = Agent::new(Box::new(provider), weather_registry());

        let result = agent.run("", "compare tokyo and sydney").await.unwrap();
        assert_eq!(result.final_text, "Both sunny enough.");
        assert_eq!(result.iterations_used, 2);
    }

    #[tokio::test]
    async fn test_cancellation() {
        use crate::errors::ProviderError;
        use crate::models::tool::Tool;
        use crate::providers::base::{Completion, Provider};
        use async_trait::async_trait;

        // A provider stuck on a network call that never resolves
        struct StalledProvider;

        #[async_trait]
        impl Provider for StalledProvider {
            async fn complete(
                &self,
                _system: &str,
                _messages: &[Message],
                _tools: &[Tool],
            ) -> Result<Completion, ProviderError> {
                std::future::pending().await
            }
        }

        let agent = Agent::new(Box::new(StalledProvider), ToolRegistry::new());
        let err = agent
            .run_with_cancel("", "hello", std::future::ready(()))
            .await
            .unwrap_err();
        assert!(matches!(err, AgentError::Cancelled));
    }

    #[tokio::test]
    async fn test_pending_cancel_does_not_fire() {
        let provider = MockProvider::new(vec![Message::assistant().with_text("hi")]);
        let agent = Agent::new(Box::new(provider), ToolRegistry::new());

        let result = agent
            .run_with_cancel("", "hello", std::future::pending())
            .await
            .unwrap();
        assert_eq!(result.final_text, "hi");
    }
}
