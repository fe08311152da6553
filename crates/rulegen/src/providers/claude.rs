use anyhow::Result;
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

use super::base::{Completion, Provider, StopReason, Usage};
use super::configs::ClaudeProviderConfig;
use crate::errors::ProviderError;
use crate::models::message::{Message, MessageContent};
use crate::models::tool::{Tool, ToolCall};

pub struct ClaudeProvider {
    client: Client,
    config: ClaudeProviderConfig,
}

impl ClaudeProvider {
    pub fn new(config: ClaudeProviderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(600)) // 10 minutes timeout
            .build()?;

        Ok(Self { client, config })
    }

    async fn post(&self, payload: Value) -> Result<Value, ProviderError> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .header(
                AUTHORIZATION,
                format!("Bearer {}", self.config.bearer_token),
            )
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Transport {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ProviderError::Protocol(format!("response body is not JSON: {e}")))
    }
}

/// Convert internal messages to the Claude content-block format. The system
/// prompt is not part of this array; it travels as a top-level field.
pub fn messages_to_claude_spec(messages: &[Message]) -> Vec<Value> {
    let mut messages_spec = Vec::new();

    for message in messages {
        let mut content = Vec::new();

        for msg_content in &message.content {
            match msg_content {
                MessageContent::Text(text) => {
                    if !text.is_empty() {
                        content.push(json!({"type": "text", "text": text}));
                    }
                }
                MessageContent::ToolRequest(request) => match &request.tool_call {
                    Ok(tool_call) => {
                        content.push(json!({
                            "type": "tool_use",
                            "id": request.id,
                            "name": tool_call.name,
                            "input": tool_call.arguments,
                        }));
                    }
                    Err(e) => {
                        content.push(json!({"type": "text", "text": format!("Error: {e}")}));
                    }
                },
                MessageContent::ToolResponse(response) => {
                    // A tool error is rendered as the result content so the
                    // model can interpret the failure and adapt
                    let result_text = match &response.tool_result {
                        Ok(output) => output.clone(),
                        Err(e) => {
                            format!("The tool call returned the following error:\n{e}")
                        }
                    };
                    content.push(json!({
                        "type": "tool_result",
                        "tool_use_id": response.id,
                        "content": result_text,
                    }));
                }
            }
        }

        if !content.is_empty() {
            messages_spec.push(json!({
                "role": message.role,
                "content": content,
            }));
        }
    }

    messages_spec
}

/// Convert internal Tool descriptors to the Claude tool specification
pub fn tools_to_claude_spec(tools: &[Tool]) -> Vec<Value> {
    tools
        .iter()
        .map(|tool| {
            json!({
                "name": tool.name,
                "description": tool.description,
                "input_schema": tool.input_schema,
            })
        })
        .collect()
}

/// Parse a Claude messages API response into a normalized Completion.
/// Text blocks are kept in order; every tool_use block must carry a
/// non-null id, name and input.
pub fn claude_response_to_completion(data: Value) -> Result<Completion, ProviderError> {
    let blocks = data
        .get("content")
        .and_then(|c| c.as_array())
        .ok_or_else(|| ProviderError::Protocol("missing content array".to_string()))?;

    let mut message = Message::assistant();
    for block in blocks {
        match block.get("type").and_then(|t| t.as_str()) {
            Some("text") => {
                let text = block
                    .get("text")
                    .and_then(|t| t.as_str())
                    .ok_or_else(|| ProviderError::Protocol("text block missing text".to_string()))?;
                message = message.with_text(text);
            }
            Some("tool_use") => {
                let id = block
                    .get("id")
                    .and_then(|v| v.as_str())
                    .ok_or_else(|| {
                        ProviderError::Protocol("tool_use block missing id".to_string())
                    })?;
                let name = block
                    .get("name")
                    .and_then(|v| v.as_str())
                    .ok_or_else(|| {
                        ProviderError::Protocol("tool_use block missing name".to_string())
                    })?;
                let input = block
                    .get("input")
                    .filter(|v| !v.is_null())
                    .cloned()
                    .ok_or_else(|| {
                        ProviderError::Protocol("tool_use block missing input".to_string())
                    })?;
                message = message.with_tool_request(id, Ok(ToolCall::new(name, input)));
            }
            _ => {} // Skip unknown block types
        }
    }

    let stop_reason = data
        .get("stop_reason")
        .and_then(|v| v.as_str())
        .map(StopReason::from_wire)
        .unwrap_or(StopReason::Other);

    let usage = Usage::new(
        data.pointer("/usage/input_tokens")
            .and_then(|v| v.as_i64())
            .map(|v| v as i32),
        data.pointer("/usage/output_tokens")
            .and_then(|v| v.as_i64())
            .map(|v| v as i32),
        None,
    );

    Ok(Completion {
        message,
        stop_reason,
        usage,
    })
}

#[async_trait]
impl Provider for ClaudeProvider {
    async fn complete(
        &self,
        system: &str,
        messages: &[Message],
        tools: &[Tool],
    ) -> Result<Completion, ProviderError> {
        let mut payload = json!({
            "anthropic_version": self.config.anthropic_version,
            "messages": messages_to_claude_spec(messages),
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
        });

        if !system.is_empty() {
            payload["system"] = json!(system);
        }

        if !tools.is_empty() {
            payload["tools"] = json!(tools_to_claude_spec(tools));
        }

        let response = self.post(payload).await?;
        claude_response_to_completion(response)
    }
}
