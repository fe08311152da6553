use super::role::Role;
use super::tool::ToolCall;
use crate::errors::ToolResult;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A tool invocation the model asked for, correlated by `id`. The call is a
/// `Result` so that a malformed request from the model stays in history and
/// its error can be surfaced back on the next turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolRequest {
    pub id: String,
    pub tool_call: ToolResult<ToolCall>,
}

/// The outcome of executing a tool call, echoing the request `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResponse {
    pub id: String,
    pub tool_result: ToolResult<String>,
}

/// Content passed inside a message, which can be plain text or tool content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MessageContent {
    Text(String),
    ToolRequest(ToolRequest),
    ToolResponse(ToolResponse),
}

impl MessageContent {
    pub fn text<S: Into<String>>(text: S) -> Self {
        MessageContent::Text(text.into())
    }

    pub fn tool_request<S: Into<String>>(id: S, tool_call: ToolResult<ToolCall>) -> Self {
        MessageContent::ToolRequest(ToolRequest {
            id: id.into(),
            tool_call,
        })
    }

    pub fn tool_response<S: Into<String>>(id: S, tool_result: ToolResult<String>) -> Self {
        MessageContent::ToolResponse(ToolResponse {
            id: id.into(),
            tool_result,
        })
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            MessageContent::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_tool_request(&self) -> Option<&ToolRequest> {
        if let MessageContent::ToolRequest(ref tool_request) = self {
            Some(tool_request)
        } else {
            None
        }
    }

    pub fn as_tool_response(&self) -> Option<&ToolResponse> {
        if let MessageContent::ToolResponse(ref tool_response) = self {
            Some(tool_response)
        } else {
            None
        }
    }
}

/// A message to or from the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub created: i64,
    pub content: Vec<MessageContent>,
}

impl Message {
    /// Create a new user message with the current timestamp
    pub fn user() -> Self {
        Message {
            role: Role::User,
            created: Utc::now().timestamp(),
            content: Vec::new(),
        }
    }

    /// Create a new assistant message with the current timestamp
    pub fn assistant() -> Self {
        Message {
            role: Role::Assistant,
            created: Utc::now().timestamp(),
            content: Vec::new(),
        }
    }

    pub fn with_content(mut self, content: MessageContent) -> Self {
        self.content.push(content);
        self
    }

    pub fn with_text<S: Into<String>>(self, text: S) -> Self {
        self.with_content(MessageContent::text(text))
    }

    pub fn with_tool_request<S: Into<String>>(
        self,
        id: S,
        tool_call: ToolResult<ToolCall>,
    ) -> Self {
        self.with_content(MessageContent::tool_request(id, tool_call))
    }

    pub fn with_tool_response<S: Into<String>>(
        self,
        id: S,
        tool_result: ToolResult<String>,
    ) -> Self {
        self.with_content(MessageContent::tool_response(id, tool_result))
    }

    /// All tool requests carried by this message, in content order
    pub fn tool_requests(&self) -> Vec<&ToolRequest> {
        self.content
            .iter()
            .filter_map(|content| content.as_tool_request())
            .collect()
    }

    /// Concatenation of all text content, in content order
    pub fn concat_text(&self) -> String {
        self.content
            .iter()
            .filter_map(|content| content.as_text())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builders_preserve_content_order() {
        let message = Message::assistant()
            .with_text("Looking that up.")
            .with_tool_request("call_1", Ok(ToolCall::new("get_weather", json!({"city": "Tokyo"}))))
            .with_text(" One moment.");

        assert_eq!(message.role, Role::Assistant);
        assert_eq!(message.content.len(), 3);
        assert_eq!(message.concat_text(), "Looking that up. One moment.");

        let requests = message.tool_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].id, "call_1");
    }

    #[test]
    fn tool_response_echoes_request_id() {
        let message = Message::user().with_tool_response("call_1", Ok("{}".to_string()));
        let response = message.content[0].as_tool_response().unwrap();
        assert_eq!(response.id, "call_1");
        assert_eq!(response.tool_result.as_deref(), Ok("{}"));
    }

    #[test]
    fn message_round_trips_through_serde() {
        let message = Message::assistant()
            .with_tool_request("1", Ok(ToolCall::new("fetch_rbac_rules", json!({"filter": "SG"}))));
        let serialized = serde_json::to_string(&message).unwrap();
        let deserialized: Message = serde_json::from_str(&serialized).unwrap();
        assert_eq!(message, deserialized);
    }
}
