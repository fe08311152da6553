use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::Value;

use crate::errors::{ToolError, ToolResult};
use crate::models::tool::{Tool, ToolCall};

/// A tool the agent can execute on behalf of the model
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// The descriptor advertised to the model
    fn descriptor(&self) -> Tool;

    /// Execute the tool with already-validated arguments, returning a string
    /// result that is fed back into the conversation
    async fn call(&self, arguments: Value) -> ToolResult<String>;
}

/// An ordered set of tools with unique names, registered once per agent run
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Box<dyn ToolHandler>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. Names must be unique within the registry.
    pub fn register(&mut self, tool: Box<dyn ToolHandler>) -> Result<()> {
        let name = tool.descriptor().name;
        if self.tools.iter().any(|t| t.descriptor().name == name) {
            return Err(anyhow!("Duplicate tool name: {}", name));
        }
        self.tools.push(tool);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Descriptors for all registered tools, in registration order
    pub fn descriptors(&self) -> Vec<Tool> {
        self.tools.iter().map(|tool| tool.descriptor()).collect()
    }

    /// Resolve and execute a tool call requested by the model. Arguments are
    /// validated against the tool's declared input schema before the handler
    /// runs, so a handler never sees malformed input.
    pub async fn dispatch(&self, call: &ToolCall) -> ToolResult<String> {
        let handler = self
            .tools
            .iter()
            .find(|tool| tool.descriptor().name == call.name)
            .ok_or_else(|| ToolError::NotFound(call.name.clone()))?;

        validate_arguments(&handler.descriptor().input_schema, &call.arguments)?;
        handler.call(call.arguments.clone()).await
    }
}

/// Check tool arguments against a JSON-schema-like descriptor: required
/// fields must be present, provided keys must be declared, and primitive
/// types must match when the schema names one.
pub fn validate_arguments(schema: &Value, arguments: &Value) -> ToolResult<()> {
    let args = arguments
        .as_object()
        .ok_or_else(|| ToolError::InvalidParameters("arguments must be an object".to_string()))?;

    if let Some(required) = schema.get("required").and_then(|r| r.as_array()) {
        for field in required.iter().filter_map(|f| f.as_str()) {
            if !args.contains_key(field) {
                return Err(ToolError::InvalidParameters(format!(
                    "missing required field '{field}'"
                )));
            }
        }
    }

    if let Some(properties) = schema.get("properties").and_then(|p| p.as_object()) {
        for (key, value) in args {
            let Some(property) = properties.get(key) else {
                return Err(ToolError::InvalidParameters(format!(
                    "unknown field '{key}'"
                )));
            };
            if let Some(expected) = property.get("type").and_then(|t| t.as_str()) {
                let matches = match expected {
                    "string" => value.is_string(),
                    "number" => value.is_number(),
                    "integer" => value.is_i64() || value.is_u64(),
                    "boolean" => value.is_boolean(),
                    "array" => value.is_array(),
                    "object" => value.is_object(),
                    _ => true,
                };
                if !matches {
                    return Err(ToolError::InvalidParameters(format!(
                        "field '{key}' must be of type {expected}"
                    )));
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct EchoTool;

    #[async_trait]
    impl ToolHandler for EchoTool {
        fn descriptor(&self) -> Tool {
            Tool::new(
                "echo",
                "Echoes back the input",
                json!({
                    "type": "object",
                    "properties": {"message": {"type": "string"}},
                    "required": ["message"]
                }),
            )
        }

        async fn call(&self, arguments: Value) -> ToolResult<String> {
            Ok(arguments["message"].as_str().unwrap_or("").to_string())
        }
    }

    fn registry_with_echo() -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool)).unwrap();
        registry
    }

    #[tokio::test]
    async fn test_dispatch_known_tool() {
        let registry = registry_with_echo();
        let result = registry
            .dispatch(&ToolCall::new("echo", json!({"message": "hello"})))
            .await
            .unwrap();
        assert_eq!(result, "hello");
    }

    #[tokio::test]
    async fn test_dispatch_unknown_tool() {
        let registry = registry_with_echo();
        let err = registry
            .dispatch(&ToolCall::new("nope", json!({})))
            .await
            .unwrap_err();
        assert_eq!(err, ToolError::NotFound("nope".to_string()));
    }

    #[tokio::test]
    async fn test_dispatch_missing_required_field() {
        let registry = registry_with_echo();
        let err = registry
            .dispatch(&ToolCall::new("echo", json!({})))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidParameters(_)));
    }

    #[tokio::test]
    async fn test_dispatch_wrong_type() {
        let registry = registry_with_echo();
        let err = registry
            .dispatch(&ToolCall::new("echo", json!({"message": 42})))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidParameters(_)));
    }

    #[tokio::test]
    async fn test_dispatch_unknown_field() {
        let registry = registry_with_echo();
        let err = registry
            .dispatch(&ToolCall::new("echo", json!({"message": "hi", "volume": 11})))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidParameters(_)));
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = registry_with_echo();
        assert!(registry.register(Box::new(EchoTool)).is_err());
    }

    #[test]
    fn test_descriptors_in_registration_order() {
        let registry = registry_with_echo();
        let descriptors = registry.descriptors();
        assert_eq!(descriptors.len(), 1);
        assert_eq!(descriptors[0].name, "echo");
    }
}
