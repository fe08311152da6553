use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while resolving or executing a tool call. These are
/// recoverable: the agent loop feeds them back into the conversation as a
/// tool result so the model can see and react to the failure.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Deserialize, Serialize)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Tool execution failed: {0}")]
    ExecutionError(String),
}

pub type ToolResult<T> = Result<T, ToolError>;

/// Errors raised by the chat transport. These are unrecoverable mid-run and
/// propagate to the caller as a failed run.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("chat endpoint returned status {status}: {body}")]
    Transport { status: u16, body: String },

    #[error("malformed chat response: {0}")]
    Protocol(String),

    #[error(transparent)]
    Network(#[from] reqwest::Error),
}

#[derive(Error, Debug)]
pub enum AgentError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("agent run cancelled")]
    Cancelled,
}
