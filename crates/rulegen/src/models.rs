//! These models represent the objects passed around by the agent.
//!
//! The internal message format is close to, but not identical with, the
//! Claude messages wire format: tool requests and tool results are kept as
//! typed variants carrying a `Result`, and only flattened into content
//! blocks when a provider encodes them for the API.
pub mod message;
pub mod role;
pub mod tool;
