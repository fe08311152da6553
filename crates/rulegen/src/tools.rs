pub mod rbac;
pub mod registry;
pub mod weather;

pub use registry::{ToolHandler, ToolRegistry};
