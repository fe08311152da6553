use crate::configuration::{ClaudeSettings, RbacSettings};

/// Shared application state. Agents are built per request from these
/// settings, so the state itself stays cheap to clone and holds nothing
/// mutable.
#[derive(Clone)]
pub struct AppState {
    pub claude: ClaudeSettings,
    pub rbac: RbacSettings,
}
