/// Configuration for the hosted Claude chat endpoint. The endpoint is the
/// full URL of the messages API; authentication is a bearer token rather
/// than an api key header, matching gateway-fronted deployments.
#[derive(Debug, Clone)]
pub struct ClaudeProviderConfig {
    pub endpoint: String,
    pub bearer_token: String,
    pub anthropic_version: String,
    pub max_tokens: i32,
    pub temperature: f32,
}

impl ClaudeProviderConfig {
    pub fn new(endpoint: String, bearer_token: String) -> Self {
        Self {
            endpoint,
            bearer_token,
            anthropic_version: "vertex-2023-10-16".to_string(),
            max_tokens: 4096,
            temperature: 0.7,
        }
    }
}
