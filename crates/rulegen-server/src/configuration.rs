use crate::error::{to_env_var, ConfigError};
use config::{Config, Environment};
use serde::Deserialize;
use std::net::SocketAddr;

#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerSettings {
    pub fn socket_addr(&self) -> SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Failed to parse socket address")
    }
}

/// Connection settings for the hosted Claude chat endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ClaudeSettings {
    pub endpoint: String,
    pub bearer_token: String,
    #[serde(default = "default_anthropic_version")]
    pub anthropic_version: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: i32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

/// Connection settings for the RBAC policies API the fetch tool reads from
#[derive(Debug, Clone, Deserialize)]
pub struct RbacSettings {
    pub endpoint: String,
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub claude: ClaudeSettings,
    pub rbac: RbacSettings,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::load_and_validate()
    }

    fn load_and_validate() -> Result<Self, ConfigError> {
        // Start with default configuration
        let config = Config::builder()
            // Server defaults
            .set_default("server.host", default_host())?
            .set_default("server.port", default_port() as i64)?
            // Model defaults; rule generation runs cooler than plain chat
            .set_default("claude.anthropic_version", default_anthropic_version())?
            .set_default("claude.max_tokens", default_max_tokens() as i64)?
            .set_default("claude.temperature", default_temperature() as f64)?
            // Layer on the environment variables
            .add_source(
                Environment::with_prefix("RULEGEN")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let result: Result<Self, config::ConfigError> = config.try_deserialize();

        // Report missing required settings as the env var the operator must set
        match result {
            Ok(settings) => Ok(settings),
            Err(err) => {
                tracing::debug!("Configuration error: {:?}", &err);

                let error_str = err.to_string();
                if error_str.starts_with("missing field") {
                    let field = error_str
                        .trim_start_matches("missing field `")
                        .trim_end_matches("`");
                    Err(ConfigError::MissingEnvVar {
                        env_var: to_env_var(field),
                    })
                } else if let config::ConfigError::NotFound(field) = &err {
                    Err(ConfigError::MissingEnvVar {
                        env_var: to_env_var(field),
                    })
                } else {
                    Err(ConfigError::Other(err))
                }
            }
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_anthropic_version() -> String {
    "vertex-2023-10-16".to_string()
}

fn default_max_tokens() -> i32 {
    4096
}

fn default_temperature() -> f32 {
    0.3
}
