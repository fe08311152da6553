use anyhow::Result;
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;

use super::registry::ToolHandler;
use crate::errors::ToolResult;
use crate::models::tool::Tool;

// Keep at most this many rules in a tool result to bound prompt size
const MAX_RETURNED_RULES: usize = 20;

/// Endpoint and bearer token for the RBAC policies API
#[derive(Debug, Clone)]
pub struct RbacApiConfig {
    pub endpoint: String,
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RbacRule {
    pub rule_id: i64,
    pub name: String,
    pub description: String,
    pub target: String,
    pub condition: String,
    #[serde(rename = "type")]
    pub rule_type: String,
    pub overridable: String,
    pub hybrid: String,
}

/// Fetches existing RBAC rules from the policies API so the model has real
/// rules as context before generating a new one. Fetch and decode failures
/// are reported as an error payload in the tool result rather than an
/// execution error, so the model can apologize or proceed without context.
pub struct RbacRulesTool {
    client: Client,
    config: RbacApiConfig,
}

impl RbacRulesTool {
    pub fn new(config: RbacApiConfig) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self { client, config })
    }

    async fn fetch_rules(&self) -> Result<Vec<RbacRule>, String> {
        let response = self
            .client
            .get(&self.config.endpoint)
            .header(AUTHORIZATION, format!("Bearer {}", self.config.token))
            .send()
            .await
            .map_err(|e| format!("Error fetching RBAC rules: {e}"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("Failed to fetch RBAC rules: {status}"));
        }

        response
            .json()
            .await
            .map_err(|e| format!("Error fetching RBAC rules: {e}"))
    }
}

#[async_trait]
impl ToolHandler for RbacRulesTool {
    fn descriptor(&self) -> Tool {
        Tool::new(
            "fetch_rbac_rules",
            "Fetches existing RBAC (Role-Based Access Control) rules from the policies API. \
             Use this tool to get context about existing rules before generating new ones. \
             You can optionally filter rules by keywords like country codes (SG, HK), segments \
             (PB, RETAIL, TREASURES), APIs (MONEY_TRANSFER, CLIENT_EXCHANGE), or user types.",
            json!({
                "type": "object",
                "properties": {
                    "filter": {
                        "type": "string",
                        "description": "Optional filter keyword to search rules (e.g., 'MONEY_TRANSFER', 'SG', 'PB')"
                    }
                },
                "required": []
            }),
        )
    }

    async fn call(&self, arguments: Value) -> ToolResult<String> {
        let mut rules = match self.fetch_rules().await {
            Ok(rules) => rules,
            Err(message) => return Ok(json!({"error": message}).to_string()),
        };

        if let Some(filter) = arguments.get("filter").and_then(|f| f.as_str()) {
            let needle = filter.to_lowercase();
            rules.retain(|rule| {
                rule.name.to_lowercase().contains(&needle)
                    || rule.description.to_lowercase().contains(&needle)
                    || rule.target.to_lowercase().contains(&needle)
            });
        }

        let total = rules.len();
        rules.truncate(MAX_RETURNED_RULES);

        Ok(json!({
            "totalRules": total,
            "returnedRules": rules.len(),
            "rules": rules,
        })
        .to_string())
    }
}
