use crate::state::AppState;
use anyhow::Result;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use rulegen::{
    agent::Agent,
    extract::extract_rule_output,
    prompts::RBAC_SYSTEM_PROMPT,
    providers::{claude::ClaudeProvider, configs::ClaudeProviderConfig},
    tools::{
        rbac::{RbacApiConfig, RbacRulesTool},
        ToolRegistry,
    },
};
use serde_json::{json, Value};

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/generate-rule", post(generate_rule))
        .with_state(state)
}

fn build_agent(state: &AppState, use_tools: bool) -> Result<Agent> {
    let provider = ClaudeProvider::new(ClaudeProviderConfig {
        endpoint: state.claude.endpoint.clone(),
        bearer_token: state.claude.bearer_token.clone(),
        anthropic_version: state.claude.anthropic_version.clone(),
        max_tokens: state.claude.max_tokens,
        temperature: state.claude.temperature,
    })?;

    let mut registry = ToolRegistry::new();
    if use_tools {
        registry.register(Box::new(RbacRulesTool::new(RbacApiConfig {
            endpoint: state.rbac.endpoint.clone(),
            token: state.rbac.token.clone(),
        })?))?;
    }

    Ok(Agent::new(Box::new(provider), registry))
}

async fn generate_rule(State(state): State<AppState>, Json(body): Json<Value>) -> Response {
    let Some(requirement) = body.get("requirement").and_then(|v| v.as_str()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "Missing or invalid 'requirement' field in request body"
            })),
        )
            .into_response();
    };
    let use_tools = body
        .get("useTools")
        .and_then(|v| v.as_bool())
        .unwrap_or(true);

    tracing::info!(requirement, use_tools, "generating RBAC rule");

    let agent = match build_agent(&state, use_tools) {
        Ok(agent) => agent,
        Err(e) => {
            tracing::error!("failed to build agent: {e}");
            return internal_error(&e.to_string());
        }
    };

    match agent.run(RBAC_SYSTEM_PROMPT, requirement).await {
        Ok(result) => {
            let generated_rule = extract_rule_output(&result.final_text);
            Json(json!({
                "success": true,
                "requirement": requirement,
                "generatedRule": generated_rule,
            }))
            .into_response()
        }
        Err(e) => {
            tracing::error!("error generating RBAC rule: {e}");
            internal_error(&e.to_string())
        }
    }
}

fn internal_error(details: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "Failed to generate RBAC rule",
            "details": details,
        })),
    )
        .into_response()
}
