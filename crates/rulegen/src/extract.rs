use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

lazy_static! {
    static ref JSON_FENCE: Regex = Regex::new(r"(?s)```json\s*(.*?)\s*```").unwrap();
}

/// The structured output of a run: a parsed JSON rule when the model
/// produced one, or the raw text as a degraded result. Callers must branch
/// on the variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RuleOutput {
    Json(Value),
    Text(String),
}

/// Extract the generated rule from the model's final text. A fenced
/// ```json block wins if present; otherwise the whole text is parsed
/// directly. If the chosen candidate is not valid JSON the original text is
/// returned unchanged.
pub fn extract_rule_output(text: &str) -> RuleOutput {
    let candidate = match JSON_FENCE.captures(text) {
        Some(caps) => caps.get(1).map(|m| m.as_str()).unwrap_or_default(),
        None => text.trim(),
    };

    match serde_json::from_str(candidate) {
        Ok(value) => RuleOutput::Json(value),
        Err(_) => RuleOutput::Text(text.to_string()),
    }
}
