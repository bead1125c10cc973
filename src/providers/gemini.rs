//! Gemini generateContent client implementing the core's [`ModelClient`]
//! seam.
//!
//! One request per query, no retries: retry policy (e.g. re-querying on
//! an invalid JSON reply) belongs to the caller.

use crate::config::ModelConfig;
use anyhow::Result;
use async_trait::async_trait;
use macroplan_core::{MacroPlanError, MacroPlanResult, ModelClient};
use serde_json::Value;
use std::time::Duration;

/// Request timeout for a single generateContent call
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

pub struct GeminiClient {
    model: String,
    api_key: String,
    base_url: String,
    http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: &ModelConfig) -> Result<Self> {
        let api_key = config.resolve_api_key()?;

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(GeminiClient {
            model: config.name.clone(),
            api_key,
            base_url: config.base_url.clone(),
            http,
        })
    }
}

#[async_trait]
impl ModelClient for GeminiClient {
    async fn query(&self, prompt: &str) -> MacroPlanResult<Value> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| MacroPlanError::Model(format!("Request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MacroPlanError::Model(format!(
                "Gemini API returned {status}"
            )));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| MacroPlanError::Model(format!("Unreadable response body: {e}")))?;

        let text = candidate_text(&payload).ok_or_else(|| {
            MacroPlanError::Model("Response has no candidate text".to_string())
        })?;

        parse_model_json(text)
    }
}

/// Pull the first candidate's text out of a generateContent response.
fn candidate_text(payload: &Value) -> Option<&str> {
    payload
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .get(0)?
        .get("text")?
        .as_str()
}

/// Parse the model's reply as JSON, tolerating a markdown code fence
/// around the object.
fn parse_model_json(text: &str) -> MacroPlanResult<Value> {
    let body = strip_code_fence(text.trim());
    serde_json::from_str(body).map_err(|_| MacroPlanError::Model("Invalid AI response".to_string()))
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };

    // Drop the info string (e.g. "json") on the opening fence line
    let rest = match rest.split_once('\n') {
        Some((_, body)) => body,
        None => rest,
    };

    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_candidate_text_extraction() {
        let payload = json!({
            "candidates": [{
                "content": {
                    "parts": [{ "text": "{\"calories\": 500}" }],
                    "role": "model"
                },
                "finishReason": "STOP"
            }]
        });

        assert_eq!(candidate_text(&payload), Some("{\"calories\": 500}"));
    }

    #[test]
    fn test_candidate_text_missing() {
        assert_eq!(candidate_text(&json!({"candidates": []})), None);
        assert_eq!(candidate_text(&json!({})), None);
    }

    #[test]
    fn test_parse_plain_json_reply() {
        let value = parse_model_json("{\"calories\": 500}").unwrap();
        assert_eq!(value["calories"], 500);
    }

    #[test]
    fn test_parse_fenced_json_reply() {
        let reply = "```json\n{\"calories\": 500, \"protein\": 30}\n```";
        let value = parse_model_json(reply).unwrap();
        assert_eq!(value["protein"], 30);
    }

    #[test]
    fn test_parse_fence_without_info_string() {
        let reply = "```\n{\"fat\": 10}\n```";
        let value = parse_model_json(reply).unwrap();
        assert_eq!(value["fat"], 10);
    }

    #[test]
    fn test_non_json_reply_is_model_error() {
        let err = parse_model_json("Sure! Here is your meal plan:").unwrap_err();
        assert!(matches!(err, MacroPlanError::Model(_)));
    }
}
