//! Minimal client for the Ollama generate API (non-streaming only).

use crate::error::RelayError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const GENERATE_PATH: &str = "/api/generate";

#[derive(Clone)]
pub struct OllamaClient {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

/// Single JSON object returned for a non-streaming generate call. Ollama
/// sends more fields (model, timings, context) that we don't need.
#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub response: Option<String>,
}

impl OllamaClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST /api/generate with `stream: false`; one JSON object back.
    pub async fn generate(
        &self,
        model: &str,
        prompt: &str,
    ) -> Result<GenerateResponse, RelayError> {
        let url = format!("{}{GENERATE_PATH}", self.base_url);
        let body = GenerateRequest {
            model,
            prompt,
            stream: false,
        };

        let res = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    RelayError::Connection {
                        host: self.base_url.clone(),
                        source: e,
                    }
                } else {
                    RelayError::Unexpected(e.to_string())
                }
            })?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(RelayError::Server { status, body });
        }

        res.json()
            .await
            .map_err(|e| RelayError::Unexpected(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_with_stream_false() {
        let request = GenerateRequest {
            model: "llama3",
            prompt: "Say hi",
            stream: false,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"model": "llama3", "prompt": "Say hi", "stream": false})
        );
    }

    #[test]
    fn response_parses_with_extra_fields() {
        let json = r#"{"model":"llama3","created_at":"2024-01-01T00:00:00Z","response":"Hello!","done":true}"#;
        let parsed: GenerateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.response.as_deref(), Some("Hello!"));
    }

    #[test]
    fn response_field_may_be_absent() {
        let parsed: GenerateResponse = serde_json::from_str(r#"{"done":true}"#).unwrap();
        assert!(parsed.response.is_none());
    }

    #[test]
    fn base_url_is_normalized() {
        let client = OllamaClient::new("http://localhost:11434/", Duration::from_secs(5));
        assert_eq!(client.base_url(), "http://localhost:11434");
    }
}
