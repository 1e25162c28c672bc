// SPDX-FileCopyrightText: 2026 Wabot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the OpenAI chat completions endpoint.
//!
//! One request/response call per `.ai` invocation: a system prompt, the
//! user's question, and the configured model identifier. Failures surface
//! as [`WabotError::Upstream`] with the API's error message; the caller
//! decides what (if anything) the requester gets to see.

use reqwest::header::{HeaderMap, HeaderValue};
use tracing::debug;

use wabot_config::model::AiConfig;
use wabot_core::WabotError;

use crate::types::{ApiErrorResponse, ChatMessage, ChatRequest, ChatResponse};

/// System prompt sent with every completion request.
const SYSTEM_PROMPT: &str = "Kamu adalah asisten AI yang membantu user.";

/// HTTP client for the AI completion endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    model: String,
    base_url: String,
}

impl OpenAiClient {
    /// Creates a new client from configuration.
    ///
    /// Requires `config.api_key` to be set.
    pub fn new(config: &AiConfig) -> Result<Self, WabotError> {
        let api_key = config
            .api_key
            .as_deref()
            .ok_or_else(|| WabotError::Config("ai.api_key is required for the .ai command".into()))?;

        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| WabotError::Config(format!("invalid API key header value: {e}")))?;
        auth.set_sensitive(true);
        headers.insert("authorization", auth);
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| WabotError::Upstream {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            model: config.model.clone(),
            base_url: config.base_url.clone(),
        })
    }

    /// Returns the configured model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends one prompt and returns the generated text.
    pub async fn ask(&self, prompt: &str) -> Result<String, WabotError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".into(),
                    content: SYSTEM_PROMPT.into(),
                },
                ChatMessage {
                    role: "user".into(),
                    content: prompt.into(),
                },
            ],
        };

        let response = self
            .client
            .post(&self.base_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| WabotError::Upstream {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, "completion response received");

        let body = response.text().await.map_err(|e| WabotError::Upstream {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_err) => format!("AI API error: {}", api_err.error.message),
                Err(_) => format!("AI API returned {status}: {body}"),
            };
            return Err(WabotError::Upstream {
                message,
                source: None,
            });
        }

        let parsed: ChatResponse =
            serde_json::from_str(&body).map_err(|e| WabotError::Upstream {
                message: format!("failed to parse API response: {e}"),
                source: Some(Box::new(e)),
            })?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| WabotError::Upstream {
                message: "AI API response contained no choices".into(),
                source: None,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> OpenAiClient {
        OpenAiClient::new(&AiConfig {
            api_key: Some("sk-test".into()),
            model: "gpt-4o-mini".into(),
            base_url: base_url.to_string(),
        })
        .unwrap()
    }

    #[test]
    fn new_requires_api_key() {
        let config = AiConfig {
            api_key: None,
            ..AiConfig::default()
        };
        assert!(OpenAiClient::new(&config).is_err());
    }

    #[tokio::test]
    async fn ask_returns_first_choice_content() {
        let server = MockServer::start().await;

        let response_body = serde_json::json!({
            "choices": [
                {"message": {"role": "assistant", "content": "A black hole is..."}}
            ]
        });

        Mock::given(method("POST"))
            .and(path("/"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(serde_json::json!({
                "model": "gpt-4o-mini",
                "messages": [
                    {"role": "system", "content": "Kamu adalah asisten AI yang membantu user."},
                    {"role": "user", "content": "apa itu black hole?"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let answer = client.ask("apa itu black hole?").await.unwrap();
        assert_eq!(answer, "A black hole is...");
    }

    #[tokio::test]
    async fn ask_surfaces_api_error_message() {
        let server = MockServer::start().await;

        let error_body = serde_json::json!({
            "error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}
        });

        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(401).set_body_json(&error_body))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.ask("hi").await.unwrap_err();
        assert!(err.to_string().contains("Incorrect API key"), "got: {err}");
    }

    #[tokio::test]
    async fn ask_fails_on_empty_choices() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})),
            )
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.ask("hi").await.unwrap_err();
        assert!(err.to_string().contains("no choices"), "got: {err}");
    }
}
