use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::structure::LlmConfig;

use super::context::ChatMessage;

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("completion backend unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),

    #[error("completion request timed out")]
    Timeout,

    #[error("completion backend returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("malformed completion response: {0}")]
    Malformed(String),
}

/// Seam between the turn handler and whatever produces replies, so tests
/// can script the backend.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, CompletionError>;
}

pub struct ClientSettings {
    pub temperature: f64,
    pub max_res_tokens: u64,
    pub model: String,
}

/// Talks to an OpenAI-compatible `/chat/completions` endpoint (LM Studio,
/// or anything else speaking that dialect).
pub struct CompletionClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    settings: ClientSettings,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f64,
    max_tokens: u64,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

impl CompletionClient {
    pub fn new(config: &LlmConfig) -> Self {
        let settings = ClientSettings {
            temperature: config.temperature.unwrap_or(0.7),
            max_res_tokens: config.max_tokens.unwrap_or(500),
            model: config.model.clone(),
        };

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout.unwrap_or(120)))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            settings,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl CompletionBackend for CompletionClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, CompletionError> {
        let request = CompletionRequest {
            model: &self.settings.model,
            messages,
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_res_tokens,
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CompletionError::Timeout
                } else {
                    CompletionError::Unreachable(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::Malformed(e.to_string()))?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| CompletionError::Malformed("response contained no choices".into()))?;

        Ok(choice.message.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> LlmConfig {
        LlmConfig {
            base_url: base_url.to_string(),
            ..LlmConfig::default()
        }
    }

    #[test]
    fn endpoint_strips_trailing_slash() {
        let client = CompletionClient::new(&config("http://localhost:1234/v1/"));
        assert_eq!(client.endpoint(), "http://localhost:1234/v1/chat/completions");
    }

    #[test]
    fn sampling_defaults_match_the_fixed_parameters() {
        let client = CompletionClient::new(&config("http://localhost:1234/v1"));
        assert_eq!(client.settings.temperature, 0.7);
        assert_eq!(client.settings.max_res_tokens, 500);
    }

    #[test]
    fn request_serializes_roles_and_sampling() {
        let messages = vec![
            ChatMessage::system("You are helpful"),
            ChatMessage::user("Hello"),
        ];
        let request = CompletionRequest {
            model: "local-model",
            messages: &messages,
            temperature: 0.7,
            max_tokens: 500,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "local-model");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "Hello");
        assert_eq!(json["temperature"], 0.7);
        assert_eq!(json["max_tokens"], 500);
    }

    #[test]
    fn response_with_a_choice_deserializes() {
        let json = r#"{"choices":[{"message":{"role":"assistant","content":"hi there"}}]}"#;
        let response: CompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.choices[0].message.content, "hi there");
    }

    #[test]
    fn response_without_choices_still_deserializes_to_empty() {
        let json = r#"{"choices":[]}"#;
        let response: CompletionResponse = serde_json::from_str(json).unwrap();
        assert!(response.choices.is_empty());
    }

    #[tokio::test]
    async fn unreachable_backend_maps_to_unreachable() {
        // nothing listens on the discard port
        let client = CompletionClient::new(&config("http://127.0.0.1:9/v1"));
        let result = client.complete(&[ChatMessage::user("hello")]).await;
        assert!(matches!(result, Err(CompletionError::Unreachable(_))));
    }
}
