//! LLM Client — the single point of contact for outbound chat-completion calls.
//!
//! ARCHITECTURAL RULE: no other module may talk to an LLM provider directly.
//! All model interactions go through `ChatBackend`.
//!
//! There is deliberately NO retry loop here: retry/fallback policy is a
//! caller-level decision (see the discovery engine's fallback transition).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Chat-completion endpoint for the search provider (web-grounded answers).
pub const SEARCH_API_URL: &str = "https://api.perplexity.ai/chat/completions";
/// Chat-completion endpoint for the generation provider.
pub const GENERATION_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Default model for the generation provider.
pub const GENERATION_MODEL: &str = "gpt-3.5-turbo";
/// Default model for the search provider.
pub const SEARCH_MODEL: &str = "sonar";

/// Length cap for logged content samples. Full payloads are never logged.
const LOG_SAMPLE_CHARS: usize = 200;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited by provider")]
    RateLimited,

    #[error("Authentication rejected by provider")]
    Auth,

    #[error("LLM returned no completion choices")]
    EmptyContent,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Role of a chat message. `System` sets behavior, `User` carries the task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// One message in an ordered conversation. Immutable once sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// The raw result of a successful completion call: the first choice's text
/// plus whatever citations the provider attached (possibly empty).
#[derive(Debug, Clone, Default)]
pub struct RawResponse {
    pub content: String,
    pub citations: Vec<String>,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    citations: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// The transport seam. Engines and managers depend on this trait, never on
/// `LlmClient` directly, so tests can swap in a scripted backend.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn send(
        &self,
        messages: &[ChatMessage],
        model: &str,
        temperature: f32,
    ) -> Result<RawResponse, LlmError>;
}

/// A chat-completion client bound to one provider endpoint and credential.
/// The process holds two: one for generation, one for search.
#[derive(Clone)]
pub struct LlmClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl LlmClient {
    pub fn new(base_url: impl Into<String>, api_key: String) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.into(),
            api_key,
        }
    }
}

#[async_trait]
impl ChatBackend for LlmClient {
    async fn send(
        &self,
        messages: &[ChatMessage],
        model: &str,
        temperature: f32,
    ) -> Result<RawResponse, LlmError> {
        if messages.is_empty() {
            return Err(LlmError::InvalidRequest(
                "messages must not be empty".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&temperature) {
            return Err(LlmError::InvalidRequest(format!(
                "temperature {temperature} outside [0.0, 1.0]"
            )));
        }

        let request_body = CompletionRequest {
            model,
            messages,
            temperature,
        };

        debug!(
            "LLM request: model={} temperature={} prompt_sample={:?}",
            model,
            temperature,
            sample(&messages[messages.len() - 1].content)
        );

        let response = self
            .client
            .post(&self.base_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("LLM API returned {status}: {}", sample(&body));
            return Err(match status.as_u16() {
                429 => LlmError::RateLimited,
                401 | 403 => LlmError::Auth,
                code => {
                    let message = serde_json::from_str::<ApiError>(&body)
                        .map(|e| e.error.message)
                        .unwrap_or(body);
                    LlmError::Api {
                        status: code,
                        message,
                    }
                }
            });
        }

        let completion: CompletionResponse = response.json().await?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(LlmError::EmptyContent)?;

        debug!(
            "LLM response: {} citations, content_sample={:?}",
            completion.citations.len(),
            sample(&content)
        );

        Ok(RawResponse {
            content,
            citations: completion.citations,
        })
    }
}

/// Bounded-length sample for logging. Never used for correctness.
fn sample(text: &str) -> String {
    text.chars().take(LOG_SAMPLE_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_send_rejects_empty_messages() {
        let client = LlmClient::new(SEARCH_API_URL, "test-key".to_string());
        let result = client.send(&[], SEARCH_MODEL, 0.5).await;
        assert!(matches!(result, Err(LlmError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_send_rejects_out_of_range_temperature() {
        let client = LlmClient::new(SEARCH_API_URL, "test-key".to_string());
        let messages = [ChatMessage::user("hello")];
        let result = client.send(&messages, SEARCH_MODEL, 1.5).await;
        assert!(matches!(result, Err(LlmError::InvalidRequest(_))));

        let result = client.send(&messages, SEARCH_MODEL, -0.1).await;
        assert!(matches!(result, Err(LlmError::InvalidRequest(_))));
    }

    #[test]
    fn test_chat_message_roles_serialize_lowercase() {
        let msg = ChatMessage::system("be helpful");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "system");

        let msg = ChatMessage::user("find jobs");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "user");
    }

    #[test]
    fn test_completion_response_citations_default_empty() {
        let json = r#"{"choices": [{"message": {"content": "hi"}}]}"#;
        let parsed: CompletionResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.citations.is_empty());
        assert_eq!(parsed.choices[0].message.content, "hi");
    }

    #[test]
    fn test_sample_bounds_length() {
        let long = "x".repeat(1000);
        assert_eq!(sample(&long).len(), LOG_SAMPLE_CHARS);
        assert_eq!(sample("short"), "short");
    }
}
