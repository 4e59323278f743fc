//! OpenAI Chat Completions client.
//!
//! Async `reqwest` client with explicit connect and request timeouts. The
//! transcript is sent as ordered `{role, content}` pairs; the first choice's
//! content comes back trimmed.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::ProviderConfig;
use crate::conversation::message::Message;
use crate::llm::{CompletionProvider, ProviderError, ProviderResult};

/// Default Chat Completions base URL.
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Connect timeout for provider calls.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u64>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Async client for an OpenAI-compatible Chat Completions endpoint.
pub struct OpenAiChat {
    client: Client,
    api_key: String,
    config: ProviderConfig,
}

impl OpenAiChat {
    /// Create a client from config and an explicit API key.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: ProviderConfig, api_key: impl Into<String>) -> ProviderResult<Self> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            config,
        })
    }

    /// Create a client reading the API key from [`API_KEY_ENV`].
    ///
    /// # Errors
    /// Returns an error if the key is missing or the client cannot be built.
    pub fn from_env(config: ProviderConfig) -> ProviderResult<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ProviderError::MissingApiKey(API_KEY_ENV))?;
        Self::new(config, api_key)
    }

    fn endpoint(&self) -> String {
        let base = self.config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        format!("{}/chat/completions", base.trim_end_matches('/'))
    }

    fn wire_messages(transcript: &[Message]) -> Vec<WireMessage<'_>> {
        transcript
            .iter()
            .map(|message| WireMessage {
                role: message.role.as_str(),
                content: &message.content,
            })
            .collect()
    }
}

#[async_trait]
impl CompletionProvider for OpenAiChat {
    async fn complete(&self, transcript: &[Message]) -> ProviderResult<String> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: Self::wire_messages(transcript),
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }

        let payload = response.json::<ChatResponse>().await?;
        payload
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_owned())
            .filter(|content| !content.is_empty())
            .ok_or(ProviderError::MalformedResponse)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_for(base_url: String) -> OpenAiChat {
        let config = ProviderConfig {
            base_url: Some(base_url),
            ..ProviderConfig::default()
        };
        OpenAiChat::new(config, "test-key").unwrap()
    }

    fn short_transcript() -> Vec<Message> {
        vec![
            Message::system("You are a helpful AI voice assistant."),
            Message::user("Hello"),
        ]
    }

    #[test]
    fn wire_messages_preserve_order_and_roles() {
        let transcript = vec![
            Message::system("sys"),
            Message::user("hi"),
            Message::assistant("hello"),
        ];

        let wire = OpenAiChat::wire_messages(&transcript);
        let roles: Vec<&str> = wire.iter().map(|m| m.role).collect();
        let contents: Vec<&str> = wire.iter().map(|m| m.content).collect();
        assert_eq!(roles, ["system", "user", "assistant"]);
        assert_eq!(contents, ["sys", "hi", "hello"]);
    }

    #[tokio::test]
    async fn returns_trimmed_first_choice_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [
                    {"message": {"role": "assistant", "content": "  Hello there.  "}}
                ]
            })))
            .mount(&server)
            .await;

        let provider = provider_for(server.uri());
        let reply = provider.complete(&short_transcript()).await.unwrap();
        assert_eq!(reply, "Hello there.");
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let provider = provider_for(server.uri());
        let result = provider.complete(&short_transcript()).await;
        assert!(matches!(result, Err(ProviderError::Status(500))));
    }

    #[tokio::test]
    async fn empty_choice_list_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"choices": []})),
            )
            .mount(&server)
            .await;

        let provider = provider_for(server.uri());
        let result = provider.complete(&short_transcript()).await;
        assert!(matches!(result, Err(ProviderError::MalformedResponse)));
    }
}
