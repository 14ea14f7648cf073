/// LLM Client: the single point of entry for all Claude API calls in AstroPunch.
///
/// ARCHITECTURAL RULE: No other module may call the Anthropic API directly.
/// Reading generation reaches the model through the `TextGenerator` trait.
///
/// Model and token ceiling are fixed; they are not user-controllable.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for every reading.
pub const MODEL: &str = "claude-sonnet-4-20250514";
pub const MAX_TOKENS: u32 = 1024;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    pub usage: Usage,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl LlmResponse {
    /// Extracts the text content from the first text block.
    pub fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

/// Produces free text for a prompt. The reading pipeline depends on this
/// rather than on `LlmClient` so tests can substitute a canned model.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

/// Thin wrapper over the Anthropic Messages API.
/// One request per call: no retries, no streaming, the HTTP client's default timeout.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    api_url: String,
}

impl LlmClient {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            api_url,
        }
    }

    /// Makes a raw call to the Claude API, returning the full response object.
    /// The prompt is sent as the only user message; there is no system prompt.
    pub async fn call(&self, prompt: &str) -> Result<LlmResponse, LlmError> {
        let request_body = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Try to parse error message
            let message = serde_json::from_str::<AnthropicError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let llm_response: LlmResponse = response.json().await?;

        debug!(
            "LLM call succeeded: input_tokens={}, output_tokens={}",
            llm_response.usage.input_tokens, llm_response.usage.output_tokens
        );

        Ok(llm_response)
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let response = self.call(prompt).await?;
        response
            .text()
            .map(str::to_owned)
            .ok_or(LlmError::EmptyContent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client_for(server: &MockServer) -> LlmClient {
        LlmClient::new("sk-test".to_string(), server.url("/v1/messages"))
    }

    #[tokio::test]
    async fn test_complete_returns_first_text_block() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/messages")
                    .header("x-api-key", "sk-test")
                    .header("anthropic-version", ANTHROPIC_VERSION)
                    .json_body_partial(
                        json!({ "model": MODEL, "max_tokens": MAX_TOKENS }).to_string(),
                    );
                then.status(200).json_body(json!({
                    "content": [
                        { "type": "tool_use" },
                        { "type": "text", "text": "{\"sign\":\"Gemini\"}" }
                    ],
                    "usage": { "input_tokens": 10, "output_tokens": 5 }
                }));
            })
            .await;

        let text = client_for(&server).complete("hello").await.unwrap();

        mock.assert_async().await;
        assert_eq!(text, "{\"sign\":\"Gemini\"}");
    }

    #[tokio::test]
    async fn test_request_carries_single_user_message_without_system() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/messages").json_body(json!({
                    "model": MODEL,
                    "max_tokens": MAX_TOKENS,
                    "messages": [{ "role": "user", "content": "read my stars" }]
                }));
                then.status(200).json_body(json!({
                    "content": [{ "type": "text", "text": "ok" }],
                    "usage": { "input_tokens": 1, "output_tokens": 1 }
                }));
            })
            .await;

        client_for(&server).complete("read my stars").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_raw_call_body_has_no_system_key() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/messages").json_body(json!({
                    "model": MODEL,
                    "max_tokens": MAX_TOKENS,
                    "messages": [{ "role": "user", "content": "read my stars" }]
                }));
                then.status(200).json_body(json!({
                    "content": [{ "type": "text", "text": "ok" }],
                    "usage": { "input_tokens": 1, "output_tokens": 1 }
                }));
            })
            .await;

        let response = client_for(&server).call("read my stars").await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.text(), Some("ok"));
    }

    #[tokio::test]
    async fn test_api_error_message_is_surfaced_without_retry() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/messages");
                then.status(529).json_body(json!({
                    "type": "error",
                    "error": { "type": "overloaded_error", "message": "Overloaded" }
                }));
            })
            .await;

        let err = client_for(&server).complete("hello").await.unwrap_err();

        mock.assert_hits_async(1).await;
        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 529);
                assert_eq!(message, "Overloaded");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_no_text_block_is_empty_content() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/messages");
                then.status(200).json_body(json!({
                    "content": [],
                    "usage": { "input_tokens": 1, "output_tokens": 0 }
                }));
            })
            .await;

        let err = client_for(&server).complete("hello").await.unwrap_err();
        assert!(matches!(err, LlmError::EmptyContent));
    }
}
