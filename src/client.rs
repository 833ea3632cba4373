use crate::config::Credential;
use crate::models::{ApiErrorBody, ChatMessage, ChatRequest, ChatResponse, Error, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use std::time::Duration;
use tracing::debug;

/// A failed completion call. The message is shown to the user as is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct CompletionError {
    pub message: String,
}

impl CompletionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub type CompletionResult = std::result::Result<String, CompletionError>;

/// Anything that can turn a message pair into completion text.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        credential: &Credential,
        model: &str,
        temperature: f32,
    ) -> CompletionResult;
}

/// Client for OpenAI-compatible `chat/completions` endpoints.
pub struct OpenAiClient {
    client: reqwest::Client,
    api_url: String,
}

impl OpenAiClient {
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_idle_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::Config(format!("could not build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_url: api_url.into(),
        })
    }
}

#[async_trait]
impl CompletionBackend for OpenAiClient {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        credential: &Credential,
        model: &str,
        temperature: f32,
    ) -> CompletionResult {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", credential.expose()))
                .map_err(|_| CompletionError::new("Invalid API key format"))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let request = ChatRequest {
            model,
            messages,
            temperature,
            n: 1,
        };

        debug!(url = %self.api_url, model, "sending completion request");

        let response = self
            .client
            .post(&self.api_url)
            .headers(headers)
            .json(&request)
            .send()
            .await
            .map_err(describe_transport_error)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CompletionError::new(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        parse_completion(&body)
    }
}

fn describe_transport_error(err: reqwest::Error) -> CompletionError {
    if err.is_timeout() {
        CompletionError::new(format!("Request timed out: {}", err))
    } else if err.is_connect() {
        CompletionError::new(format!("Could not connect to the completion service: {}", err))
    } else {
        CompletionError::new(format!("Network error: {}", err))
    }
}

/// Error for a non-2xx reply, using the service's own message when present.
pub fn status_error(status: reqwest::StatusCode, body: &str) -> CompletionError {
    let detail = serde_json::from_str::<ApiErrorBody>(body)
        .map(|parsed| parsed.error.message)
        .unwrap_or_else(|_| body.trim().chars().take(200).collect());

    let prefix = match status.as_u16() {
        401 | 403 => "Authentication failed",
        429 => "Rate limited",
        500..=599 => "Service error",
        _ => "API error",
    };

    if detail.is_empty() {
        CompletionError::new(format!("{} ({})", prefix, status))
    } else {
        CompletionError::new(format!("{} ({}): {}", prefix, status, detail))
    }
}

/// Extracts the first choice's content, trimmed.
pub fn parse_completion(body: &str) -> CompletionResult {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| CompletionError::new(format!("Malformed response from completion service: {}", e)))?;

    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| CompletionError::new("Completion service returned no choices"))?;

    let content = choice
        .message
        .content
        .ok_or_else(|| CompletionError::new("Completion service returned a choice without content"))?;

    Ok(content.trim().to_string())
}
