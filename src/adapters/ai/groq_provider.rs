//! Groq Provider - Implementation of AIProvider for Groq's hosted models.
//!
//! Groq exposes an OpenAI-compatible chat completions API, so any endpoint
//! speaking that protocol can be targeted by overriding the base URL.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GroqConfig::new(api_key)
//!     .with_model("llama-3.3-70b-versatile")
//!     .with_base_url("https://api.groq.com/openai/v1");
//!
//! let provider = GroqProvider::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, ProviderInfo,
    TokenUsage,
};

/// Default model used for both conversation and extraction.
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Default API root.
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Configuration for the Groq provider.
#[derive(Debug, Clone)]
pub struct GroqConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use.
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retries on transient failures.
    pub max_retries: u32,
}

impl GroqConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(120),
            max_retries: 0,
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the maximum retry count.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Groq API provider implementation.
pub struct GroqProvider {
    config: GroqConfig,
    client: Client,
}

impl GroqProvider {
    /// Creates a new provider with the given configuration.
    pub fn new(config: GroqConfig) -> Result<Self, AIError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AIError::InvalidRequest(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Builds the chat completions endpoint URL.
    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    /// Converts our request to the chat completions wire format.
    fn to_wire_request(&self, request: &CompletionRequest) -> ChatRequest {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);

        if let Some(ref prompt) = request.system_prompt {
            messages.push(ChatMessage {
                role: "system".to_string(),
                content: prompt.clone(),
            });
        }

        for msg in &request.messages {
            messages.push(ChatMessage {
                role: msg.role.as_str().to_string(),
                content: msg.content.clone(),
            });
        }

        ChatRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }

    /// Sends a request and handles transport errors.
    async fn send_request(&self, request: &CompletionRequest) -> Result<Response, AIError> {
        let wire_request = self.to_wire_request(request);

        self.client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("Content-Type", "application/json")
            .json(&wire_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AIError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    AIError::network(format!("Connection failed: {}", e))
                } else {
                    AIError::network(e.to_string())
                }
            })
    }

    /// Parses the API response status and handles errors.
    async fn handle_response_status(&self, response: Response) -> Result<Response, AIError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let retry_after_header = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<f32>().ok())
            .map(|secs| secs.ceil() as u32);

        let error_body = response.text().await.unwrap_or_default();

        Err(match (status.as_u16(), retry_after_header) {
            (429, Some(secs)) => AIError::rate_limited(secs),
            (code, _) => classify_error_status(code, &error_body),
        })
    }

    /// Parses a non-streaming response.
    async fn parse_response(&self, response: Response) -> Result<CompletionResponse, AIError> {
        let response = self.handle_response_status(response).await?;

        let body = response
            .text()
            .await
            .map_err(|e| AIError::network(format!("Failed to read response: {}", e)))?;

        parse_completion_body(&body)
    }
}

#[async_trait]
impl AIProvider for GroqProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let mut last_error = AIError::network("No attempts made");
        let mut retry_count = 0;

        while retry_count <= self.config.max_retries {
            let attempt = match self.send_request(&request).await {
                Ok(response) => self.parse_response(response).await,
                Err(err) => Err(err),
            };

            match attempt {
                Ok(completion) => {
                    tracing::debug!(
                        trace_id = %request.metadata.trace_id,
                        purpose = %request.metadata.purpose,
                        total_tokens = completion.usage.total_tokens,
                        "Completion received"
                    );
                    return Ok(completion);
                }
                Err(err) => {
                    if !err.is_retryable() || retry_count >= self.config.max_retries {
                        return Err(err);
                    }
                    tracing::warn!(
                        trace_id = %request.metadata.trace_id,
                        attempt = retry_count + 1,
                        error = %err,
                        "Retrying completion"
                    );
                    last_error = err;
                }
            }

            // Exponential backoff: 1s, 2s, 4s, ...
            let delay = Duration::from_secs(1 << retry_count.min(5));
            sleep(delay).await;
            retry_count += 1;
        }

        Err(last_error)
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("groq", &self.config.model)
    }
}

/// Maps an error status and body onto the AIError taxonomy.
fn classify_error_status(status: u16, error_body: &str) -> AIError {
    match status {
        401 | 403 => AIError::AuthenticationFailed,
        429 => AIError::rate_limited(parse_retry_after(error_body)),
        400 | 404 | 413 | 422 => AIError::InvalidRequest(error_message(error_body)),
        500..=599 => AIError::unavailable(format!(
            "Server error {}: {}",
            status,
            error_message(error_body)
        )),
        _ => AIError::network(format!(
            "Unexpected status {}: {}",
            status,
            error_message(error_body)
        )),
    }
}

/// Pulls `error.message` out of an error body, falling back to the raw body.
fn error_message(error_body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(error_body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| error_body.to_string())
}

/// Parses "try again in Xs" out of a rate-limit message, defaulting to 30s.
fn parse_retry_after(error_body: &str) -> u32 {
    let message = error_message(error_body);
    if let Some(idx) = message.find("try again in ") {
        let rest = &message[idx + 13..];
        let number: String = rest
            .chars()
            .take_while(|c| c.is_ascii_digit() || *c == '.')
            .collect();
        if let Ok(secs) = number.parse::<f32>() {
            return secs.ceil().max(1.0) as u32;
        }
    }
    30
}

/// Decodes a chat completions response body.
fn parse_completion_body(body: &str) -> Result<CompletionResponse, AIError> {
    let wire: ChatResponse = serde_json::from_str(body)
        .map_err(|e| AIError::parse(format!("Failed to parse response: {}", e)))?;

    let choice = wire
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| AIError::parse("No choices in response"))?;

    let finish_reason = match choice.finish_reason.as_deref() {
        Some("length") => FinishReason::Length,
        Some("content_filter") => FinishReason::ContentFilter,
        _ => FinishReason::Stop,
    };

    let usage = wire
        .usage
        .map(|u| TokenUsage::new(u.prompt_tokens, u.completion_tokens))
        .unwrap_or_default();

    Ok(CompletionResponse {
        content: choice.message.content.unwrap_or_default().trim().to_string(),
        usage,
        model: wire.model,
        finish_reason,
    })
}

// ----- Chat Completions API Types -----

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: String,
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}
