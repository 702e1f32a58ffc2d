//! Chat-completions client
//!
//! Minimal reqwest client for an OpenAI-compatible endpoint. Failures map to
//! a small error enum whose `is_transient` classification drives the gate's
//! retry decision.

use std::time::Duration;

use reqwest::{Client, ClientBuilder};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::time::timeout;

use crate::config::AiConfig;
use crate::utils::error::{AppError, Result};

/// Errors surfaced by the chat client
#[derive(Error, Debug)]
pub enum AiClientError {
    /// Request timed out before a response arrived
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Network-level failure, no HTTP response
    #[error("network error: {0}")]
    Network(String),

    /// Non-success HTTP status
    #[error("api error: status {status}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Malformed response body
    #[error("parse error: {0}")]
    Parse(String),
}

impl AiClientError {
    /// Whether an immediate retry could plausibly succeed
    ///
    /// Server errors and network-level failures (including timeouts) are
    /// transient; everything else is deterministic for the given input.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout(_) | Self::Network(_) => true,
            Self::Api { status, .. } => *status >= 500,
            Self::Parse(_) => false,
        }
    }

    /// HTTP status, when a response was received
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Chat message on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message role (`system`, `user`, `assistant`)
    pub role: String,
    /// Message text
    pub content: String,
}

impl ChatMessage {
    /// System message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// User message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Chat-completions request body
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model identifier
    pub model: String,
    /// Conversation messages
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature
    pub temperature: f32,
    /// Completion token budget
    pub max_tokens: u32,
}

/// Chat-completions response body
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// Response choices
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

impl ChatResponse {
    /// Trimmed content of the first choice, if non-empty
    pub fn first_message(&self) -> Option<String> {
        let content = self.choices.first()?.message.content.as_deref()?.trim();
        if content.is_empty() {
            None
        } else {
            Some(content.to_string())
        }
    }
}

/// Response choice
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    /// Assistant message
    pub message: ChatChoiceMessage,
}

/// Assistant message in a response choice
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoiceMessage {
    /// Generated text
    #[serde(default)]
    pub content: Option<String>,
}

/// Chat-completions API client
#[derive(Debug, Clone)]
pub struct ChatClient {
    config: AiConfig,
    http_client: Client,
}

impl ChatClient {
    /// Create a client from configuration
    pub fn new(config: AiConfig) -> Result<Self> {
        let http_client = ClientBuilder::new()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Whether a credential is configured
    pub fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    /// Issue one chat-completions call with a bounded timeout
    pub async fn chat(&self, request: &ChatRequest) -> std::result::Result<ChatResponse, AiClientError> {
        let url = format!(
            "{}/chat/completions",
            self.config.api_base.trim_end_matches('/')
        );
        let api_key = self.config.api_key.as_deref().unwrap_or_default();
        let request_timeout = Duration::from_millis(self.config.timeout_ms);

        let response = timeout(
            request_timeout,
            self.http_client
                .post(&url)
                .bearer_auth(api_key)
                .json(request)
                .send(),
        )
        .await
        .map_err(|_| AiClientError::Timeout(request_timeout))?
        .map_err(|e| {
            if e.is_timeout() {
                AiClientError::Timeout(request_timeout)
            } else {
                AiClientError::Network(e.to_string())
            }
        })?;

        self.handle_response(response).await
    }

    /// Map the HTTP response to a parsed body or a classified error
    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> std::result::Result<ChatResponse, AiClientError> {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| AiClientError::Network(format!("Failed to read response: {}", e)))?;

        if status != 200 {
            return Err(AiClientError::Api { status, body });
        }

        serde_json::from_str(&body)
            .map_err(|e| AiClientError::Parse(format!("Failed to parse JSON: {}", e)))
    }
}
