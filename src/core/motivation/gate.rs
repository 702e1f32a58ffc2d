//! AI request gate
//!
//! Validate, attempt with a bounded timeout, classify the failure, retry at
//! most once on transient failures. Every path ends in a tagged outcome.

use std::time::Duration;

use tracing::{debug, warn};

use crate::config::AiConfig;
use crate::utils::error::recovery::{RetryError, RetryOnce};
use crate::utils::error::Result;

use super::client::{AiClientError, ChatClient, ChatMessage, ChatRequest, ChatResponse};
use super::types::{FailureKind, MotivationOutcome};

/// System message sent with every motivation request
const SYSTEM_PROMPT: &str = "You are a concise, practical assistant.";

/// Build the user prompt for a task title
fn motivation_prompt(task_title: &str) -> String {
    format!(
        "You are a helpful assistant. The user has a task: \"{}\".\n\
         Provide a short, upbeat, practical tip or motivation (2-3 sentences).\n\
         Avoid fluff. Focus on concrete next steps if relevant.",
        task_title
    )
}

/// Gate around the chat client
#[derive(Debug, Clone)]
pub struct MotivationGate {
    config: AiConfig,
    client: ChatClient,
    retry: RetryOnce,
}

impl MotivationGate {
    /// Create a gate from configuration
    pub fn new(config: AiConfig) -> Result<Self> {
        let client = ChatClient::new(config.clone())?;
        let retry = RetryOnce::new(Duration::from_millis(config.retry_backoff_ms));

        Ok(Self {
            config,
            client,
            retry,
        })
    }

    /// Request a motivational tip for a task title
    ///
    /// Issues at most two outbound calls. A 429 is terminal, server and
    /// network failures get the single retry, and the second failure is
    /// always transient-terminal whatever its classification.
    pub async fn request_motivation(&self, subject_text: &str) -> MotivationOutcome {
        if !self.client.is_configured() {
            return MotivationOutcome::failure(FailureKind::NotConfigured, "API key not configured");
        }

        let subject = subject_text.trim();
        if subject.is_empty() {
            return MotivationOutcome::failure(FailureKind::InvalidInput, "Task title is required");
        }

        let request = self.build_request(subject);
        debug!("Requesting motivation for task: {}", subject);

        let result = self
            .retry
            .call(|| self.client.chat(&request), AiClientError::is_transient)
            .await;

        match result {
            Ok(response) => Self::extract_message(&response),
            Err(RetryError::Terminal(error)) => Self::classify_terminal(error),
            Err(RetryError::Exhausted(error)) => {
                warn!("AI request failed after retry: {}", error);
                MotivationOutcome::failure(
                    FailureKind::TransientError,
                    "AI request failed. Please try again.",
                )
            }
        }
    }

    /// Build the wire request for a trimmed subject
    fn build_request(&self, subject: &str) -> ChatRequest {
        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(motivation_prompt(subject)),
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        }
    }

    /// Apply the empty-message rule to a successful response
    fn extract_message(response: &ChatResponse) -> MotivationOutcome {
        match response.first_message() {
            Some(message) => MotivationOutcome::success(message),
            None => {
                MotivationOutcome::failure(FailureKind::UnknownError, "Empty response from AI")
            }
        }
    }

    /// Classify a first-attempt failure that was not retry-eligible
    fn classify_terminal(error: AiClientError) -> MotivationOutcome {
        warn!("AI request failed: {}", error);
        match error.status() {
            Some(429) => MotivationOutcome::failure(
                FailureKind::QuotaExceeded,
                "AI quota exceeded. Try again later.",
            ),
            _ => MotivationOutcome::failure(
                FailureKind::UnknownError,
                "AI request failed. Please try again.",
            ),
        }
    }
}
