//! Configuration models

use serde::{Deserialize, Serialize};

/// AI service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// API credential; AI features are disabled when absent
    pub api_key: Option<String>,
    /// Base URL of the chat-completions API
    pub api_base: String,
    /// Model identifier
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Completion token budget
    pub max_tokens: u32,
    /// Per-attempt request timeout in milliseconds
    pub timeout_ms: u64,
    /// Delay before the single retry, in milliseconds
    pub retry_backoff_ms: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.7,
            max_tokens: 120,
            timeout_ms: 15_000,
            retry_backoff_ms: 600,
        }
    }
}

/// Client-side rate limit configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Maximum admitted calls per window
    pub max_calls: u32,
    /// Window size in milliseconds
    pub window_ms: i64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_calls: 5,
            window_ms: 600_000,
        }
    }
}
