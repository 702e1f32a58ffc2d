//! Configuration management for the task client
//!
//! This module handles loading and validation of all client configuration.

pub mod models;

pub use models::{AiConfig, RateLimitConfig};

use crate::utils::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use tracing::{debug, info, warn};

/// Main configuration struct for the task client
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// AI service configuration
    pub ai: AiConfig,
    /// Client-side rate limit configuration
    pub rate_limit: RateLimitConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AppError::Config(format!("Failed to read config file: {}", e)))?;

        let config: Self = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        debug!("Loading configuration from environment variables");

        let mut config = Self::default();

        // AI service configuration
        if let Ok(api_key) = env::var("OPENAI_API_KEY") {
            config.ai.api_key = Some(api_key);
        }
        if let Ok(api_base) = env::var("OPENAI_API_BASE") {
            config.ai.api_base = api_base;
        }
        if let Ok(model) = env::var("TASKMATE_AI_MODEL") {
            config.ai.model = model;
        }
        if let Ok(timeout) = env::var("TASKMATE_AI_TIMEOUT_MS") {
            config.ai.timeout_ms = timeout
                .parse()
                .map_err(|e| AppError::Config(format!("Invalid timeout: {}", e)))?;
        }
        if let Ok(backoff) = env::var("TASKMATE_AI_RETRY_BACKOFF_MS") {
            config.ai.retry_backoff_ms = backoff
                .parse()
                .map_err(|e| AppError::Config(format!("Invalid retry backoff: {}", e)))?;
        }

        // Rate limit configuration
        if let Ok(max_calls) = env::var("TASKMATE_RATE_MAX_CALLS") {
            config.rate_limit.max_calls = max_calls
                .parse()
                .map_err(|e| AppError::Config(format!("Invalid max calls: {}", e)))?;
        }
        if let Ok(window_ms) = env::var("TASKMATE_RATE_WINDOW_MS") {
            config.rate_limit.window_ms = window_ms
                .parse()
                .map_err(|e| AppError::Config(format!("Invalid rate window: {}", e)))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.ai.api_base.is_empty() {
            return Err(AppError::Config("AI api_base cannot be empty".to_string()));
        }
        if self.ai.model.is_empty() {
            return Err(AppError::Config("AI model cannot be empty".to_string()));
        }
        if self.ai.timeout_ms == 0 {
            return Err(AppError::Config(
                "AI timeout must be greater than zero".to_string(),
            ));
        }
        if self.rate_limit.window_ms <= 0 {
            return Err(AppError::Config(
                "Rate limit window must be greater than zero".to_string(),
            ));
        }

        if self.ai.api_key.is_none() {
            warn!("No AI API key configured, AI features will be disabled");
        }

        Ok(())
    }
}
