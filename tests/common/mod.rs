//! Common test utilities for taskmate-rs

use serde_json::{Value, json};
use taskmate_rs::config::AiConfig;

/// AI configuration pointed at a mock endpoint
pub fn ai_config(api_base: &str) -> AiConfig {
    AiConfig {
        api_key: Some("sk-test".to_string()),
        api_base: api_base.to_string(),
        ..AiConfig::default()
    }
}

/// A chat-completions response body with the given message content
pub fn chat_body(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 40, "completion_tokens": 30, "total_tokens": 70 }
    })
}
