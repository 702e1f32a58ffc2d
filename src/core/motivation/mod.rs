//! AI motivation feature
//!
//! A rate-limited gate around a chat-completions endpoint that turns a task
//! title into a short motivational tip. Every failure path is recovered into
//! a tagged `MotivationOutcome`; nothing here crosses the boundary as an
//! error.

pub mod client;
pub mod gate;
pub mod service;
pub mod types;


pub use client::{AiClientError, ChatClient, ChatMessage, ChatRequest, ChatResponse};
pub use gate::MotivationGate;
pub use service::MotivationService;
pub use types::{FailureKind, MotivationOutcome};
