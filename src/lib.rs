//! # taskmate-rs
//!
//! A single-user task list client: task CRUD against a pluggable document
//! store, plus an AI motivation feature gated by a client-side sliding-window
//! rate limiter and a retry-once policy.
//!
//! ## Features
//!
//! - **Task operations**: create, toggle, rename, and delete tasks through a
//!   session-aware service; subscribe to the full result set on every change
//! - **AI motivation gate**: turns a task title into a short tip via an
//!   OpenAI-compatible chat-completions endpoint
//! - **Client-side rate limiting**: a pure sliding-window `admit` decision
//!   over a session-persisted call window
//! - **Typed outcomes**: every AI failure path is recovered into a tagged
//!   `MotivationOutcome`, never an error or a crash
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use taskmate_rs::{Config, MemorySessionStore, MotivationService};
//!
//! #[tokio::main]
//! async fn main() -> taskmate_rs::Result<()> {
//!     let config = Config::from_env()?;
//!     let session = Arc::new(MemorySessionStore::new());
//!     let service = MotivationService::new(&config, session)?;
//!
//!     let outcome = service.request_for_task("Buy groceries").await;
//!     println!("{:?}", outcome);
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

// Public module exports
pub mod config;
pub mod core;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{AppError, Result};

pub use crate::core::limiter::{Admission, CallWindow, admit, prune};
pub use crate::core::motivation::{FailureKind, MotivationGate, MotivationOutcome, MotivationService};
pub use crate::core::session::{Identity, MemorySessionStore, SessionStore, StaticIdentity};
pub use crate::core::tasks::{MemoryTaskStore, Task, TaskCounts, TaskService, TaskStore};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
