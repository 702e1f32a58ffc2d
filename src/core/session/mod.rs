//! Session context: identity and session-scoped storage
//!
//! The identity provider and the session store are external collaborators.
//! This module defines the seams plus in-process implementations, and the
//! accessors for the AI call-window slot.

use std::collections::HashMap;

use parking_lot::Mutex;
use tracing::warn;

use crate::core::limiter::CallWindow;

/// Storage key for the AI call window
pub const AI_CALL_TIMES_KEY: &str = "ai_call_times";

/// Identity collaborator supplying the active user session
pub trait Identity: Send + Sync {
    /// Currently signed-in user, if any
    fn current_user(&self) -> Option<String>;

    /// Whether the session state is still resolving
    fn is_loading(&self) -> bool;
}

/// Fixed identity, used by the CLI and tests
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    user: Option<String>,
}

impl StaticIdentity {
    /// Identity with an active user session
    pub fn signed_in(user: impl Into<String>) -> Self {
        Self {
            user: Some(user.into()),
        }
    }

    /// Identity without a user session
    pub fn signed_out() -> Self {
        Self { user: None }
    }
}

impl Identity for StaticIdentity {
    fn current_user(&self) -> Option<String> {
        self.user.clone()
    }

    fn is_loading(&self) -> bool {
        false
    }
}

/// Session-scoped key-value storage, cleared when the session ends
pub trait SessionStore: Send + Sync {
    /// Read a slot
    fn get(&self, key: &str) -> Option<String>;

    /// Write a slot
    fn set(&self, key: &str, value: String);

    /// Clear a slot
    fn remove(&self, key: &str);
}

/// In-process session storage
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.slots.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        self.slots.lock().insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        self.slots.lock().remove(key);
    }
}

/// Load the AI call window from its session slot
///
/// A missing or corrupt slot decodes as an empty window.
pub fn load_call_window(store: &dyn SessionStore) -> CallWindow {
    match store.get(AI_CALL_TIMES_KEY) {
        Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!("Discarding corrupt call window slot: {}", e);
            CallWindow::new()
        }),
        None => CallWindow::new(),
    }
}

/// Persist the AI call window to its session slot
pub fn store_call_window(store: &dyn SessionStore, window: &CallWindow) {
    match serde_json::to_string(window) {
        Ok(raw) => store.set(AI_CALL_TIMES_KEY, raw),
        Err(e) => warn!("Failed to encode call window: {}", e),
    }
}
