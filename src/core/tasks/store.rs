//! Document store seam

use std::pin::Pin;

use async_trait::async_trait;
use tokio_stream::Stream;

use crate::utils::error::Result;

use super::types::{Task, TaskDraft, TaskPatch};

/// Stream of full result sets, pushed on every underlying change
pub type TaskFeed = Pin<Box<dyn Stream<Item = Vec<Task>> + Send>>;

/// Document-store collaborator for task records
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Create a new task document, returning its id
    async fn create(&self, draft: TaskDraft) -> Result<String>;

    /// Apply a partial update; bumps `updated_at`
    async fn update(&self, id: &str, patch: TaskPatch) -> Result<()>;

    /// Delete a task document
    async fn delete(&self, id: &str) -> Result<()>;

    /// Current tasks for a user, newest first
    async fn list(&self, user_id: &str) -> Result<Vec<Task>>;

    /// Subscribe to a user's tasks
    ///
    /// The feed yields the full current result set immediately and again on
    /// every underlying change.
    async fn subscribe(&self, user_id: &str) -> Result<TaskFeed>;
}
