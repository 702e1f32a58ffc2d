//! Task operations gated on the active session
//!
//! Validation and auth checks live here; the store stays a dumb document
//! collection.

use std::sync::Arc;

use tracing::debug;

use crate::core::session::Identity;
use crate::utils::error::{AppError, Result};

use super::store::{TaskFeed, TaskStore};
use super::types::{Task, TaskCounts, TaskDraft, TaskPatch, task_counts};

/// Session-aware task operations
pub struct TaskService {
    store: Arc<dyn TaskStore>,
    identity: Arc<dyn Identity>,
}

impl TaskService {
    /// Create a service over a store and identity collaborator
    pub fn new(store: Arc<dyn TaskStore>, identity: Arc<dyn Identity>) -> Self {
        Self { store, identity }
    }

    /// The signed-in user, or an auth error
    fn require_user(&self) -> Result<String> {
        self.identity
            .current_user()
            .ok_or_else(|| AppError::Auth("Must be authenticated".to_string()))
    }

    /// Add a task, trimming the title
    pub async fn add_task(&self, title: &str) -> Result<String> {
        let user_id = self.require_user()?;

        let title = title.trim();
        if title.is_empty() {
            return Err(AppError::Validation(
                "Task title cannot be empty".to_string(),
            ));
        }

        let id = self.store.create(TaskDraft::new(user_id, title)).await?;
        debug!("Created task {}", id);
        Ok(id)
    }

    /// Toggle completion status for a task
    pub async fn toggle_complete(&self, task_id: &str) -> Result<()> {
        let user_id = self.require_user()?;

        let tasks = self.store.list(&user_id).await?;
        let task = tasks
            .iter()
            .find(|t| t.id == task_id)
            .ok_or_else(|| AppError::NotFound(format!("Task {}", task_id)))?;

        self.store
            .update(
                task_id,
                TaskPatch {
                    completed: Some(!task.completed),
                    ..TaskPatch::default()
                },
            )
            .await
    }

    /// Rename a task, trimming the new title
    pub async fn rename_task(&self, task_id: &str, new_title: &str) -> Result<()> {
        self.require_user()?;

        let new_title = new_title.trim();
        if new_title.is_empty() {
            return Err(AppError::Validation(
                "Task title cannot be empty".to_string(),
            ));
        }

        self.store
            .update(
                task_id,
                TaskPatch {
                    title: Some(new_title.to_string()),
                    ..TaskPatch::default()
                },
            )
            .await
    }

    /// Delete a task
    pub async fn delete_task(&self, task_id: &str) -> Result<()> {
        self.require_user()?;
        self.store.delete(task_id).await
    }

    /// Current tasks for the signed-in user, newest first
    pub async fn tasks(&self) -> Result<Vec<Task>> {
        let user_id = self.require_user()?;
        self.store.list(&user_id).await
    }

    /// Subscribe to the signed-in user's tasks
    pub async fn subscribe(&self) -> Result<TaskFeed> {
        let user_id = self.require_user()?;
        self.store.subscribe(&user_id).await
    }

    /// Summary counts for the signed-in user
    pub async fn counts(&self) -> Result<TaskCounts> {
        let tasks = self.tasks().await?;
        Ok(task_counts(&tasks))
    }
}
