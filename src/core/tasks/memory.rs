//! In-memory task store
//!
//! Process-local implementation of the store seam. Mutations broadcast a
//! snapshot over a watch channel, so subscribers always observe the full
//! current result set.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::WatchStream;
use uuid::Uuid;

use crate::utils::error::{AppError, Result};

use super::store::{TaskFeed, TaskStore};
use super::types::{Task, TaskDraft, TaskPatch};

/// In-memory task store
#[derive(Debug)]
pub struct MemoryTaskStore {
    tasks: Mutex<HashMap<String, Task>>,
    changes: watch::Sender<Vec<Task>>,
}

impl MemoryTaskStore {
    /// Empty store
    pub fn new() -> Self {
        let (changes, _) = watch::channel(Vec::new());
        Self {
            tasks: Mutex::new(HashMap::new()),
            changes,
        }
    }

    /// Push the current snapshot to all subscribers
    fn broadcast(&self) {
        let snapshot: Vec<Task> = self.tasks.lock().values().cloned().collect();
        self.changes.send_replace(snapshot);
    }
}

impl Default for MemoryTaskStore {
    fn default() -> Self {
        Self::new()
    }
}

/// A user's tasks from a snapshot, newest first
fn tasks_for_user(all: &[Task], user_id: &str) -> Vec<Task> {
    let mut tasks: Vec<Task> = all.iter().filter(|t| t.user_id == user_id).cloned().collect();
    tasks.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
    tasks
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn create(&self, draft: TaskDraft) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        let task = Task {
            id: id.clone(),
            user_id: draft.user_id,
            title: draft.title,
            completed: draft.completed,
            created_at: now,
            updated_at: now,
        };

        self.tasks.lock().insert(id.clone(), task);
        self.broadcast();
        Ok(id)
    }

    async fn update(&self, id: &str, patch: TaskPatch) -> Result<()> {
        {
            let mut tasks = self.tasks.lock();
            let task = tasks
                .get_mut(id)
                .ok_or_else(|| AppError::NotFound(format!("Task {}", id)))?;

            if let Some(title) = patch.title {
                task.title = title;
            }
            if let Some(completed) = patch.completed {
                task.completed = completed;
            }
            task.updated_at = Utc::now();
        }

        self.broadcast();
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.tasks
            .lock()
            .remove(id)
            .ok_or_else(|| AppError::NotFound(format!("Task {}", id)))?;

        self.broadcast();
        Ok(())
    }

    async fn list(&self, user_id: &str) -> Result<Vec<Task>> {
        let snapshot: Vec<Task> = self.tasks.lock().values().cloned().collect();
        Ok(tasks_for_user(&snapshot, user_id))
    }

    async fn subscribe(&self, user_id: &str) -> Result<TaskFeed> {
        let receiver = self.changes.subscribe();
        let user_id = user_id.to_string();
        let feed = WatchStream::new(receiver).map(move |snapshot| tasks_for_user(&snapshot, &user_id));
        Ok(Box::pin(feed))
    }
}
