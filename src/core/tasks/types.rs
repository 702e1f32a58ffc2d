//! Task data model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single task document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Document id
    pub id: String,
    /// Owning user id
    pub user_id: String,
    /// Title text
    pub title: String,
    /// Completion status
    pub completed: bool,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last update time
    pub updated_at: DateTime<Utc>,
}

/// Fields for a new task document
#[derive(Debug, Clone)]
pub struct TaskDraft {
    /// Owning user id
    pub user_id: String,
    /// Title text
    pub title: String,
    /// Completion status
    pub completed: bool,
}

impl TaskDraft {
    /// New incomplete task for a user
    pub fn new(user_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            title: title.into(),
            completed: false,
        }
    }
}

/// Partial update for a task document
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    /// New title, when present
    pub title: Option<String>,
    /// New completion status, when present
    pub completed: Option<bool>,
}

/// Summary counts over a task list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskCounts {
    /// All tasks
    pub total: usize,
    /// Completed tasks
    pub completed: usize,
    /// Remaining tasks
    pub incomplete: usize,
}

/// Compute summary counts
pub fn task_counts(tasks: &[Task]) -> TaskCounts {
    let completed = tasks.iter().filter(|t| t.completed).count();
    TaskCounts {
        total: tasks.len(),
        completed,
        incomplete: tasks.len() - completed,
    }
}
