//! Task repository trait
//!
//! Defines the interface for task storage operations.

use async_trait::async_trait;

use super::model::{Task, TaskStatus};
use crate::id::{TaskId, UserId};
use crate::Result;

/// Repository interface for task storage
///
/// Implementations own the canonical records; every returned task is an
/// independent clone and `save` stores a clone, so callers can never mutate
/// stored state except through another `save`.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// List tasks matching both filters (a missing filter is not applied).
    /// Order is stable insertion order.
    async fn find_all(
        &self,
        status: Option<TaskStatus>,
        assignee_id: Option<UserId>,
    ) -> Result<Vec<Task>>;

    /// Get a task by ID
    async fn find_by_id(&self, id: TaskId) -> Result<Option<Task>>;

    /// Insert or overwrite a task, keyed by its ID
    async fn save(&self, task: &Task) -> Result<()>;
}
