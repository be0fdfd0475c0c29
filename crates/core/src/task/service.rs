//! Task use cases
//!
//! Orchestrates the repository and the entity, and translates entities into
//! the wire-facing [`TaskView`] projection.

use std::sync::Arc;

use serde::Serialize;

use super::model::{Task, TaskStatus};
use super::repository::TaskRepository;
use crate::id::{TaskId, UserId};
use crate::{Error, Result};

/// JSON-serializable read projection of a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskView {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub assignee_id: Option<String>,
    pub created_at: String,
}

impl From<&Task> for TaskView {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id().to_string(),
            title: task.title().to_string(),
            description: task.description().map(str::to_string),
            status: task.status(),
            assignee_id: task.assignee_id().map(|id| id.to_string()),
            created_at: task.created_at().to_rfc3339(),
        }
    }
}

/// Task use-case service
pub struct TaskService {
    repository: Arc<dyn TaskRepository>,
}

impl TaskService {
    pub fn new(repository: Arc<dyn TaskRepository>) -> Self {
        Self { repository }
    }

    /// List tasks, optionally filtered by status and/or assignee
    pub async fn list_tasks(
        &self,
        status: Option<TaskStatus>,
        assignee_id: Option<UserId>,
    ) -> Result<Vec<TaskView>> {
        let tasks = self.repository.find_all(status, assignee_id).await?;
        Ok(tasks.iter().map(TaskView::from).collect())
    }

    /// Create and persist a new task
    ///
    /// The status is always taken from the caller; there is no implicit
    /// default.
    pub async fn create_task(
        &self,
        title: impl Into<String>,
        description: Option<String>,
        status_text: &str,
        assignee_id: Option<UserId>,
    ) -> Result<TaskView> {
        let status: TaskStatus = status_text.parse()?;
        let task = Task::new(TaskId::generate(), title, description, status, assignee_id);
        self.repository.save(&task).await?;
        Ok(TaskView::from(&task))
    }

    /// Change the status of an existing task
    pub async fn update_status(&self, id: TaskId, new_status: TaskStatus) -> Result<TaskView> {
        let mut task = self.load(id).await?;
        task.update_status(new_status)?;
        self.repository.save(&task).await?;
        Ok(TaskView::from(&task))
    }

    /// Assign an existing task to a user, or unassign with `None`
    pub async fn assign(&self, id: TaskId, assignee_id: Option<UserId>) -> Result<TaskView> {
        let mut task = self.load(id).await?;
        task.assign_to(assignee_id)?;
        self.repository.save(&task).await?;
        Ok(TaskView::from(&task))
    }

    async fn load(&self, id: TaskId) -> Result<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::TaskNotFound(id.to_string()))
    }
}
