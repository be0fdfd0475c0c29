//! Task entity and status definitions

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{TaskId, UserId};
use crate::{Error, Result};

/// Status of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    /// Wire code of this status
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }
}

impl FromStr for TaskStatus {
    type Err = Error;

    /// Parse a status code, case-insensitively
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "todo" => Ok(Self::Todo),
            "in_progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(Error::InvalidStatus(s.to_string())),
        }
    }
}

/// A tracked task
///
/// Status and assignee changes go through [`Task::update_status`] and
/// [`Task::assign_to`], which enforce the completion rule: a `Done` task
/// can never be reopened or reassigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: Option<String>,
    status: TaskStatus,
    assignee_id: Option<UserId>,
    created_at: DateTime<Utc>,
}

impl Task {
    /// Create a new task, stamped with the current time
    pub fn new(
        id: TaskId,
        title: impl Into<String>,
        description: Option<String>,
        status: TaskStatus,
        assignee_id: Option<UserId>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description,
            status,
            assignee_id,
            created_at: Utc::now(),
        }
    }

    /// Rebuild a task from already-known field values
    pub fn from_parts(
        id: TaskId,
        title: impl Into<String>,
        description: Option<String>,
        status: TaskStatus,
        assignee_id: Option<UserId>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description,
            status,
            assignee_id,
            created_at,
        }
    }

    /// Change the status
    ///
    /// A `Done` task cannot move to any other status; setting it to `Done`
    /// again is a no-op that succeeds.
    pub fn update_status(&mut self, new_status: TaskStatus) -> Result<()> {
        if self.status == TaskStatus::Done && new_status != TaskStatus::Done {
            return Err(Error::InvalidTransition("Finished tasks cannot be reopened."));
        }
        self.status = new_status;
        Ok(())
    }

    /// Assign the task to a user, or unassign with `None`
    ///
    /// Rejected once the task is `Done`, whatever the value.
    pub fn assign_to(&mut self, assignee_id: Option<UserId>) -> Result<()> {
        if self.status == TaskStatus::Done {
            return Err(Error::InvalidTransition("Cannot assign a completed task."));
        }
        self.assignee_id = assignee_id;
        Ok(())
    }

    /// Replace title and description, no restrictions
    pub fn update_details(&mut self, title: impl Into<String>, description: Option<String>) {
        self.title = title.into();
        self.description = description;
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn assignee_id(&self) -> Option<UserId> {
        self.assignee_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
