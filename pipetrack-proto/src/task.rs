//! Task (pipeline candidate) records and their change log.
//!
//! A task moves through the interview pipeline via [`TaskStatus`]. Status
//! transitions, ownership checks and change-log recording are all enforced
//! by the backend; nothing in this module validates business rules.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Pipeline stage of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Not started yet.
    #[serde(rename = "To Do")]
    ToDo,
    /// Interview loop is underway.
    #[serde(rename = "In Progress")]
    InProgress,
    /// Finished.
    #[serde(rename = "Done")]
    Done,
}

impl TaskStatus {
    /// All statuses in pipeline order.
    pub const ALL: [Self; 3] = [Self::ToDo, Self::InProgress, Self::Done];

    /// The wire representation (`"To Do"`, `"In Progress"`, `"Done"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ToDo => "To Do",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a [`TaskStatus`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown task status: {0:?} (expected \"To Do\", \"In Progress\" or \"Done\")")]
pub struct ParseStatusError(pub String);

impl FromStr for TaskStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', '_'], " ");
        match normalized.as_str() {
            "to do" | "todo" => Ok(Self::ToDo),
            "in progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(ParseStatusError(s.to_string())),
        }
    }
}

/// A tracked pipeline item as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Backend-assigned identifier.
    pub id: u64,
    /// Headline, usually the candidate's name and role.
    pub title: String,
    /// Free-form notes.
    #[serde(default)]
    pub description: String,
    /// Current pipeline stage.
    pub status: TaskStatus,
    /// User who created the task.
    pub creator_id: u64,
    /// Display name of the creator, when the backend joins it in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator_name: Option<String>,
    /// Due date as sent by the backend (date or RFC 3339 timestamp).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    /// Whether the task has been archived (soft-hidden).
    #[serde(default)]
    pub archived: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /api/tasks`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTaskInput {
    /// Headline of the new task.
    pub title: String,
    /// Optional notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Initial stage; the backend defaults to `To Do`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    /// Optional due date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

/// Body of `PUT /api/tasks/{id}`. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTaskInput {
    /// New headline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New stage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    /// New due date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

impl UpdateTaskInput {
    /// Returns `true` if no field would be sent.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.due_date.is_none()
    }
}

/// Immutable change-log entry the backend appends whenever a task mutates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskLog {
    /// Entry identifier.
    pub id: u64,
    /// Task the change applies to.
    pub task_id: u64,
    /// User who made the change.
    pub user_id: u64,
    /// Display name of that user, when joined in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    /// What happened (e.g. `"updated"`, `"archived"`).
    pub action: String,
    /// Free-form description of the change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// When the change was recorded.
    pub created_at: DateTime<Utc>,
}
