//! Comments attached to a task.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A comment on a task. Lives and dies with its parent task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Comment identifier.
    pub id: u64,
    /// Parent task.
    pub task_id: u64,
    /// Author.
    pub user_id: u64,
    /// Author display name, when the backend joins it in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    /// Comment text.
    pub content: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last edit time.
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /api/tasks/{id}/comments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCommentInput {
    /// Comment text.
    pub content: String,
}

/// Body of `PUT /api/comments/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCommentInput {
    /// Replacement text.
    pub content: String,
}
