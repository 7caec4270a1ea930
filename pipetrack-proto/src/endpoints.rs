//! Path templates for every backend endpoint the client calls.
//!
//! Paths are relative to the configured base URL.

/// `POST`: create an account.
pub const AUTH_REGISTER: &str = "/auth/register";
/// `POST`: exchange credentials for a bearer token.
pub const AUTH_LOGIN: &str = "/auth/login";

/// `GET` list / `POST` create.
pub const TASKS: &str = "/api/tasks";
/// `GET` archived list.
pub const TASKS_ARCHIVED: &str = "/api/tasks/archived";

/// `GET` / `PUT` / `DELETE` a single task.
#[must_use]
pub fn task(id: u64) -> String {
    format!("/api/tasks/{id}")
}

/// `POST`: archive a task.
#[must_use]
pub fn task_archive(id: u64) -> String {
    format!("/api/tasks/{id}/archive")
}

/// `POST`: restore an archived task.
#[must_use]
pub fn task_unarchive(id: u64) -> String {
    format!("/api/tasks/{id}/unarchive")
}

/// `GET`: change log of a task.
#[must_use]
pub fn task_logs(id: u64) -> String {
    format!("/api/tasks/{id}/logs")
}

/// `GET` list / `POST` create comments on a task.
#[must_use]
pub fn task_comments(task_id: u64) -> String {
    format!("/api/tasks/{task_id}/comments")
}

/// `PUT` / `DELETE` a single comment.
#[must_use]
pub fn comment(id: u64) -> String {
    format!("/api/comments/{id}")
}

/// `GET` list / `POST` create legacy candidates.
pub const CANDIDATES: &str = "/candidates";

/// `GET` / `PUT` / `DELETE` a legacy candidate.
#[must_use]
pub fn candidate(id: u64) -> String {
    format!("/candidates/{id}")
}

/// `POST`: archive a legacy candidate.
#[must_use]
pub fn candidate_archive(id: u64) -> String {
    format!("/candidates/{id}/archive")
}

/// `POST`: restore a legacy candidate.
#[must_use]
pub fn candidate_unarchive(id: u64) -> String {
    format!("/candidates/{id}/unarchive")
}
