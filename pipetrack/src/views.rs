//! Presentation state and rendering for the command-line front end.
//!
//! Nothing here enforces business rules. [`can_modify`] only decides whether
//! to offer edit controls; the backend makes the real ownership check.

use std::fmt::Write as _;
use std::str::FromStr;

use chrono::{DateTime, Local, Utc};
use pipetrack_proto::candidate::Candidate;
use pipetrack_proto::comment::Comment;
use pipetrack_proto::task::{Task, TaskLog, TaskStatus};
use pipetrack_proto::user::User;

/// Status chip selection on the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    /// Every status.
    #[default]
    All,
    /// A single status.
    Only(TaskStatus),
}

impl StatusFilter {
    /// `true` if `status` passes the filter.
    #[must_use]
    pub fn matches(self, status: TaskStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse::<TaskStatus>()
            .map(Self::Only)
            .map_err(|e| e.to_string())
    }
}

/// Client-side filtering of an already-loaded task list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardView {
    /// Status chip.
    pub filter: StatusFilter,
    /// Case-insensitive substring matched against title and description.
    pub search: String,
    /// Restrict to tasks created by this user.
    pub creator: Option<u64>,
}

impl BoardView {
    /// Tasks passing every active filter, in input order.
    #[must_use]
    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        let needle = self.search.to_lowercase();
        tasks
            .iter()
            .filter(|t| self.filter.matches(t.status))
            .filter(|t| self.creator.is_none_or(|id| t.creator_id == id))
            .filter(|t| {
                needle.is_empty()
                    || t.title.to_lowercase().contains(&needle)
                    || t.description.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

/// Per-status totals for the filter chips.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    /// All tasks.
    pub all: usize,
    /// `To Do`.
    pub to_do: usize,
    /// `In Progress`.
    pub in_progress: usize,
    /// `Done`.
    pub done: usize,
}

impl StatusCounts {
    /// Counts `tasks` by status.
    #[must_use]
    pub fn of(tasks: &[Task]) -> Self {
        tasks.iter().fold(
            Self {
                all: tasks.len(),
                ..Self::default()
            },
            |mut counts, task| {
                match task.status {
                    TaskStatus::ToDo => counts.to_do += 1,
                    TaskStatus::InProgress => counts.in_progress += 1,
                    TaskStatus::Done => counts.done += 1,
                }
                counts
            },
        )
    }
}

/// Whether edit/delete controls should be offered to `viewer`.
#[must_use]
pub fn can_modify(viewer: Option<&User>, task: &Task) -> bool {
    viewer.is_some_and(|user| user.id == task.creator_id)
}

/// Trims comment input; blank input is not submitted.
#[must_use]
pub fn comment_input(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Status with its badge glyph.
#[must_use]
pub const fn status_badge(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::ToDo => "⏳ To Do",
        TaskStatus::InProgress => "🔄 In Progress",
        TaskStatus::Done => "✅ Done",
    }
}

/// Renders a timestamp in local time.
///
/// A format chrono cannot render falls back to RFC 3339.
#[must_use]
pub fn format_timestamp(at: &DateTime<Utc>, format: &str) -> String {
    let local = at.with_timezone(&Local);
    let mut out = String::new();
    if write!(out, "{}", local.format(format)).is_err() {
        return local.to_rfc3339();
    }
    out
}

/// One line per task for list output.
#[must_use]
pub fn task_row(task: &Task) -> String {
    let mut row = format!("#{:<5} {:<16} {}", task.id, status_badge(task.status), task.title);
    if let Some(due) = &task.due_date {
        let _ = write!(row, "  (due {due})");
    }
    if task.archived {
        row.push_str("  [archived]");
    }
    row
}

/// The chip line above the list, e.g. `All (3)  To Do (1) ...`.
#[must_use]
pub fn chip_line(counts: StatusCounts, active: StatusFilter) -> String {
    let chip = |label: &str, count: usize, filter: StatusFilter| {
        if filter == active {
            format!("[{label} ({count})]")
        } else {
            format!("{label} ({count})")
        }
    };
    [
        chip("All", counts.all, StatusFilter::All),
        chip("To Do", counts.to_do, StatusFilter::Only(TaskStatus::ToDo)),
        chip(
            "In Progress",
            counts.in_progress,
            StatusFilter::Only(TaskStatus::InProgress),
        ),
        chip("Done", counts.done, StatusFilter::Only(TaskStatus::Done)),
    ]
    .join("  ")
}

/// Full task block for the detail view.
#[must_use]
pub fn task_detail(task: &Task, viewer: Option<&User>, ts_format: &str) -> String {
    let mut out = format!("#{} {}\n{}\n", task.id, task.title, status_badge(task.status));
    if !task.description.is_empty() {
        let _ = writeln!(out, "\n{}\n", task.description);
    }
    let creator = task
        .creator_name
        .clone()
        .unwrap_or_else(|| format!("user {}", task.creator_id));
    let _ = writeln!(out, "Created by {creator} on {}", format_timestamp(&task.created_at, ts_format));
    let _ = writeln!(out, "Updated {}", format_timestamp(&task.updated_at, ts_format));
    if let Some(due) = &task.due_date {
        let _ = writeln!(out, "Due {due}");
    }
    if task.archived {
        out.push_str("Archived\n");
    }
    if can_modify(viewer, task) {
        out.push_str("You own this task: update, archive and delete are available.\n");
    }
    out
}

/// One comment with its author line.
#[must_use]
pub fn comment_block(comment: &Comment, ts_format: &str) -> String {
    let author = comment
        .user_name
        .clone()
        .unwrap_or_else(|| format!("user {}", comment.user_id));
    format!(
        "[{}] {author} ({}):\n  {}",
        comment.id,
        format_timestamp(&comment.created_at, ts_format),
        comment.content
    )
}

/// One change-log line.
#[must_use]
pub fn log_line(log: &TaskLog, ts_format: &str) -> String {
    let who = log
        .user_name
        .clone()
        .unwrap_or_else(|| format!("user {}", log.user_id));
    let mut line = format!(
        "{}  {who} {}",
        format_timestamp(&log.created_at, ts_format),
        log.action
    );
    if let Some(details) = &log.details {
        let _ = write!(line, ": {details}");
    }
    line
}

/// One line per legacy candidate.
#[must_use]
pub fn candidate_row(candidate: &Candidate) -> String {
    format!(
        "#{:<5} {:<28} {}",
        candidate.id,
        candidate.full_name(),
        candidate.email
    )
}
