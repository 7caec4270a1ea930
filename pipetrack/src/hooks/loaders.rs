//! Loaders for each backend resource a view can display.
//!
//! Id-keyed loaders skip id `0`, which no backend record carries.

use pipetrack_proto::candidate::{Candidate, CandidateListResponse};
use pipetrack_proto::comment::Comment;
use pipetrack_proto::query::PaginationParams;
use pipetrack_proto::task::{Task, TaskLog};

use super::{Hook, Loader};
use crate::api::ApiError;
use crate::services::{CandidateService, CommentService, TaskService};

/// Loads one task by id.
#[derive(Debug, Clone)]
pub struct TaskLoader {
    service: TaskService,
}

impl TaskLoader {
    /// Creates the loader.
    #[must_use]
    pub const fn new(service: TaskService) -> Self {
        Self { service }
    }
}

impl Loader for TaskLoader {
    type Key = u64;
    type Output = Task;

    async fn load(&self, id: &u64) -> Result<Task, ApiError> {
        self.service.get(*id).await
    }

    fn should_load(&self, id: &u64) -> bool {
        *id != 0
    }
}

/// Which task list to load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskListKey {
    /// Pagination, search and sort.
    pub params: PaginationParams,
    /// Load archived tasks instead of active ones.
    pub archived: bool,
}

/// Loads the active or archived task list.
#[derive(Debug, Clone)]
pub struct TaskListLoader {
    service: TaskService,
}

impl TaskListLoader {
    /// Creates the loader.
    #[must_use]
    pub const fn new(service: TaskService) -> Self {
        Self { service }
    }
}

impl Loader for TaskListLoader {
    type Key = TaskListKey;
    type Output = Vec<Task>;

    async fn load(&self, key: &TaskListKey) -> Result<Vec<Task>, ApiError> {
        if key.archived {
            self.service.list_archived(&key.params).await
        } else {
            self.service.list(&key.params).await
        }
    }
}

/// Loads the comments of a task.
#[derive(Debug, Clone)]
pub struct CommentsLoader {
    service: CommentService,
}

impl CommentsLoader {
    /// Creates the loader.
    #[must_use]
    pub const fn new(service: CommentService) -> Self {
        Self { service }
    }
}

impl Loader for CommentsLoader {
    type Key = u64;
    type Output = Vec<Comment>;

    async fn load(&self, task_id: &u64) -> Result<Vec<Comment>, ApiError> {
        self.service.list(*task_id).await
    }

    fn should_load(&self, task_id: &u64) -> bool {
        *task_id != 0
    }
}

/// Loads the change log of a task.
#[derive(Debug, Clone)]
pub struct TaskLogsLoader {
    service: TaskService,
}

impl TaskLogsLoader {
    /// Creates the loader.
    #[must_use]
    pub const fn new(service: TaskService) -> Self {
        Self { service }
    }
}

impl Loader for TaskLogsLoader {
    type Key = u64;
    type Output = Vec<TaskLog>;

    async fn load(&self, task_id: &u64) -> Result<Vec<TaskLog>, ApiError> {
        self.service.logs(*task_id).await
    }

    fn should_load(&self, task_id: &u64) -> bool {
        *task_id != 0
    }
}

/// Loads one legacy candidate by id.
#[derive(Debug, Clone)]
pub struct CandidateLoader {
    service: CandidateService,
}

impl CandidateLoader {
    /// Creates the loader.
    #[must_use]
    pub const fn new(service: CandidateService) -> Self {
        Self { service }
    }
}

impl Loader for CandidateLoader {
    type Key = u64;
    type Output = Candidate;

    async fn load(&self, id: &u64) -> Result<Candidate, ApiError> {
        self.service.get(*id).await
    }

    fn should_load(&self, id: &u64) -> bool {
        *id != 0
    }
}

/// Loads one page of legacy candidates with totals.
#[derive(Debug, Clone)]
pub struct CandidateListLoader {
    service: CandidateService,
}

impl CandidateListLoader {
    /// Creates the loader.
    #[must_use]
    pub const fn new(service: CandidateService) -> Self {
        Self { service }
    }
}

impl Loader for CandidateListLoader {
    type Key = PaginationParams;
    type Output = CandidateListResponse;

    async fn load(&self, params: &PaginationParams) -> Result<CandidateListResponse, ApiError> {
        self.service.list(params).await
    }
}

/// Hook over a single task.
pub type TaskHook = Hook<TaskLoader>;
/// Hook over a task list.
pub type TaskListHook = Hook<TaskListLoader>;
/// Hook over a task's comments.
pub type CommentsHook = Hook<CommentsLoader>;
/// Hook over a task's change log.
pub type TaskLogsHook = Hook<TaskLogsLoader>;
/// Hook over a legacy candidate.
pub type CandidateHook = Hook<CandidateLoader>;
/// Hook over a page of legacy candidates.
pub type CandidateListHook = Hook<CandidateListLoader>;
