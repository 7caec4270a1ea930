//! Task (pipeline item) endpoints.

use pipetrack_proto::endpoints;
use pipetrack_proto::query::PaginationParams;
use pipetrack_proto::task::{CreateTaskInput, Task, TaskLog, UpdateTaskInput};
use serde::de::IgnoredAny;

use crate::api::{ApiClient, ApiError, NO_BODY, RequestOptions};

/// Typed access to `/api/tasks`.
#[derive(Debug, Clone)]
pub struct TaskService {
    client: ApiClient,
}

impl TaskService {
    /// Creates the service over `client`.
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// `GET /api/tasks`: active tasks.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`].
    pub async fn list(&self, params: &PaginationParams) -> Result<Vec<Task>, ApiError> {
        let options = RequestOptions::new().params(params.to_query());
        self.client.get(endpoints::TASKS, &options).await
    }

    /// `GET /api/tasks/archived`: archived tasks.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`].
    pub async fn list_archived(&self, params: &PaginationParams) -> Result<Vec<Task>, ApiError> {
        let options = RequestOptions::new().params(params.to_query());
        self.client.get(endpoints::TASKS_ARCHIVED, &options).await
    }

    /// `GET /api/tasks/{id}`.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`].
    pub async fn get(&self, id: u64) -> Result<Task, ApiError> {
        self.client
            .get(&endpoints::task(id), &RequestOptions::new())
            .await
    }

    /// `POST /api/tasks`.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`].
    pub async fn create(&self, input: &CreateTaskInput) -> Result<Task, ApiError> {
        self.client
            .post(endpoints::TASKS, Some(input), &RequestOptions::new())
            .await
    }

    /// `PUT /api/tasks/{id}` with a partial task.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`].
    pub async fn update(&self, id: u64, input: &UpdateTaskInput) -> Result<Task, ApiError> {
        self.client
            .put(&endpoints::task(id), Some(input), &RequestOptions::new())
            .await
    }

    /// `DELETE /api/tasks/{id}` (soft delete on the backend).
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`].
    pub async fn delete(&self, id: u64) -> Result<(), ApiError> {
        let _: IgnoredAny = self
            .client
            .delete(&endpoints::task(id), &RequestOptions::new())
            .await?;
        Ok(())
    }

    /// `POST /api/tasks/{id}/archive`.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`].
    pub async fn archive(&self, id: u64) -> Result<(), ApiError> {
        let _: IgnoredAny = self
            .client
            .post(&endpoints::task_archive(id), NO_BODY, &RequestOptions::new())
            .await?;
        Ok(())
    }

    /// `POST /api/tasks/{id}/unarchive`.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`].
    pub async fn unarchive(&self, id: u64) -> Result<(), ApiError> {
        let _: IgnoredAny = self
            .client
            .post(&endpoints::task_unarchive(id), NO_BODY, &RequestOptions::new())
            .await?;
        Ok(())
    }

    /// `GET /api/tasks/{id}/logs`.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`].
    pub async fn logs(&self, id: u64) -> Result<Vec<TaskLog>, ApiError> {
        self.client
            .get(&endpoints::task_logs(id), &RequestOptions::new())
            .await
    }
}
