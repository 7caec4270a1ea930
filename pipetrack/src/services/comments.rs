//! Comment endpoints.

use pipetrack_proto::comment::{Comment, CreateCommentInput, UpdateCommentInput};
use pipetrack_proto::endpoints;
use serde::de::IgnoredAny;

use crate::api::{ApiClient, ApiError, RequestOptions};

/// Typed access to task comments.
#[derive(Debug, Clone)]
pub struct CommentService {
    client: ApiClient,
}

impl CommentService {
    /// Creates the service over `client`.
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// `GET /api/tasks/{task_id}/comments`.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`].
    pub async fn list(&self, task_id: u64) -> Result<Vec<Comment>, ApiError> {
        self.client
            .get(&endpoints::task_comments(task_id), &RequestOptions::new())
            .await
    }

    /// `POST /api/tasks/{task_id}/comments`.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`].
    pub async fn create(
        &self,
        task_id: u64,
        input: &CreateCommentInput,
    ) -> Result<Comment, ApiError> {
        self.client
            .post(
                &endpoints::task_comments(task_id),
                Some(input),
                &RequestOptions::new(),
            )
            .await
    }

    /// `PUT /api/comments/{id}`.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`].
    pub async fn update(&self, id: u64, input: &UpdateCommentInput) -> Result<Comment, ApiError> {
        self.client
            .put(&endpoints::comment(id), Some(input), &RequestOptions::new())
            .await
    }

    /// `DELETE /api/comments/{id}`.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`].
    pub async fn delete(&self, id: u64) -> Result<(), ApiError> {
        let _: IgnoredAny = self
            .client
            .delete(&endpoints::comment(id), &RequestOptions::new())
            .await?;
        Ok(())
    }
}
