//! Legacy `/candidates` endpoints.

use pipetrack_proto::candidate::{
    Candidate, CandidateListResponse, CreateCandidateInput, UpdateCandidateInput,
};
use pipetrack_proto::endpoints;
use pipetrack_proto::query::PaginationParams;
use serde::de::IgnoredAny;

use crate::api::{ApiClient, ApiError, NO_BODY, RequestOptions};

/// Typed access to `/candidates`.
#[derive(Debug, Clone)]
pub struct CandidateService {
    client: ApiClient,
}

impl CandidateService {
    /// Creates the service over `client`.
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// `GET /candidates`: one page plus totals.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`].
    pub async fn list(&self, params: &PaginationParams) -> Result<CandidateListResponse, ApiError> {
        let options = RequestOptions::new().params(params.to_query());
        self.client.get(endpoints::CANDIDATES, &options).await
    }

    /// `GET /candidates/{id}`.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`].
    pub async fn get(&self, id: u64) -> Result<Candidate, ApiError> {
        self.client
            .get(&endpoints::candidate(id), &RequestOptions::new())
            .await
    }

    /// `POST /candidates`.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`].
    pub async fn create(&self, input: &CreateCandidateInput) -> Result<Candidate, ApiError> {
        self.client
            .post(endpoints::CANDIDATES, Some(input), &RequestOptions::new())
            .await
    }

    /// `PUT /candidates/{id}`.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`].
    pub async fn update(
        &self,
        id: u64,
        input: &UpdateCandidateInput,
    ) -> Result<Candidate, ApiError> {
        self.client
            .put(&endpoints::candidate(id), Some(input), &RequestOptions::new())
            .await
    }

    /// `DELETE /candidates/{id}` (soft delete).
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`].
    pub async fn delete(&self, id: u64) -> Result<(), ApiError> {
        let _: IgnoredAny = self
            .client
            .delete(&endpoints::candidate(id), &RequestOptions::new())
            .await?;
        Ok(())
    }

    /// `POST /candidates/{id}/archive`.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`].
    pub async fn archive(&self, id: u64) -> Result<(), ApiError> {
        let _: IgnoredAny = self
            .client
            .post(&endpoints::candidate_archive(id), NO_BODY, &RequestOptions::new())
            .await?;
        Ok(())
    }

    /// `POST /candidates/{id}/unarchive`.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`].
    pub async fn unarchive(&self, id: u64) -> Result<(), ApiError> {
        let _: IgnoredAny = self
            .client
            .post(
                &endpoints::candidate_unarchive(id),
                NO_BODY,
                &RequestOptions::new(),
            )
            .await?;
        Ok(())
    }
}
