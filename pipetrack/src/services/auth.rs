//! Registration, login and the local side of logout.

use pipetrack_proto::endpoints;
use pipetrack_proto::user::{LoginInput, LoginResponse, RegisterInput, User};
use serde::de::IgnoredAny;

use crate::api::{ApiClient, ApiError, RequestOptions};
use crate::session::{SessionStore, StoreError};

/// Authentication endpoints plus session bookkeeping.
#[derive(Debug, Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    /// Creates the service over `client`.
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    fn session(&self) -> &SessionStore {
        self.client.session()
    }

    /// `POST /auth/register`. The new user still has to log in.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the backend rejects the registration.
    pub async fn register(&self, input: &RegisterInput) -> Result<(), ApiError> {
        let _: IgnoredAny = self
            .client
            .post(endpoints::AUTH_REGISTER, Some(input), &RequestOptions::public())
            .await?;
        tracing::info!(email = %input.email, "registered");
        Ok(())
    }

    /// `POST /auth/login`, then persists the token and profile.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the credentials are rejected or the session
    /// cannot be stored.
    pub async fn login(&self, input: &LoginInput) -> Result<LoginResponse, ApiError> {
        let response: LoginResponse = self
            .client
            .post(endpoints::AUTH_LOGIN, Some(input), &RequestOptions::public())
            .await?;
        if response.token.is_empty() {
            tracing::warn!("login response carried an empty token; session not stored");
        } else {
            self.session().set_session(&response.token, &response.user)?;
            tracing::info!(user_id = response.user.id, "logged in");
        }
        Ok(response)
    }

    /// Forgets the local session. The backend is not contacted.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the removal cannot be persisted.
    pub fn logout(&self) -> Result<(), StoreError> {
        self.session().clear_session()
    }

    /// The cached profile of the logged-in user.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.session().user()
    }

    /// `true` iff a token is stored.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session().is_authenticated()
    }
}
