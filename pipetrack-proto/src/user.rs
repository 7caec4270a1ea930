//! Users and the authentication exchange.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user profile as returned by `/auth/login`.
///
/// The same document is cached client-side next to the bearer token, so
/// the timestamps are optional: older cached profiles may lack them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User identifier, compared against `creator_id` for UI affordances.
    pub id: u64,
    /// Login e-mail.
    #[serde(default)]
    pub email: String,
    /// Display name.
    pub name: String,
    /// Account creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last profile update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of `POST /auth/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterInput {
    /// Display name.
    pub name: String,
    /// Login e-mail.
    pub email: String,
    /// Plain-text password, sent over TLS to the backend.
    pub password: String,
}

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginInput {
    /// Login e-mail.
    pub email: String,
    /// Plain-text password.
    pub password: String,
}

/// Successful `/auth/login` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Opaque bearer token.
    pub token: String,
    /// Profile of the logged-in user.
    pub user: User,
}
