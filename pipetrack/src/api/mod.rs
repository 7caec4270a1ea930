//! HTTP client for the backend REST API.
//!
//! [`ApiClient`] builds URLs, attaches the bearer token from the
//! [`SessionStore`](crate::session::SessionStore), dispatches one attempt per
//! call and normalizes every response into a [`ResponseBody`] or an
//! [`ApiError`]. There are no retries, timeouts or cancellation.

pub mod body;
pub mod client;

pub use body::ResponseBody;
pub use client::{ApiClient, NO_BODY, RequestOptions};

use crate::session::StoreError;

/// Status code that invalidates the session.
pub const UNAUTHORIZED: u16 = 401;

/// Errors surfaced by the HTTP client.
///
/// Validation errors and server faults are not distinguished: both arrive
/// as [`ApiError::Http`] carrying a flat message.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced an HTTP response (DNS, connect, reset).
    #[error("request failed: {0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    ///
    /// Displays as the extracted message alone.
    #[error("{message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Message taken from the body's `error`/`message` field or raw text.
        message: String,
    },

    /// A success body did not match the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),

    /// The base URL and path do not form a valid URL.
    #[error("invalid request URL: {0}")]
    InvalidUrl(String),

    /// The session could not be persisted after a successful login.
    #[error("session storage failed: {0}")]
    Session(#[from] StoreError),
}

impl ApiError {
    /// The HTTP status, if the backend responded.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// `true` for a 401 response.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Http { status, .. } if *status == UNAUTHORIZED)
    }
}
