//! Session store: the bearer token and the cached user profile.
//!
//! [`SessionStore`] is the single owner of session state. The HTTP client
//! and the front end receive a handle to it explicitly; nothing reaches it
//! through a global. No expiry is tracked locally: an expired token is only
//! discovered when the backend rejects a request.

pub mod store;

use std::fmt;
use std::sync::Arc;

use pipetrack_proto::user::User;

pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};

/// Storage key holding the opaque bearer token.
pub const TOKEN_KEY: &str = "auth_token";

/// Storage key holding the JSON-serialized user profile.
pub const USER_KEY: &str = "user";

/// Cloneable handle to the session state.
///
/// All clones share the same backing store.
#[derive(Clone)]
pub struct SessionStore {
    backend: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    /// Creates a session store over the given backend.
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Creates a session store that lives only as long as the process.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// Persists the token and the user profile.
    ///
    /// Either both values are stored or, on failure, the token is removed
    /// again so a half-written session never counts as authenticated.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if either value cannot be stored.
    pub fn set_session(&self, token: &str, user: &User) -> Result<(), StoreError> {
        let user_json = serde_json::to_string(user)?;
        self.backend.set(TOKEN_KEY, token)?;
        if let Err(e) = self.backend.set(USER_KEY, &user_json) {
            if let Err(rollback) = self.backend.remove(TOKEN_KEY) {
                tracing::error!(error = %rollback, "failed to roll back session token");
            }
            return Err(e);
        }
        Ok(())
    }

    /// The stored bearer token, if any.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.backend.get(TOKEN_KEY)
    }

    /// The cached user profile, if present and parseable.
    ///
    /// A profile that fails to parse is reported as absent.
    #[must_use]
    pub fn user(&self) -> Option<User> {
        let raw = self.backend.get(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(error = %e, "cached user profile is not valid JSON");
                None
            }
        }
    }

    /// Removes both the token and the user profile.
    ///
    /// Clearing an already-empty session is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the removal cannot be persisted.
    pub fn clear_session(&self) -> Result<(), StoreError> {
        self.backend.remove(TOKEN_KEY)?;
        self.backend.remove(USER_KEY)
    }

    /// `true` iff a token is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}
