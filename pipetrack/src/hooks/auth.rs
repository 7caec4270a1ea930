//! Authentication state for the front end.

use parking_lot::Mutex;
use pipetrack_proto::user::{LoginInput, RegisterInput, User};

use crate::api::ApiError;
use crate::services::AuthService;
use crate::session::StoreError;

#[derive(Debug, Default)]
struct AuthState {
    user: Option<User>,
    loading: bool,
    error: Option<String>,
}

/// Current user plus login/register/logout actions.
///
/// Unlike the resource hooks, failures are both recorded in
/// [`error`](Self::error) and returned, so a form can react to them.
#[derive(Debug)]
pub struct AuthHook {
    service: AuthService,
    state: Mutex<AuthState>,
}

impl AuthHook {
    /// Creates the hook, picking up a user already stored in the session.
    #[must_use]
    pub fn new(service: AuthService) -> Self {
        let user = service.current_user();
        Self {
            service,
            state: Mutex::new(AuthState {
                user,
                ..AuthState::default()
            }),
        }
    }

    /// The logged-in user, if any.
    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.state.lock().user.clone()
    }

    /// `true` while a login or registration is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.lock().loading
    }

    /// Message of the last failed action.
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.state.lock().error.clone()
    }

    /// `true` iff a user is known and a token is stored.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.lock().user.is_some() && self.service.is_authenticated()
    }

    fn begin(&self) {
        let mut state = self.state.lock();
        state.loading = true;
        state.error = None;
    }

    fn finish(&self, error: Option<&ApiError>) {
        let mut state = self.state.lock();
        state.loading = false;
        state.error = error.map(ToString::to_string);
    }

    /// Logs in and remembers the user.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] from the login call.
    pub async fn login(&self, input: &LoginInput) -> Result<User, ApiError> {
        self.begin();
        match self.service.login(input).await {
            Ok(response) => {
                self.state.lock().user = Some(response.user.clone());
                self.finish(None);
                Ok(response.user)
            }
            Err(e) => {
                self.finish(Some(&e));
                Err(e)
            }
        }
    }

    /// Registers a new account. The caller still has to log in.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] from the registration call.
    pub async fn register(&self, input: &RegisterInput) -> Result<(), ApiError> {
        self.begin();
        let result = self.service.register(input).await;
        self.finish(result.as_ref().err());
        result
    }

    /// Forgets the session and the user.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the session cannot be cleared.
    pub fn logout(&self) -> Result<(), StoreError> {
        self.state.lock().user = None;
        self.service.logout()
    }
}
