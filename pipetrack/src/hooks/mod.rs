//! Refetchable load/error state containers.
//!
//! A [`Hook`] wraps one [`Loader`] behind a uniform lifecycle: mounting
//! issues exactly one load, changing the key or calling
//! [`refetch`](Hook::refetch) issues another, and every settled state holds
//! either data or an error message, never both.
//!
//! Loads are not de-duplicated or cached between hooks. Each dispatch takes
//! a sequence number; a response commits only if its number is still the
//! latest issued and the hook is still mounted, so a slow earlier response
//! can never overwrite a newer one.

pub mod auth;
pub mod loaders;

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use parking_lot::Mutex;
use tokio::sync::watch;

use crate::api::ApiError;

pub use auth::AuthHook;
pub use loaders::{
    CandidateHook, CandidateListHook, CandidateListLoader, CandidateLoader, CommentsHook,
    CommentsLoader, TaskHook, TaskListHook, TaskListKey, TaskListLoader, TaskLoader, TaskLogsHook,
    TaskLogsLoader,
};

/// One service call, parameterized by a key.
pub trait Loader: Send + Sync + 'static {
    /// Input the load depends on (an id, list parameters, ...).
    type Key: Clone + PartialEq + fmt::Debug + Send + Sync + 'static;
    /// Value produced on success.
    type Output: Clone + Send + Sync + 'static;

    /// Performs the load.
    fn load(
        &self,
        key: &Self::Key,
    ) -> impl Future<Output = Result<Self::Output, ApiError>> + Send;

    /// Whether `key` warrants a request at all.
    fn should_load(&self, _key: &Self::Key) -> bool {
        true
    }
}

/// Observable state of a hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookState<T> {
    /// Last successfully loaded value.
    pub data: Option<T>,
    /// A load is in flight.
    pub loading: bool,
    /// Message of the last failed load.
    pub error: Option<String>,
}

impl<T> HookState<T> {
    const fn loading() -> Self {
        Self {
            data: None,
            loading: true,
            error: None,
        }
    }
}

struct Shared<K, T> {
    key: Mutex<K>,
    issued: AtomicU64,
    mounted: AtomicBool,
    state: watch::Sender<HookState<T>>,
}

impl<K, T> Shared<K, T> {
    fn commit(&self, seq: u64, result: Result<T, ApiError>) {
        if !self.mounted.load(Ordering::Acquire) {
            tracing::debug!(seq, "discarding response for unmounted hook");
            return;
        }
        self.state.send_if_modified(|state| {
            let latest = self.issued.load(Ordering::Acquire);
            if latest != seq {
                tracing::debug!(seq, latest, "discarding stale response");
                return false;
            }
            match result {
                Ok(value) => {
                    state.data = Some(value);
                    state.error = None;
                }
                Err(e) => {
                    state.data = None;
                    state.error = Some(e.to_string());
                }
            }
            state.loading = false;
            true
        });
    }
}

/// A mounted state container around a [`Loader`].
///
/// Dropping the hook unmounts it: responses still in flight are discarded
/// when they arrive.
pub struct Hook<L: Loader> {
    loader: Arc<L>,
    shared: Arc<Shared<L::Key, L::Output>>,
}

impl<L: Loader> Hook<L> {
    /// Mounts the hook and issues the first load for `key`.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn mount(loader: L, key: L::Key) -> Self {
        let (state, _) = watch::channel(HookState::loading());
        let hook = Self {
            loader: Arc::new(loader),
            shared: Arc::new(Shared {
                key: Mutex::new(key),
                issued: AtomicU64::new(0),
                mounted: AtomicBool::new(true),
                state,
            }),
        };
        hook.dispatch(None);
        hook
    }

    /// Re-issues the load for the current key.
    pub fn refetch(&self) {
        self.dispatch(None);
    }

    /// Replaces the key and reloads, unless the key is unchanged.
    pub fn set_key(&self, key: L::Key) {
        self.dispatch(Some(key));
    }

    /// The key the most recent load was issued for.
    #[must_use]
    pub fn key(&self) -> L::Key {
        self.shared.key.lock().clone()
    }

    /// A copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> HookState<L::Output> {
        self.shared.state.borrow().clone()
    }

    /// `true` while a load is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.shared.state.borrow().loading
    }

    /// Receiver notified on every committed change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<HookState<L::Output>> {
        self.shared.state.subscribe()
    }

    /// Waits until no load is in flight and returns that state.
    pub async fn settled(&self) -> HookState<L::Output> {
        let mut rx = self.shared.state.subscribe();
        let settled = rx.wait_for(|state| !state.loading).await.map(|s| s.clone());
        settled.unwrap_or_else(|_| self.snapshot())
    }

    /// Unmounts the hook; equivalent to dropping it.
    pub fn unmount(self) {}

    fn dispatch(&self, new_key: Option<L::Key>) {
        // The loading flag is published under the key lock so that a later
        // dispatch can never settle before an earlier one marks itself loading.
        let mut current = self.shared.key.lock();
        if let Some(key) = new_key {
            if *current == key {
                return;
            }
            *current = key;
        }
        let seq = self.shared.issued.fetch_add(1, Ordering::AcqRel) + 1;
        let key = current.clone();

        if !self.loader.should_load(&key) {
            tracing::debug!(?key, "key does not warrant a load");
            self.shared.state.send_modify(|state| {
                state.data = None;
                state.error = None;
                state.loading = false;
            });
            return;
        }

        tracing::debug!(?key, seq, "dispatching load");
        self.shared.state.send_modify(|state| state.loading = true);
        drop(current);

        let loader = Arc::clone(&self.loader);
        let shared = Arc::clone(&self.shared);
        tokio::spawn(async move {
            let result = loader.load(&key).await;
            shared.commit(seq, result);
        });
    }
}

impl<L: Loader> Drop for Hook<L> {
    fn drop(&mut self) {
        self.shared.mounted.store(false, Ordering::Release);
    }
}

impl<L: Loader> fmt::Debug for Hook<L>
where
    L::Output: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hook")
            .field("key", &self.key())
            .field("state", &*self.shared.state.borrow())
            .finish_non_exhaustive()
    }
}
