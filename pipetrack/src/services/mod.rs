//! Typed wrappers over the backend REST resources.
//!
//! Each method maps one-to-one onto an endpoint and HTTP verb. No method
//! validates, paginates or caches; errors propagate unchanged from the
//! [`ApiClient`](crate::api::ApiClient).

pub mod auth;
pub mod candidates;
pub mod comments;
pub mod tasks;

pub use auth::AuthService;
pub use candidates::CandidateService;
pub use comments::CommentService;
pub use tasks::TaskService;
