//! Shared wire types for the `Pipetrack` backend REST API.
//!
//! Every type here mirrors a JSON document the backend sends or accepts.
//! The backend owns these records; the client only holds transient copies.

pub mod candidate;
pub mod comment;
pub mod endpoints;
pub mod query;
pub mod task;
pub mod user;

/// First page number used when a list request does not specify one.
pub const DEFAULT_PAGE: u32 = 1;

/// Page size used when a list request does not specify one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;
