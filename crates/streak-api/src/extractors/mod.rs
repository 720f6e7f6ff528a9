//! Axum extractors for request handling
//!
//! Custom extractors for validation, typed path ids, query parameters, and the
//! requesting account.

mod path;
mod query;
mod requester;
mod validated;

pub use path::{MemberIdPath, TaskIdPath};
pub use query::{DateParam, ModeParam};
pub use requester::{Requester, REQUESTER_HEADER};
pub use validated::ValidatedJson;
