//! Trait definitions for Reddit operations.
//!
//! [`Requester`] is the seam between the comment-tree core and the HTTP
//! transport; [`Get`] is implemented by entities fetched by identifier.

mod get;
mod requester;

pub use get::Get;
pub use requester::{Params, Requester, SharedRequester};
