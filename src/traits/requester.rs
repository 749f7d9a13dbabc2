//! The request capability the comment-tree core depends on.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

use crate::error::Result;

/// Request parameters, sent as a query string or a form body.
pub type Params = BTreeMap<String, String>;

/// A requester shared between a tree and the thunks embedded in it.
pub type SharedRequester = Arc<dyn Requester>;

/// Perform one API request and return the decoded JSON body.
///
/// [`RedditClient`](crate::RedditClient) is the HTTP implementation. Tree
/// builders and [`MoreComments`](crate::MoreComments) thunks only ever talk to
/// this trait, so tests can substitute a scripted implementation.
///
/// Errors from the implementation are propagated untouched by every caller in
/// this crate.
#[async_trait]
pub trait Requester: Send + Sync {
    /// Send `method` to `path` (relative to the API base) with `params`.
    async fn request(&self, method: Method, path: &str, params: &Params) -> Result<Value>;
}
