//! Reddit comment-tree client library.
//!
//! Fetches comment threads, rebuilds them as trees whose "load more" stubs
//! stay lazy, and walks them breadth-first or depth-first while expanding
//! those stubs on demand.
//!
//! # Quick Start
//!
//! ```no_run
//! use redtree::{breadth_first, fetch_comment_tree, RedditClient, ThreadQuery};
//!
//! #[tokio::main]
//! async fn main() -> redtree::Result<()> {
//!     // Create client from environment variables
//!     let client = RedditClient::from_env()?.shared();
//!
//!     // Fetch the thread; unfetched replies become `MoreComments` thunks
//!     let tree = fetch_comment_tree(&client, "abc123", &ThreadQuery::default()).await?;
//!     let (submission, comments) = tree.into_forest();
//!     if let Some(submission) = submission {
//!         println!("{}", submission.title);
//!     }
//!
//!     // Walk every comment, fetching "load more" stubs as they are reached
//!     let mut walk = breadth_first(comments);
//!     while let Some((depth, comment)) = walk.try_next().await? {
//!         println!("{}{}", "  ".repeat(depth), comment.body);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`Requester`] - the single request capability everything depends on;
//!   [`RedditClient`] implements it over HTTP
//! - [`Node`] - a tree node with an optional value, ordered children and an
//!   optional [`MoreComments`] thunk for siblings not yet fetched
//! - [`tree::build`] and [`tree::reassemble`] - turn nested thread responses
//!   and flat "load more" responses into nodes
//! - [`breadth_first`], [`depth_first`], [`depth_first_recursive`] - lazy
//!   `(depth, comment)` traversals
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `REDDIT_ACCESS_TOKEN` (required) - OAuth bearer token
//! - `REDDIT_API_URL` (optional) - Base URL (defaults to `https://oauth.reddit.com`)
//! - `REDDIT_USER_AGENT` (optional) - `User-Agent` header

pub mod cli;
mod client;
mod error;
mod models;
pub mod output;
mod traits;
pub mod traversal;
pub mod tree;

#[cfg(feature = "test-server")]
pub mod mock_server;

#[cfg(test)]
mod testing;

// Re-export core types
pub use client::RedditClient;
pub use error::{ApiFault, RedditError, Result};

// Re-export traits
pub use traits::{Get, Params, Requester, SharedRequester};

// Re-export models
pub use models::{thing, Comment, CommentSort, MoreStub, Submission, Thing};

// Re-export tree types and operations
pub use tree::{
    fetch_comment_tree, fetch_more_children, find_comment_tree, CommentNode, MoreComments,
    MoreKind, Node, SubmissionNode, ThreadQuery,
};

// Re-export traversals
pub use traversal::{
    breadth_first, depth_first, depth_first_recursive, BreadthFirst, DepthFirst, Visit,
};
