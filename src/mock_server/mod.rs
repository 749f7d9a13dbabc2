//! Mock Reddit API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the two
//! Reddit endpoints a comment-tree walk needs: thread fetches and "load
//! more" lookups. Unlike wiremock which mocks at the HTTP level per-test,
//! this server truncates threads the way Reddit does, so every kind of
//! `more` expansion can be exercised against one consistent dataset.
//!
//! # Example
//!
//! ```ignore
//! use redtree::mock_server::MockServer;
//! use redtree::{depth_first, fetch_comment_tree, RedditClient, ThreadQuery};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = RedditClient::new("test-token", server.url()).unwrap().shared();
//!
//!     // Server comes with default fixtures
//!     let tree = fetch_comment_tree(&client, "abc", &ThreadQuery::default()).await.unwrap();
//!     let (_, comments) = tree.into_forest();
//!     let mut walk = depth_first(comments);
//!     while let Some((depth, comment)) = walk.try_next().await.unwrap() {
//!         println!("{depth} {}", comment.id);
//!     }
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{DefaultScenario, Fixtures};
pub use server::MockServer;
pub use state::{MockState, ThreadLimits};
