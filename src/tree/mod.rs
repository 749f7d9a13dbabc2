//! Lazily expandable comment trees.
//!
//! [`build`] turns a nested thread response into a [`SubmissionNode`],
//! [`reassemble`] turns a flat "load more" response into an empty-rooted
//! [`CommentNode`] forest, and [`MoreComments`] thunks bridge the two by
//! fetching whatever the server held back.

pub mod build;
mod fetch;
mod more;
mod node;
pub mod reassemble;

pub use fetch::{fetch_comment_tree, fetch_more_children, find_comment_tree, ThreadQuery};
pub use more::{MoreComments, MoreKind};
pub use node::{CommentNode, Node, SubmissionNode};
