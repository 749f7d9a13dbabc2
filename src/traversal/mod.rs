//! Traversals over lazily expandable comment trees.
//!
//! Every traversal yields `(depth, comment)` pairs and expands
//! [`MoreComments`](crate::MoreComments) thunks inline, one at a time, when
//! the walk reaches them. A node with a value is reported at its depth and its
//! children sit one level deeper; an empty-valued node reports nothing and its
//! children sit at its own depth. Thunk results are empty-rooted, so expanded
//! comments always share the depth of the siblings they continue.
//!
//! A failed expansion ends the traversal with that error.

mod breadth_first;
mod depth_first;
mod recursive;

pub use breadth_first::{breadth_first, BreadthFirst};
pub use depth_first::{depth_first, DepthFirst};
pub use recursive::depth_first_recursive;

use crate::models::Comment;

/// A traversal item: the depth and the comment found there.
pub type Visit = (usize, Comment);

#[cfg(test)]
mod tests;
