//! Comment-subtree nodes.

use crate::models::{Comment, Submission};
use crate::tree::more::MoreComments;

/// A node of a lazily expandable comment tree.
///
/// `value` is `None` for a synthetic root: the forest returned by a
/// "load more" lookup, or a submission's comments split off with
/// [`Node::into_forest`]. Such a node is skipped by traversals and its
/// children sit at the node's own depth.
///
/// `children` keep the server's display order. `more`, when present, stands
/// for further siblings of `children` that have not been fetched yet.
#[derive(Debug, Clone)]
pub struct Node<T> {
    pub value: Option<T>,
    pub children: Vec<CommentNode>,
    pub more: Option<MoreComments>,
}

/// A comment and its replies.
pub type CommentNode = Node<Comment>;

/// A submission and its top-level comments.
pub type SubmissionNode = Node<Submission>;

impl<T> Node<T> {
    pub fn new(value: T, children: Vec<CommentNode>, more: Option<MoreComments>) -> Self {
        Self {
            value: Some(value),
            children,
            more,
        }
    }

    /// A node with a value, no children and nothing left to fetch.
    pub fn leaf(value: T) -> Self {
        Self::new(value, Vec::new(), None)
    }

    /// A synthetic root holding only children and a continuation.
    pub fn empty(children: Vec<CommentNode>, more: Option<MoreComments>) -> Self {
        Self {
            value: None,
            children,
            more,
        }
    }

    pub fn is_empty_value(&self) -> bool {
        self.value.is_none()
    }

    pub fn has_more(&self) -> bool {
        self.more.is_some()
    }

    /// Attach a continuation after construction.
    pub fn set_more(&mut self, more: MoreComments) {
        self.more = Some(more);
    }

    /// Split into the value and an empty-rooted forest of the same
    /// children and continuation.
    ///
    /// Traversing the forest reports the top-level comments at depth 0
    /// without repeating the value anywhere in the tree.
    pub fn into_forest(self) -> (Option<T>, CommentNode) {
        (self.value, Node::empty(self.children, self.more))
    }

    /// Number of valued nodes currently materialized below this node,
    /// excluding the node itself.
    pub fn materialized_count(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&CommentNode> = self.children.iter().collect();
        while let Some(node) = stack.pop() {
            if node.value.is_some() {
                count += 1;
            }
            stack.extend(node.children.iter());
        }
        count
    }

    /// Number of unexpanded continuations below and including this node.
    pub fn pending_more_count(&self) -> usize {
        let mut count = usize::from(self.more.is_some());
        let mut stack: Vec<&CommentNode> = self.children.iter().collect();
        while let Some(node) = stack.pop() {
            count += usize::from(node.more.is_some());
            stack.extend(node.children.iter());
        }
        count
    }
}

impl CommentNode {
    /// Fullnames of every materialized comment, in depth-first order.
    ///
    /// Fetches nothing; useful for checking what a tree already holds.
    pub fn fullnames(&self) -> Vec<String> {
        let mut names = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if let Some(comment) = &node.value {
                names.push(comment.fullname());
            }
            stack.extend(node.children.iter().rev());
        }
        names
    }
}
