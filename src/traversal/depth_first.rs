//! Pre-order traversal with an explicit stack.

use futures::stream::{self, Stream};

use crate::error::{RedditError, Result};
use crate::traversal::Visit;
use crate::tree::{CommentNode, MoreComments};

/// Walk `root` in pre-order without recursion.
///
/// A node is visited, then each child's subtree, then the node's thunk is
/// invoked and its result walked at the children's depth.
pub fn depth_first(root: CommentNode) -> DepthFirst {
    DepthFirst {
        stack: vec![Pending::Node(root, 0)],
        finished: false,
    }
}

/// Work left on the stack: a materialized node, or a thunk not yet invoked.
#[derive(Debug)]
enum Pending {
    Node(CommentNode, usize),
    More(MoreComments, usize),
}

/// Depth-first walker returned by [`depth_first`].
#[derive(Debug)]
pub struct DepthFirst {
    stack: Vec<Pending>,
    finished: bool,
}

impl DepthFirst {
    /// Advance to the next comment, fetching as needed.
    ///
    /// Returns `Ok(None)` once the tree is exhausted. After an error the
    /// walker is finished.
    ///
    /// # Errors
    ///
    /// Propagates the first failed thunk expansion.
    pub async fn try_next(&mut self) -> Result<Option<Visit>> {
        if self.finished {
            return Ok(None);
        }
        match self.advance().await {
            Ok(Some(visit)) => Ok(Some(visit)),
            other => {
                self.finished = true;
                other
            }
        }
    }

    /// Convert into a stream of visits.
    pub fn into_stream(self) -> impl Stream<Item = Result<Visit>> + Send {
        stream::try_unfold(self, |mut walker| async move {
            Ok::<_, RedditError>(walker.try_next().await?.map(|visit| (visit, walker)))
        })
    }

    async fn advance(&mut self) -> Result<Option<Visit>> {
        while let Some(pending) = self.stack.pop() {
            match pending {
                Pending::Node(node, depth) => {
                    let child_depth = if node.value.is_some() { depth + 1 } else { depth };
                    // The thunk goes under the children so it runs after them.
                    if let Some(more) = node.more {
                        self.stack.push(Pending::More(more, child_depth));
                    }
                    self.stack.extend(
                        node.children
                            .into_iter()
                            .rev()
                            .map(|child| Pending::Node(child, child_depth)),
                    );
                    if let Some(comment) = node.value {
                        return Ok(Some((depth, comment)));
                    }
                }
                Pending::More(more, depth) => {
                    let expanded = more.fetch().await?;
                    self.stack.push(Pending::Node(expanded, depth));
                }
            }
        }
        Ok(None)
    }
}
