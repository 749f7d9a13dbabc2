//! Level-order traversal.

use std::collections::VecDeque;
use std::mem;

use futures::stream::{self, Stream};

use crate::error::{RedditError, Result};
use crate::traversal::Visit;
use crate::tree::{CommentNode, MoreComments};

/// Walk `root` level by level.
///
/// Within a level every materialized node is visited before any of that
/// level's thunks is invoked. Thunk results join the same level, and a
/// result's own continuation is invoked before the level's other pending
/// thunks. The next level starts only once the current one has neither
/// nodes nor thunks left.
pub fn breadth_first(root: CommentNode) -> BreadthFirst {
    BreadthFirst {
        level: VecDeque::from([root]),
        pending: VecDeque::new(),
        next_level: Vec::new(),
        next_pending: Vec::new(),
        depth: 0,
        finished: false,
    }
}

/// Breadth-first walker returned by [`breadth_first`].
#[derive(Debug)]
pub struct BreadthFirst {
    level: VecDeque<CommentNode>,
    pending: VecDeque<MoreComments>,
    next_level: Vec<CommentNode>,
    next_pending: Vec<MoreComments>,
    depth: usize,
    finished: bool,
}

impl BreadthFirst {
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
        loop {
            if let Some(node) = self.level.pop_front() {
                match node.value {
                    Some(comment) => {
                        self.next_level.extend(node.children);
                        self.next_pending.extend(node.more);
                        return Ok(Some((self.depth, comment)));
                    }
                    None => {
                        self.level.extend(node.children);
                        if let Some(more) = node.more {
                            self.pending.push_front(more);
                        }
                    }
                }
                continue;
            }

            if let Some(more) = self.pending.pop_front() {
                let expanded = more.fetch().await?;
                self.level.push_back(expanded);
                continue;
            }

            if self.next_level.is_empty() && self.next_pending.is_empty() {
                return Ok(None);
            }
            self.level = mem::take(&mut self.next_level).into();
            self.pending = mem::take(&mut self.next_pending).into();
            self.depth += 1;
        }
    }
}
