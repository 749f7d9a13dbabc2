//! "Load more" thunks.

use std::fmt;

use reqwest::Method;

use crate::error::{RedditError, Result};
use crate::models::thing::{COMMENT_PREFIX, SUBMISSION_PREFIX};
use crate::models::{CommentSort, MoreStub};
use crate::traits::{Params, SharedRequester};
use crate::tree::node::{CommentNode, Node};
use crate::tree::{fetch, reassemble};

/// What a [`MoreComments`] thunk fetches when invoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoreKind {
    /// Sibling comments listed by id, fetched through `/api/morechildren`.
    Children {
        /// Base-36 ids still to fetch, in display order.
        ids: Vec<String>,
        /// Number of comments the server says are hidden behind the stub.
        count: u64,
    },
    /// The reply chain continues below the server's depth cutoff and must be
    /// re-fetched as a thread focused on `comment_id36`.
    ContinueThread { comment_id36: String },
}

/// A deferred handle to comments that have not been fetched yet.
///
/// Each call to [`MoreComments::fetch`] performs one request and returns a
/// fresh empty-rooted node; nothing is cached.
#[derive(Clone)]
pub struct MoreComments {
    client: SharedRequester,
    submission_id36: String,
    /// Base-36 id of the parent comment, `None` at the top level.
    parent: Option<String>,
    sort: Option<CommentSort>,
    kind: MoreKind,
}

impl fmt::Debug for MoreComments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MoreComments")
            .field("submission_id36", &self.submission_id36)
            .field("parent", &self.parent)
            .field("sort", &self.sort)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl MoreComments {
    pub fn new(
        client: SharedRequester,
        submission_id36: impl Into<String>,
        parent: Option<String>,
        sort: Option<CommentSort>,
        kind: MoreKind,
    ) -> Self {
        Self {
            client,
            submission_id36: submission_id36.into(),
            parent,
            sort,
            kind,
        }
    }

    /// Build a thunk from a wire `more` stub.
    ///
    /// # Errors
    ///
    /// Returns [`RedditError::MalformedResponse`] if the stub's parent is
    /// neither a comment nor a submission, or if a continue-thread stub
    /// hangs directly off the submission.
    pub fn from_stub(
        client: &SharedRequester,
        submission_id36: &str,
        sort: Option<CommentSort>,
        stub: MoreStub,
    ) -> Result<Self> {
        let parent = if let Some(id) = stub.parent_id.strip_prefix(COMMENT_PREFIX) {
            Some(id.to_string())
        } else if stub.parent_id.starts_with(SUBMISSION_PREFIX) {
            None
        } else {
            return Err(RedditError::malformed(format!(
                "more stub has unexpected parent '{}'",
                stub.parent_id
            )));
        };

        let kind = if stub.is_continue_thread() {
            let comment_id36 = parent.clone().ok_or_else(|| {
                RedditError::malformed("continue-thread stub attached to the submission")
            })?;
            MoreKind::ContinueThread { comment_id36 }
        } else {
            MoreKind::Children {
                ids: stub.children,
                count: stub.count,
            }
        };

        Ok(Self::new(
            client.clone(),
            submission_id36,
            parent,
            sort,
            kind,
        ))
    }

    pub fn submission_id36(&self) -> &str {
        &self.submission_id36
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub fn sort(&self) -> Option<CommentSort> {
        self.sort
    }

    pub fn kind(&self) -> &MoreKind {
        &self.kind
    }

    pub fn is_continue_thread(&self) -> bool {
        matches!(self.kind, MoreKind::ContinueThread { .. })
    }

    /// Fetch the comments behind this stub.
    ///
    /// The returned node has no value; its children are the newly fetched
    /// siblings and its `more` is whatever the server still holds back.
    ///
    /// # Errors
    ///
    /// Propagates any error from the requester or the tree builders.
    #[tracing::instrument(skip(self), fields(submission = %self.submission_id36, parent = ?self.parent))]
    pub async fn fetch(&self) -> Result<CommentNode> {
        let node = match &self.kind {
            MoreKind::Children { ids, .. } => {
                if ids.is_empty() {
                    tracing::debug!("more stub lists no ids, nothing to fetch");
                    return Ok(Node::empty(Vec::new(), None));
                }
                self.fetch_children(ids).await?
            }
            MoreKind::ContinueThread { comment_id36 } => {
                self.fetch_continuation(comment_id36).await?
            }
        };

        tracing::debug!(
            fetched = node.materialized_count(),
            more = node.pending_more_count(),
            "expanded more comments"
        );
        Ok(node)
    }

    async fn fetch_children(&self, ids: &[String]) -> Result<CommentNode> {
        let mut params = Params::new();
        params.insert("api_type".to_string(), "json".to_string());
        params.insert(
            "link_id".to_string(),
            format!("{SUBMISSION_PREFIX}{}", self.submission_id36),
        );
        params.insert("children".to_string(), ids.join(","));
        params.insert("limit_children".to_string(), "false".to_string());
        if let Some(sort) = self.sort {
            params.insert("sort".to_string(), sort.as_str().to_string());
        }

        let body = self
            .client
            .request(Method::GET, fetch::MORE_CHILDREN_PATH, &params)
            .await?;

        reassemble::reassemble_response(&self.client, &self.submission_id36, self.sort, &body)
    }

    async fn fetch_continuation(&self, comment_id36: &str) -> Result<CommentNode> {
        let query = fetch::ThreadQuery {
            comment: Some(comment_id36.to_string()),
            sort: self.sort,
            ..Default::default()
        };
        let tree = fetch::fetch_comment_tree(&self.client, &self.submission_id36, &query).await?;

        // The focused comment is already in the caller's tree; only what lies
        // beneath it is new.
        let (_, forest) = tree.into_forest();
        let focused = forest
            .children
            .into_iter()
            .find(|c| c.value.as_ref().is_some_and(|v| v.id == comment_id36));

        match focused {
            Some(node) => Ok(Node::empty(node.children, node.more)),
            None => Err(RedditError::malformed(format!(
                "continued thread does not hold comment '{comment_id36}'"
            ))),
        }
    }
}
