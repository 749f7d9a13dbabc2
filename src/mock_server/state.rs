//! Mock server state management.
//!
//! Provides the in-memory data store for the mock Reddit API server.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{Comment, Submission};

/// How much of a thread the mock server returns per request.
///
/// Levels wider than `max_children` end in a "more" stub, replies deeper
/// than `max_depth` end in a continue-thread stub, and a morechildren
/// lookup materializes at most `max_more_children` of the requested ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadLimits {
    pub max_children: usize,
    pub max_depth: usize,
    pub max_more_children: usize,
}

impl Default for ThreadLimits {
    fn default() -> Self {
        Self {
            max_children: 200,
            max_depth: 10,
            max_more_children: 100,
        }
    }
}

/// Shared state for the mock server.
///
/// This struct holds all the mock data that the server will serve.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug, Default)]
pub struct MockState {
    /// Submissions indexed by base-36 id.
    pub submissions: HashMap<String, Submission>,

    /// Every comment, in display order.
    pub comments: Vec<Comment>,

    pub limits: ThreadLimits,

    /// Optional authentication token. If set, requests must include this token.
    pub required_token: Option<String>,

    /// Path and query of every request received, in arrival order. Requests
    /// rejected for a bad token are logged too.
    pub request_log: Vec<String>,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add a submission to the state.
    pub fn with_submission(mut self, submission: Submission) -> Self {
        self.submissions.insert(submission.id.clone(), submission);
        self
    }

    /// Append comments after the existing ones.
    pub fn with_comments(mut self, comments: impl IntoIterator<Item = Comment>) -> Self {
        self.comments.extend(comments);
        self
    }

    /// Set the per-request truncation limits.
    pub fn with_limits(mut self, limits: ThreadLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Set the required authentication token.
    pub fn with_required_token(mut self, token: &str) -> Self {
        self.required_token = Some(token.to_string());
        self
    }

    /// Get a submission by id.
    pub fn get_submission(&self, id: &str) -> Option<&Submission> {
        self.submissions.get(id)
    }

    /// Get a comment of a submission by id.
    pub fn get_comment(&self, submission_id: &str, id: &str) -> Option<&Comment> {
        self.comments
            .iter()
            .find(|c| c.id == id && c.submission_id36() == Some(submission_id))
    }

    /// Direct replies to `parent_fullname`, in display order.
    pub fn children_of(&self, parent_fullname: &str) -> Vec<&Comment> {
        self.comments
            .iter()
            .filter(|c| c.parent_id == parent_fullname)
            .collect()
    }

    /// Number of comments belonging to a submission.
    pub fn comment_count(&self, submission_id: &str) -> usize {
        self.comments
            .iter()
            .filter(|c| c.submission_id36() == Some(submission_id))
            .count()
    }

    /// Requests whose path starts with `prefix`.
    pub fn requests_to(&self, prefix: &str) -> Vec<&str> {
        self.request_log
            .iter()
            .map(String::as_str)
            .filter(|r| r.starts_with(prefix))
            .collect()
    }
}
