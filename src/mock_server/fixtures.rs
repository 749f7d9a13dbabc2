//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use crate::mock_server::state::ThreadLimits;
use crate::{Comment, Submission};

/// Collection of fixture factories for test data.
pub struct Fixtures;

/// The data [`MockServer::start`](super::MockServer::start) serves.
#[derive(Debug, Clone)]
pub struct DefaultScenario {
    pub submissions: Vec<Submission>,
    pub comments: Vec<Comment>,
    pub limits: ThreadLimits,
}

impl Fixtures {
    // =========================================================================
    // Submission Fixtures
    // =========================================================================

    /// Create a self-post with no comments counted.
    pub fn submission(id: &str, title: &str) -> Submission {
        Submission {
            id: id.to_string(),
            title: title.to_string(),
            author: Some("op".to_string()),
            subreddit: Some("test".to_string()),
            selftext: String::new(),
            url: None,
            permalink: Some(format!("/r/test/comments/{id}/")),
            score: 1,
            num_comments: 0,
            created_utc: Some(1_700_000_000.0),
        }
    }

    // =========================================================================
    // Comment Fixtures
    // =========================================================================

    /// Create a comment on `submission_id` replying to `parent_fullname`.
    pub fn comment(submission_id: &str, id: &str, parent_fullname: &str) -> Comment {
        Comment {
            id: id.to_string(),
            name: Some(format!("t1_{id}")),
            parent_id: parent_fullname.to_string(),
            link_id: Some(format!("t3_{submission_id}")),
            author: Some(format!("user_{id}")),
            body: format!("Comment {id}"),
            score: 1,
            created_utc: Some(1_700_000_000.0),
            depth: None,
            permalink: Some(format!("/r/test/comments/{submission_id}/_/{id}/")),
            subreddit: Some("test".to_string()),
        }
    }

    /// Create `count` top-level comments named `{prefix}0`, `{prefix}1`, ...
    pub fn top_level(submission_id: &str, prefix: &str, count: usize) -> Vec<Comment> {
        let parent = format!("t3_{submission_id}");
        (0..count)
            .map(|i| Self::comment(submission_id, &format!("{prefix}{i}"), &parent))
            .collect()
    }

    /// Create `count` replies to `parent_id` named `{prefix}0`, `{prefix}1`, ...
    pub fn replies(submission_id: &str, parent_id: &str, prefix: &str, count: usize) -> Vec<Comment> {
        let parent = format!("t1_{parent_id}");
        (0..count)
            .map(|i| Self::comment(submission_id, &format!("{prefix}{i}"), &parent))
            .collect()
    }

    /// Create a chain of single replies `{prefix}1` → `{prefix}2` → … under `parent_id`.
    pub fn chain(submission_id: &str, parent_id: &str, prefix: &str, length: usize) -> Vec<Comment> {
        let mut parent = format!("t1_{parent_id}");
        (1..=length)
            .map(|i| {
                let id = format!("{prefix}{i}");
                let comment = Self::comment(submission_id, &id, &parent);
                parent = format!("t1_{id}");
                comment
            })
            .collect()
    }

    // =========================================================================
    // Scenarios
    // =========================================================================

    /// Submission `abc` with a thread that needs every kind of expansion:
    ///
    /// - seven top-level comments `t0`..`t6`, only three shown per level
    /// - five replies `r0`..`r4` under `t0`
    /// - a six-deep chain `d1`..`d6` under `t1`, cut off at depth four
    /// - morechildren answers at most two ids per request
    ///
    /// Submission `quiet` has no comments.
    pub fn default_scenario() -> DefaultScenario {
        let mut comments = Self::top_level("abc", "t", 7);
        comments.extend(Self::replies("abc", "t0", "r", 5));
        comments.extend(Self::chain("abc", "t1", "d", 6));

        let mut busy = Self::submission("abc", "Test Submission");
        busy.num_comments = comments.len() as u64;

        DefaultScenario {
            submissions: vec![busy, Self::submission("quiet", "Nobody Replied")],
            comments,
            limits: ThreadLimits {
                max_children: 3,
                max_depth: 4,
                max_more_children: 2,
            },
        }
    }
}
