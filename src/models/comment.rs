//! Comment model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::thing::{COMMENT_PREFIX, SUBMISSION_PREFIX};

/// A Reddit comment (`t1` payload).
///
/// Only the fields the comment tree needs are modelled; the nested
/// `replies` listing is consumed by the tree builder and never stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Base-36 id without the kind prefix (e.g., "k3j2x1").
    pub id: String,

    /// Fullname including the kind prefix (e.g., "t1_k3j2x1").
    #[serde(default)]
    pub name: Option<String>,

    /// Fullname of the parent: a comment (`t1_`) or the submission (`t3_`).
    pub parent_id: String,

    /// Fullname of the submission this comment belongs to.
    #[serde(default)]
    pub link_id: Option<String>,

    /// Author username; `[deleted]` for removed accounts.
    #[serde(default)]
    pub author: Option<String>,

    /// Markdown body.
    #[serde(default)]
    pub body: String,

    #[serde(default)]
    pub score: i64,

    /// Creation time as a Unix timestamp.
    #[serde(default)]
    pub created_utc: Option<f64>,

    /// Nesting depth reported by the server (0 for top-level).
    #[serde(default)]
    pub depth: Option<u32>,

    #[serde(default)]
    pub permalink: Option<String>,

    #[serde(default)]
    pub subreddit: Option<String>,
}

impl Comment {
    /// The `t1_`-prefixed fullname.
    pub fn fullname(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("{COMMENT_PREFIX}{}", self.id))
    }

    /// Check whether this comment replies directly to the submission.
    pub fn is_top_level(&self) -> bool {
        self.parent_id.starts_with(SUBMISSION_PREFIX)
    }

    /// The base-36 id of the parent comment, if the parent is a comment.
    pub fn parent_comment_id36(&self) -> Option<&str> {
        self.parent_id.strip_prefix(COMMENT_PREFIX)
    }

    /// The base-36 id of the submission, from `link_id`.
    pub fn submission_id36(&self) -> Option<&str> {
        self.link_id
            .as_deref()
            .and_then(|l| l.strip_prefix(SUBMISSION_PREFIX))
    }

    /// Creation time.
    pub fn created(&self) -> Option<DateTime<Utc>> {
        self.created_utc
            .and_then(|ts| DateTime::from_timestamp(ts as i64, 0))
    }

    /// Author name, with a placeholder for deleted accounts.
    pub fn author_or_deleted(&self) -> &str {
        self.author.as_deref().unwrap_or("[deleted]")
    }
}
