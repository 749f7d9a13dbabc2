//! Submission model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::thing::SUBMISSION_PREFIX;

/// A Reddit submission (`t3` payload), the root of a comment thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    /// Base-36 id without the kind prefix.
    pub id: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub author: Option<String>,

    #[serde(default)]
    pub subreddit: Option<String>,

    /// Self-post text; empty for link posts.
    #[serde(default)]
    pub selftext: String,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub permalink: Option<String>,

    #[serde(default)]
    pub score: i64,

    /// Comment count as reported by the server, including unfetched ones.
    #[serde(default)]
    pub num_comments: u64,

    #[serde(default)]
    pub created_utc: Option<f64>,
}

impl Submission {
    /// The `t3_`-prefixed fullname.
    pub fn fullname(&self) -> String {
        format!("{SUBMISSION_PREFIX}{}", self.id)
    }

    /// Creation time.
    pub fn created(&self) -> Option<DateTime<Utc>> {
        self.created_utc
            .and_then(|ts| DateTime::from_timestamp(ts as i64, 0))
    }
}
