//! Wire-format envelopes shared by thread and "load more" responses.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kind tag of a comment.
pub const KIND_COMMENT: &str = "t1";
/// Kind tag of a submission.
pub const KIND_SUBMISSION: &str = "t3";
/// Kind tag of a "load more" stub.
pub const KIND_MORE: &str = "more";
/// Kind tag of a listing wrapper.
pub const KIND_LISTING: &str = "Listing";

pub(crate) const COMMENT_PREFIX: &str = "t1_";
pub(crate) const SUBMISSION_PREFIX: &str = "t3_";

/// The stub id meaning "continue this thread" instead of a real id.
pub const CONTINUE_THREAD_ID: &str = "_";

/// A kind-tagged object: `{"kind": "t1", "data": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thing {
    pub kind: String,
    #[serde(default)]
    pub data: Value,
}

impl Thing {
    pub fn is_comment(&self) -> bool {
        self.kind == KIND_COMMENT
    }

    pub fn is_more(&self) -> bool {
        self.kind == KIND_MORE
    }
}

/// Payload of a `more` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoreStub {
    /// Either a real id or [`CONTINUE_THREAD_ID`].
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    /// Fullname of the comment (or submission) these siblings belong under.
    pub parent_id: String,

    /// Base-36 ids still to fetch; empty for continue-thread stubs.
    #[serde(default)]
    pub children: Vec<String>,

    #[serde(default)]
    pub count: u64,

    #[serde(default)]
    pub depth: Option<u32>,
}

impl MoreStub {
    /// Check whether the stub asks for a deeper re-fetch.
    pub fn is_continue_thread(&self) -> bool {
        self.id == CONTINUE_THREAD_ID
    }
}
