//! Test-only requester and wire-format builders.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::Method;
use serde_json::{json, Value};

use crate::error::{RedditError, Result};
use crate::models::Comment;
use crate::traits::{Params, Requester, SharedRequester};

const MORE_CHILDREN_PATH: &str = "api/morechildren";

/// A request the scripted requester received.
#[derive(Debug, Clone)]
pub(crate) struct Call {
    pub path: String,
    pub params: Params,
}

#[derive(Debug, Clone)]
enum Reply {
    Body(Value),
    Status(u16),
}

#[derive(Default)]
struct Script {
    replies: HashMap<String, Reply>,
    calls: Vec<Call>,
}

/// Answers requests from a fixed script and records every call.
///
/// Thread fetches are keyed by submission and focused comment, "load more"
/// lookups by the exact `children` list. Anything unscripted is a 404.
#[derive(Clone, Default)]
pub(crate) struct ScriptedRequester {
    script: Arc<Mutex<Script>>,
}

impl ScriptedRequester {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared(self) -> SharedRequester {
        Arc::new(self)
    }

    pub fn on_thread(self, submission: &str, comment: Option<&str>, body: Value) -> Self {
        let key = thread_key(submission, comment);
        self.insert(key, Reply::Body(body))
    }

    pub fn on_more_children(self, ids: &[&str], body: Value) -> Self {
        let key = more_key(&ids.join(","));
        self.insert(key, Reply::Body(body))
    }

    pub fn fail_more_children(self, ids: &[&str], status: u16) -> Self {
        let key = more_key(&ids.join(","));
        self.insert(key, Reply::Status(status))
    }

    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    /// The `children` parameter of every "load more" call, in order.
    pub fn more_children_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.path == MORE_CHILDREN_PATH)
            .filter_map(|c| c.params.get("children").cloned())
            .collect()
    }

    fn insert(self, key: String, reply: Reply) -> Self {
        self.lock().replies.insert(key, reply);
        self
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl Requester for ScriptedRequester {
    async fn request(&self, _method: Method, path: &str, params: &Params) -> Result<Value> {
        let key = if path == MORE_CHILDREN_PATH {
            more_key(params.get("children").map(String::as_str).unwrap_or_default())
        } else {
            let submission = path.trim_start_matches("comments/");
            thread_key(submission, params.get("comment").map(String::as_str))
        };

        let reply = {
            let mut script = self.lock();
            script.calls.push(Call {
                path: path.to_string(),
                params: params.clone(),
            });
            script.replies.get(&key).cloned()
        };

        match reply {
            Some(Reply::Body(body)) => Ok(body),
            Some(Reply::Status(status)) => Err(RedditError::ApiError {
                message: format!("scripted failure for {key}"),
                status_code: Some(status),
            }),
            None => Err(RedditError::ApiError {
                message: format!("no scripted response for {key}"),
                status_code: Some(404),
            }),
        }
    }
}

fn thread_key(submission: &str, comment: Option<&str>) -> String {
    format!("comments/{submission}?comment={}", comment.unwrap_or_default())
}

fn more_key(children: &str) -> String {
    format!("{MORE_CHILDREN_PATH}?children={children}")
}

/// A comment model with the given id and parent fullname.
pub(crate) fn comment(id: &str, parent_id: &str) -> Comment {
    Comment {
        id: id.to_string(),
        name: Some(format!("t1_{id}")),
        parent_id: parent_id.to_string(),
        link_id: Some("t3_s".to_string()),
        author: Some("tester".to_string()),
        body: format!("body of {id}"),
        score: 1,
        created_utc: None,
        depth: None,
        permalink: None,
        subreddit: None,
    }
}

/// A `t1` entry; pass `json!("")` for no replies.
pub(crate) fn comment_thing(id: &str, parent_id: &str, replies: Value) -> Value {
    json!({
        "kind": "t1",
        "data": {
            "id": id,
            "name": format!("t1_{id}"),
            "parent_id": parent_id,
            "link_id": "t3_s",
            "author": "tester",
            "body": format!("body of {id}"),
            "score": 1,
            "replies": replies,
        }
    })
}

/// A `more` entry listing `ids` under `parent_id`.
pub(crate) fn more_thing(parent_id: &str, ids: &[&str]) -> Value {
    let id = ids.first().copied().unwrap_or("empty");
    json!({
        "kind": "more",
        "data": {
            "id": id,
            "name": format!("t1_{id}"),
            "parent_id": parent_id,
            "children": ids,
            "count": ids.len(),
        }
    })
}

/// A continue-thread `more` entry under `parent_id`.
pub(crate) fn continue_thing(parent_id: &str) -> Value {
    json!({
        "kind": "more",
        "data": {
            "id": "_",
            "name": "t1__",
            "parent_id": parent_id,
            "children": [],
            "count": 0,
        }
    })
}

pub(crate) fn listing(children: Vec<Value>) -> Value {
    json!({
        "kind": "Listing",
        "data": {"children": children, "after": null, "before": null}
    })
}

/// A two-listing thread response for submission `id`.
pub(crate) fn thread_response(id: &str, comments: Vec<Value>) -> Value {
    json!([
        listing(vec![json!({
            "kind": "t3",
            "data": {"id": id, "title": format!("Submission {id}"), "num_comments": comments.len()}
        })]),
        listing(comments),
    ])
}

/// A `morechildren` body holding `things`.
pub(crate) fn more_children_response(things: Vec<Value>) -> Value {
    json!({"json": {"errors": [], "data": {"things": things}}})
}
