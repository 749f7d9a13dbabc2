//! HTTP request handlers for the mock server.

pub mod comments;
pub mod more_children;

pub use comments::*;
pub use more_children::*;

use axum::{
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::mock_server::state::MockState;
use crate::Comment;

/// Reject the request unless it carries the state's required bearer token.
fn authorize(state: &MockState, headers: &HeaderMap) -> Result<(), Response> {
    let Some(required) = state.required_token.as_deref() else {
        return Ok(());
    };
    let presented = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    if presented == Some(required) {
        return Ok(());
    }
    Err((
        StatusCode::UNAUTHORIZED,
        Json(json!({"message": "Unauthorized", "error": 401})),
    )
        .into_response())
}

fn not_found(message: String) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"message": message, "error": 404})),
    )
        .into_response()
}

/// Renders stored comments in Reddit's wire shapes, truncated by the
/// state's [`ThreadLimits`](crate::mock_server::ThreadLimits).
///
/// Depths are relative to the rendered view.
struct Renderer<'a> {
    state: &'a MockState,
    max_depth: usize,
}

impl<'a> Renderer<'a> {
    fn new(state: &'a MockState, max_depth: usize) -> Self {
        Self {
            state,
            max_depth: max_depth.max(1),
        }
    }

    /// Nested listing of the replies to `parent`, which sit at `depth`.
    fn level(&self, parent: &str, depth: usize) -> Value {
        let siblings = self.state.children_of(parent);
        let shown = siblings.len().min(self.state.limits.max_children);

        let mut things: Vec<Value> = siblings[..shown]
            .iter()
            .map(|c| self.nested(c, depth))
            .collect();
        if shown < siblings.len() {
            things.push(more_thing(parent, &siblings[shown..], depth));
        }
        listing(things)
    }

    /// A comment with its replies nested under `data.replies`.
    fn nested(&self, comment: &Comment, depth: usize) -> Value {
        let fullname = comment.fullname();
        let replies = if self.state.children_of(&fullname).is_empty() {
            json!("")
        } else if depth + 1 >= self.max_depth {
            listing(vec![continue_thing(&fullname, depth + 1)])
        } else {
            self.level(&fullname, depth + 1)
        };
        comment_thing(comment, depth, replies)
    }

    /// A comment and its subtree in pre-order, each reply naming its parent.
    fn flatten(&self, comment: &Comment, depth: usize, out: &mut Vec<Value>) {
        let fullname = comment.fullname();
        out.push(comment_thing(comment, depth, json!("")));

        let replies = self.state.children_of(&fullname);
        if replies.is_empty() {
            return;
        }
        if depth + 1 >= self.max_depth {
            out.push(continue_thing(&fullname, depth + 1));
            return;
        }

        let shown = replies.len().min(self.state.limits.max_children);
        for reply in &replies[..shown] {
            self.flatten(reply, depth + 1, out);
        }
        if shown < replies.len() {
            out.push(more_thing(&fullname, &replies[shown..], depth + 1));
        }
    }
}

fn listing(children: Vec<Value>) -> Value {
    json!({
        "kind": "Listing",
        "data": {"children": children, "after": null, "before": null}
    })
}

fn comment_thing(comment: &Comment, depth: usize, replies: Value) -> Value {
    let mut data = serde_json::to_value(comment).unwrap_or_default();
    data["depth"] = json!(depth);
    data["replies"] = replies;
    json!({"kind": "t1", "data": data})
}

fn more_thing(parent: &str, hidden: &[&Comment], depth: usize) -> Value {
    let ids: Vec<&str> = hidden.iter().map(|c| c.id.as_str()).collect();
    let first = ids.first().copied().unwrap_or_default();
    json!({
        "kind": "more",
        "data": {
            "id": first,
            "name": format!("t1_{first}"),
            "parent_id": parent,
            "children": ids,
            "count": ids.len(),
            "depth": depth,
        }
    })
}

fn continue_thing(parent: &str, depth: usize) -> Value {
    json!({
        "kind": "more",
        "data": {
            "id": "_",
            "name": "t1__",
            "parent_id": parent,
            "children": [],
            "count": 0,
            "depth": depth,
        }
    })
}
