//! "Load more comments" endpoint handler.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::RwLock;

use super::{authorize, more_thing, Renderer};
use crate::mock_server::state::MockState;
use crate::Comment;

/// Query parameters for a morechildren lookup.
#[derive(Debug, Default, Deserialize)]
pub struct MoreChildrenParams {
    /// Submission fullname.
    #[serde(default)]
    pub link_id: String,
    /// Comma-separated base-36 comment ids.
    #[serde(default)]
    pub children: String,
}

/// GET /api/morechildren
///
/// Answers with the requested comments and their subtrees as a flat list.
/// Ids past the per-request limit come back as one `more` stub whose parent
/// is not part of the response. Unknown ids are skipped.
pub async fn get_more_children(
    State(state): State<Arc<RwLock<MockState>>>,
    Query(params): Query<MoreChildrenParams>,
    headers: HeaderMap,
) -> Response {
    let mut state = state.write().await;
    state
        .request_log
        .push(format!("api/morechildren?children={}", params.children));
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    let state = &*state;

    let submission_id = params
        .link_id
        .strip_prefix("t3_")
        .unwrap_or(&params.link_id);
    if state.get_submission(submission_id).is_none() {
        return Json(json!({
            "json": {"errors": [["INVALID_LINK", "that link doesn't exist", "link_id"]]}
        }))
        .into_response();
    }

    let requested: Vec<&Comment> = params
        .children
        .split(',')
        .filter(|id| !id.is_empty())
        .filter_map(|id| state.get_comment(submission_id, id))
        .collect();
    let shown = requested.len().min(state.limits.max_more_children);

    let render = Renderer::new(state, state.limits.max_depth);
    let mut things = Vec::new();
    for comment in &requested[..shown] {
        render.flatten(comment, 0, &mut things);
    }
    if let Some(first) = requested.get(shown) {
        things.push(more_thing(&first.parent_id, &requested[shown..], 0));
    }

    Json(json!({"json": {"errors": [], "data": {"things": things}}})).into_response()
}
