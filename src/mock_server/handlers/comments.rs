//! Thread endpoint handler.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::RwLock;

use super::{authorize, listing, not_found, Renderer};
use crate::mock_server::state::MockState;

/// Query parameters for fetching a thread.
#[derive(Debug, Default, Deserialize)]
pub struct ThreadParams {
    /// Focus the view on this comment.
    pub comment: Option<String>,
    /// Tighten the server's depth limit for this request.
    pub depth: Option<usize>,
}

/// GET /comments/{id}
pub async fn get_thread(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(id): Path<String>,
    Query(params): Query<ThreadParams>,
    headers: HeaderMap,
) -> Response {
    let mut state = state.write().await;
    state.request_log.push(match &params.comment {
        Some(comment) => format!("comments/{id}?comment={comment}"),
        None => format!("comments/{id}"),
    });
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    let state = &*state;

    let Some(submission) = state.get_submission(&id) else {
        return not_found(format!("No submission found with id: {id}"));
    };

    let max_depth = params
        .depth
        .map_or(state.limits.max_depth, |d| d.min(state.limits.max_depth));
    let render = Renderer::new(state, max_depth);

    let comments = match params.comment.as_deref() {
        Some(focus) => match state.get_comment(&id, focus) {
            Some(comment) => listing(vec![render.nested(comment, 0)]),
            None => return not_found(format!("No comment found with id: {focus}")),
        },
        None => render.level(&submission.fullname(), 0),
    };

    Json(json!([
        listing(vec![json!({"kind": "t3", "data": submission})]),
        comments,
    ]))
    .into_response()
}
