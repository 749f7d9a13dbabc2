//! Thread and "load more" fetch operations.

use async_trait::async_trait;
use reqwest::Method;

use crate::error::{RedditError, Result};
use crate::models::thing::SUBMISSION_PREFIX;
use crate::models::CommentSort;
use crate::traits::{Get, Params, SharedRequester};
use crate::tree::build;
use crate::tree::more::{MoreComments, MoreKind};
use crate::tree::node::{CommentNode, SubmissionNode};

pub(crate) const MORE_CHILDREN_PATH: &str = "api/morechildren";

/// Query parameters for fetching a comment thread.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreadQuery {
    /// Focus the thread on this comment (base-36 id).
    pub comment: Option<String>,
    pub sort: Option<CommentSort>,
    /// Maximum number of comments to return.
    pub limit: Option<u32>,
    /// Maximum reply depth to return.
    pub depth: Option<u32>,
    /// Number of parents to include above a focused comment.
    pub context: Option<u32>,
}

impl ThreadQuery {
    /// Thread query sorted by `sort`.
    pub fn sorted(sort: CommentSort) -> Self {
        Self {
            sort: Some(sort),
            ..Default::default()
        }
    }

    /// Convert into request parameters.
    ///
    /// Each field contributes its own parameter, in a fixed order, and only
    /// when set.
    pub fn to_params(&self) -> Params {
        let contributors: [(&str, Option<String>); 5] = [
            ("comment", self.comment.clone()),
            ("sort", self.sort.map(|s| s.as_str().to_string())),
            ("limit", self.limit.map(|v| v.to_string())),
            ("depth", self.depth.map(|v| v.to_string())),
            ("context", self.context.map(|v| v.to_string())),
        ];

        contributors
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key.to_string(), v)))
            .collect()
    }
}

/// Fetch a submission and its comment tree.
///
/// # Arguments
///
/// * `client` - The requester, also embedded in every `more` thunk
/// * `submission_id36` - Base-36 submission id, optionally `t3_`-prefixed
/// * `query` - Focus, sort and size parameters
///
/// # Example
///
/// ```ignore
/// use redtree::{fetch_comment_tree, RedditClient, ThreadQuery};
///
/// let client = RedditClient::from_env()?.shared();
/// let tree = fetch_comment_tree(&client, "abc123", &ThreadQuery::default()).await?;
/// println!("{} top-level comments", tree.children.len());
/// ```
#[tracing::instrument(skip(client))]
pub async fn fetch_comment_tree(
    client: &SharedRequester,
    submission_id36: &str,
    query: &ThreadQuery,
) -> Result<SubmissionNode> {
    let id = bare_id36(submission_id36);
    let path = format!("comments/{}", urlencoding::encode(id));

    let body = client.request(Method::GET, &path, &query.to_params()).await?;
    build::build_thread(client, query.sort, &body)
}

/// Fetch specific comments of a submission by id and reassemble them.
///
/// The result is an empty-rooted forest, the same shape a
/// [`MoreComments`] thunk returns.
///
/// # Example
///
/// ```ignore
/// let forest = fetch_more_children(&client, "abc123", &["k1".into(), "k2".into()], None).await?;
/// ```
pub async fn fetch_more_children(
    client: &SharedRequester,
    submission_id36: &str,
    ids: &[String],
    sort: Option<CommentSort>,
) -> Result<CommentNode> {
    let more = MoreComments::new(
        client.clone(),
        bare_id36(submission_id36),
        None,
        sort,
        MoreKind::Children {
            ids: ids.to_vec(),
            count: ids.len() as u64,
        },
    );
    more.fetch().await
}

/// Like [`fetch_comment_tree`], but a missing submission is `Ok(None)`.
pub async fn find_comment_tree(
    client: &SharedRequester,
    submission_id36: &str,
    query: &ThreadQuery,
) -> Result<Option<SubmissionNode>> {
    match fetch_comment_tree(client, submission_id36, query).await {
        Ok(tree) => Ok(Some(tree)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

#[async_trait]
impl Get for SubmissionNode {
    type Id = (String, ThreadQuery); // (submission id36, query)

    async fn get(client: &SharedRequester, id: Self::Id) -> Result<Self> {
        let (submission_id36, query) = id;
        find_comment_tree(client, &submission_id36, &query)
            .await?
            .ok_or(RedditError::NotFound {
                entity_type: "submission",
                id: submission_id36,
            })
    }
}

fn bare_id36(id: &str) -> &str {
    id.strip_prefix(SUBMISSION_PREFIX).unwrap_or(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{comment_thing, more_children_response, thread_response, ScriptedRequester};
    use serde_json::json;

    #[test]
    fn test_thread_query_params_only_include_set_fields() {
        let params = ThreadQuery::default().to_params();
        assert!(params.is_empty());

        let query = ThreadQuery {
            comment: Some("c1".to_string()),
            sort: Some(CommentSort::Top),
            depth: Some(3),
            ..Default::default()
        };
        let params = query.to_params();
        assert_eq!(params.get("comment").map(String::as_str), Some("c1"));
        assert_eq!(params.get("sort").map(String::as_str), Some("top"));
        assert_eq!(params.get("depth").map(String::as_str), Some("3"));
        assert!(!params.contains_key("limit"));
    }

    #[tokio::test]
    async fn test_fetch_comment_tree_strips_prefix() {
        let requester = ScriptedRequester::new()
            .on_thread("s", None, thread_response("s", vec![comment_thing("a", "t3_s", json!(""))]));
        let client = requester.clone().shared();

        let tree = fetch_comment_tree(&client, "t3_s", &ThreadQuery::default())
            .await
            .unwrap();
        assert_eq!(tree.children.len(), 1);
        assert_eq!(requester.calls()[0].path, "comments/s");
    }

    #[tokio::test]
    async fn test_get_translates_missing_submission() {
        let client = ScriptedRequester::new().shared();

        let err = SubmissionNode::get(&client, ("gone".to_string(), ThreadQuery::default()))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RedditError::NotFound { entity_type: "submission", ref id } if id == "gone"
        ));

        let none = find_comment_tree(&client, "gone", &ThreadQuery::default())
            .await
            .unwrap();
        assert!(none.is_none());
    }

    #[tokio::test]
    async fn test_fetch_more_children_sends_ids_in_order() {
        let requester = ScriptedRequester::new().on_more_children(
            &["x", "y"],
            more_children_response(vec![
                comment_thing("x", "t3_s", json!("")),
                comment_thing("y", "t3_s", json!("")),
            ]),
        );
        let client = requester.clone().shared();

        let forest = fetch_more_children(&client, "s", &["x".to_string(), "y".to_string()], Some(CommentSort::New))
            .await
            .unwrap();
        assert_eq!(forest.fullnames(), vec!["t1_x", "t1_y"]);

        let call = &requester.calls()[0];
        assert_eq!(call.path, MORE_CHILDREN_PATH);
        assert_eq!(call.params.get("link_id").map(String::as_str), Some("t3_s"));
        assert_eq!(call.params.get("children").map(String::as_str), Some("x,y"));
        assert_eq!(call.params.get("sort").map(String::as_str), Some("new"));
    }
}
