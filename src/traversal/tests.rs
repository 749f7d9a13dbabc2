use std::collections::HashSet;

use futures::TryStreamExt;
use serde_json::json;

use super::*;
use crate::error::RedditError;
use crate::testing::{
    comment, comment_thing, continue_thing, listing, more_children_response, more_thing,
    thread_response, ScriptedRequester,
};
use crate::tree::build::build_thread;
use crate::tree::{CommentNode, Node};

/// Pairs of `(depth, id)` for readable assertions.
fn ids(visits: &[Visit]) -> Vec<(usize, String)> {
    visits.iter().map(|(d, c)| (*d, c.id.clone())).collect()
}

fn pairs(expected: &[(usize, &str)]) -> Vec<(usize, String)> {
    expected.iter().map(|(d, id)| (*d, id.to_string())).collect()
}

/// Thread `s`:
///
/// ```text
/// A ── A1, more[A2, A3]
/// B
/// more[C, D, E]  → C ── C1, D, orphan more[E]  → E ── E1, more[E2]
/// ```
fn multi_round() -> (ScriptedRequester, CommentNode) {
    let requester = ScriptedRequester::new()
        .on_more_children(
            &["A2", "A3"],
            more_children_response(vec![
                comment_thing("A2", "t1_A", json!("")),
                comment_thing("A3", "t1_A", json!("")),
            ]),
        )
        .on_more_children(
            &["C", "D", "E"],
            more_children_response(vec![
                comment_thing("C", "t3_s", json!("")),
                comment_thing("C1", "t1_C", json!("")),
                comment_thing("D", "t3_s", json!("")),
                more_thing("t3_s", &["E"]),
            ]),
        )
        .on_more_children(
            &["E"],
            more_children_response(vec![
                comment_thing("E", "t3_s", json!("")),
                comment_thing("E1", "t1_E", json!("")),
                more_thing("t1_E", &["E2"]),
            ]),
        )
        .on_more_children(
            &["E2"],
            more_children_response(vec![comment_thing("E2", "t1_E", json!(""))]),
        );

    let response = thread_response(
        "s",
        vec![
            comment_thing(
                "A",
                "t3_s",
                listing(vec![
                    comment_thing("A1", "t1_A", json!("")),
                    more_thing("t1_A", &["A2", "A3"]),
                ]),
            ),
            comment_thing("B", "t3_s", json!("")),
            more_thing("t3_s", &["C", "D", "E"]),
        ],
    );

    let client = requester.clone().shared();
    let tree = build_thread(&client, None, &response).expect("fixture should build");
    let (_, forest) = tree.into_forest();
    (requester, forest)
}

/// A tree with nothing left to fetch.
fn materialized() -> CommentNode {
    Node::empty(
        vec![
            Node::new(
                comment("a", "t3_s"),
                vec![
                    Node::new(
                        comment("a1", "t1_a"),
                        vec![Node::leaf(comment("a1x", "t1_a1"))],
                        None,
                    ),
                    Node::leaf(comment("a2", "t1_a")),
                ],
                None,
            ),
            Node::new(
                comment("b", "t3_s"),
                vec![Node::leaf(comment("b1", "t1_b"))],
                None,
            ),
        ],
        None,
    )
}

async fn collect_bfs(root: CommentNode) -> Result<Vec<Visit>, RedditError> {
    breadth_first(root).into_stream().try_collect().await
}

async fn collect_dfs(root: CommentNode) -> Result<Vec<Visit>, RedditError> {
    depth_first(root).into_stream().try_collect().await
}

async fn collect_recursive(root: CommentNode) -> Result<Vec<Visit>, RedditError> {
    depth_first_recursive(root).try_collect().await
}

#[tokio::test]
async fn test_breadth_first_finishes_level_before_descending() {
    let (requester, forest) = multi_round();

    let visits = collect_bfs(forest).await.unwrap();
    assert_eq!(
        ids(&visits),
        pairs(&[
            (0, "A"),
            (0, "B"),
            (0, "C"),
            (0, "D"),
            (0, "E"),
            (1, "A1"),
            (1, "C1"),
            (1, "E1"),
            (1, "A2"),
            (1, "A3"),
            (1, "E2"),
        ])
    );
    assert_eq!(requester.more_children_calls(), vec!["C,D,E", "E", "A2,A3", "E2"]);
}

#[tokio::test]
async fn test_depth_first_splices_expansions_after_children() {
    let (requester, forest) = multi_round();

    let visits = collect_dfs(forest).await.unwrap();
    assert_eq!(
        ids(&visits),
        pairs(&[
            (0, "A"),
            (1, "A1"),
            (1, "A2"),
            (1, "A3"),
            (0, "B"),
            (0, "C"),
            (1, "C1"),
            (0, "D"),
            (0, "E"),
            (1, "E1"),
            (1, "E2"),
        ])
    );
    assert_eq!(requester.more_children_calls(), vec!["A2,A3", "C,D,E", "E", "E2"]);
}

#[tokio::test]
async fn test_recursive_matches_iterative_depth_first() {
    let (_, iterative_forest) = multi_round();
    let (requester, recursive_forest) = multi_round();

    let iterative = collect_dfs(iterative_forest).await.unwrap();
    let recursive = collect_recursive(recursive_forest).await.unwrap();
    assert_eq!(ids(&recursive), ids(&iterative));
    assert_eq!(requester.more_children_calls().len(), 4);
}

#[tokio::test]
async fn test_expanded_top_level_comments_stay_at_depth_zero() {
    // S has A, B and a trailing stub for three more top-level comments.
    let requester = ScriptedRequester::new().on_more_children(
        &["x", "y", "z"],
        more_children_response(vec![
            comment_thing("x", "t3_s", json!("")),
            comment_thing("y", "t3_s", json!("")),
            comment_thing("z", "t3_s", json!("")),
        ]),
    );
    let response = thread_response(
        "s",
        vec![
            comment_thing("A", "t3_s", listing(vec![comment_thing("A1", "t1_A", json!(""))])),
            comment_thing("B", "t3_s", json!("")),
            more_thing("t3_s", &["x", "y", "z"]),
        ],
    );
    let client = requester.clone().shared();
    let (_, forest) = build_thread(&client, None, &response).unwrap().into_forest();

    let mut walker = breadth_first(forest);
    assert_eq!(walker.try_next().await.unwrap().map(|(d, c)| (d, c.id)), Some((0, "A".to_string())));
    assert_eq!(walker.try_next().await.unwrap().map(|(d, c)| (d, c.id)), Some((0, "B".to_string())));
    assert_eq!(requester.call_count(), 0, "stub must not be invoked before the level's nodes");

    let rest: Vec<Visit> = walker.into_stream().try_collect().await.unwrap();
    assert_eq!(
        ids(&rest),
        pairs(&[(0, "x"), (0, "y"), (0, "z"), (1, "A1")])
    );
    assert_eq!(requester.call_count(), 1);
}

#[tokio::test]
async fn test_all_traversals_agree_without_thunks() {
    let bfs: HashSet<_> = ids(&collect_bfs(materialized()).await.unwrap()).into_iter().collect();
    let dfs: HashSet<_> = ids(&collect_dfs(materialized()).await.unwrap()).into_iter().collect();
    let rec: HashSet<_> = ids(&collect_recursive(materialized()).await.unwrap())
        .into_iter()
        .collect();

    assert_eq!(bfs.len(), 6);
    assert_eq!(bfs, dfs);
    assert_eq!(dfs, rec);
    assert!(bfs.contains(&(2, "a1x".to_string())));
}

#[tokio::test]
async fn test_children_keep_source_order() {
    let visits = collect_dfs(materialized()).await.unwrap();
    assert_eq!(
        ids(&visits),
        pairs(&[(0, "a"), (1, "a1"), (2, "a1x"), (1, "a2"), (0, "b"), (1, "b1")])
    );

    let visits = collect_bfs(materialized()).await.unwrap();
    assert_eq!(
        ids(&visits),
        pairs(&[(0, "a"), (0, "b"), (1, "a1"), (1, "a2"), (1, "b1"), (2, "a1x")])
    );
}

#[tokio::test]
async fn test_single_leaf_yields_once_without_fetching() {
    for visits in [
        collect_bfs(Node::leaf(comment("only", "t3_s"))).await.unwrap(),
        collect_dfs(Node::leaf(comment("only", "t3_s"))).await.unwrap(),
        collect_recursive(Node::leaf(comment("only", "t3_s"))).await.unwrap(),
    ] {
        assert_eq!(ids(&visits), pairs(&[(0, "only")]));
    }
}

#[tokio::test]
async fn test_root_value_is_reported_at_depth_zero() {
    let root = Node::new(
        comment("r", "t3_s"),
        vec![Node::leaf(comment("r1", "t1_r"))],
        None,
    );
    let visits = collect_bfs(root).await.unwrap();
    assert_eq!(ids(&visits), pairs(&[(0, "r"), (1, "r1")]));
}

#[tokio::test]
async fn test_no_comment_is_visited_twice() {
    let (_, forest) = multi_round();
    let visits = collect_bfs(forest).await.unwrap();

    let unique: HashSet<_> = visits.iter().map(|(_, c)| c.fullname()).collect();
    assert_eq!(unique.len(), visits.len());
}

#[tokio::test]
async fn test_failed_expansion_ends_traversal() {
    let requester = ScriptedRequester::new().fail_more_children(&["x"], 500);
    let response = thread_response(
        "s",
        vec![
            comment_thing("A", "t3_s", listing(vec![comment_thing("A1", "t1_A", json!(""))])),
            more_thing("t3_s", &["x"]),
        ],
    );
    let client = requester.clone().shared();
    let (_, forest) = build_thread(&client, None, &response).unwrap().into_forest();

    let mut walker = breadth_first(forest.clone());
    assert!(walker.try_next().await.unwrap().is_some());
    let err = walker.try_next().await.unwrap_err();
    assert!(matches!(err, RedditError::ApiError { status_code: Some(500), .. }));
    assert!(walker.try_next().await.unwrap().is_none());

    let mut walker = depth_first(forest.clone());
    assert_eq!(walker.try_next().await.unwrap().map(|(_, c)| c.id), Some("A".to_string()));
    assert_eq!(walker.try_next().await.unwrap().map(|(_, c)| c.id), Some("A1".to_string()));
    assert!(walker.try_next().await.is_err());
    assert!(walker.try_next().await.unwrap().is_none());

    let items: Vec<_> = futures::StreamExt::collect(depth_first_recursive(forest)).await;
    assert_eq!(items.len(), 3);
    assert!(items[2].is_err());
}

#[tokio::test]
async fn test_continue_thread_descends_below_the_cutoff() {
    let requester = ScriptedRequester::new().on_thread(
        "s",
        Some("A1"),
        thread_response(
            "s",
            vec![comment_thing(
                "A1",
                "t1_A",
                listing(vec![comment_thing(
                    "A1a",
                    "t1_A1",
                    listing(vec![comment_thing("A1a1", "t1_A1a", json!(""))]),
                )]),
            )],
        ),
    );
    let response = thread_response(
        "s",
        vec![
            comment_thing(
                "A",
                "t3_s",
                listing(vec![comment_thing("A1", "t1_A", listing(vec![continue_thing("t1_A1")]))]),
            ),
            comment_thing("B", "t3_s", json!("")),
        ],
    );
    let client = requester.clone().shared();
    let (_, forest) = build_thread(&client, None, &response).unwrap().into_forest();

    let visits = collect_dfs(forest.clone()).await.unwrap();
    assert_eq!(
        ids(&visits),
        pairs(&[(0, "A"), (1, "A1"), (2, "A1a"), (3, "A1a1"), (0, "B")])
    );

    let visits = collect_bfs(forest).await.unwrap();
    assert_eq!(
        ids(&visits),
        pairs(&[(0, "A"), (0, "B"), (1, "A1"), (2, "A1a"), (3, "A1a1")])
    );

    let calls = requester.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].params.get("comment").map(String::as_str), Some("A1"));
}

#[tokio::test]
async fn test_each_traversal_starts_fresh() {
    let (requester, forest) = multi_round();

    let first = collect_dfs(forest.clone()).await.unwrap();
    let second = collect_dfs(forest).await.unwrap();
    assert_eq!(ids(&first), ids(&second));
    // Nothing is cached between traversals.
    assert_eq!(requester.more_children_calls().len(), 8);
}
