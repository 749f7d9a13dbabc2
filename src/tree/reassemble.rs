//! Reassembly of flat "load more children" responses.
//!
//! `/api/morechildren` answers with a flat list of things, each naming its
//! parent by fullname. Parents may be listed after their children, and a
//! `more` stub may refer to a parent that is not in the response at all: that
//! parent is the implicit root of the returned forest.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{RedditError, Result};
use crate::models::{Comment, CommentSort, MoreStub, Thing};
use crate::traits::SharedRequester;
use crate::tree::more::MoreComments;
use crate::tree::node::{CommentNode, Node};

/// Reassemble a full `morechildren` response body.
///
/// # Errors
///
/// Returns [`RedditError::MalformedResponse`] if the body has no
/// `json.data.things` array, plus everything [`reassemble`] rejects.
pub fn reassemble_response(
    client: &SharedRequester,
    submission_id36: &str,
    sort: Option<CommentSort>,
    body: &Value,
) -> Result<CommentNode> {
    let things = body
        .pointer("/json/data/things")
        .and_then(Value::as_array)
        .ok_or_else(|| RedditError::malformed("morechildren response has no json.data.things"))?;
    reassemble(client, submission_id36, sort, things)
}

/// Turn flat things into an empty-rooted forest.
///
/// The root never carries a value, so splicing the forest into a larger
/// traversal cannot repeat a comment.
///
/// # Errors
///
/// Returns [`RedditError::MalformedResponse`] when the things cannot form a
/// forest without losing or duplicating data: more than one `more` stub
/// whose parent is absent, two stubs for the same parent, a repeated
/// fullname, an unknown kind, or parent references that form a cycle.
pub fn reassemble(
    client: &SharedRequester,
    submission_id36: &str,
    sort: Option<CommentSort>,
    things: &[Value],
) -> Result<CommentNode> {
    let things = things
        .iter()
        .map(Thing::deserialize)
        .collect::<core::result::Result<Vec<_>, _>>()?;

    // Pass 1: every comment gets a slot and an empty children bucket.
    let mut slots: HashMap<String, Slot> = HashMap::with_capacity(things.len());
    let mut parents: Vec<(String, String)> = Vec::new();
    for thing in things.iter().filter(|t| !t.is_more()) {
        if !thing.is_comment() {
            return Err(RedditError::malformed(format!(
                "unexpected '{}' thing in morechildren response",
                thing.kind
            )));
        }
        let comment = Comment::deserialize(&thing.data)?;
        let name = comment.fullname();
        parents.push((name.clone(), comment.parent_id.clone()));
        match slots.entry(name) {
            Entry::Occupied(e) => {
                return Err(RedditError::malformed(format!(
                    "comment '{}' appears twice",
                    e.key()
                )));
            }
            Entry::Vacant(e) => {
                e.insert(Slot {
                    comment,
                    children: Vec::new(),
                    more: None,
                });
            }
        }
    }

    // Pass 2: link comments to parents and stubs to their owners.
    let mut roots: Vec<String> = Vec::new();
    let mut root_more: Option<MoreComments> = None;
    let mut parents = parents.into_iter();
    for thing in &things {
        if thing.is_more() {
            let stub = MoreStub::deserialize(&thing.data)?;
            if stub.children.is_empty() && !stub.is_continue_thread() {
                tracing::warn!(parent = %stub.parent_id, "more stub lists no children");
            }
            let parent_id = stub.parent_id.clone();
            let more = MoreComments::from_stub(client, submission_id36, sort, stub)?;
            match slots.get_mut(&parent_id) {
                Some(slot) if slot.more.is_some() => {
                    return Err(RedditError::malformed(format!(
                        "comment '{parent_id}' has more than one more stub"
                    )));
                }
                Some(slot) => slot.more = Some(more),
                None if root_more.is_some() => {
                    return Err(RedditError::malformed(format!(
                        "more than one orphaned more stub (second parent '{parent_id}')"
                    )));
                }
                None => root_more = Some(more),
            }
            continue;
        }

        let Some((name, parent_id)) = parents.next() else {
            return Err(RedditError::malformed("comment index out of step with things"));
        };
        match slots.get_mut(&parent_id) {
            Some(parent) => parent.children.push(name),
            None => roots.push(name),
        }
    }

    let total = slots.len();
    let children = assemble(&mut slots, roots)?;
    if !slots.is_empty() {
        return Err(RedditError::malformed(format!(
            "{} of {total} comments are unreachable from the forest root",
            slots.len()
        )));
    }

    tracing::debug!(
        comments = total,
        top_level = children.len(),
        has_more = root_more.is_some(),
        "reassembled morechildren forest"
    );
    Ok(Node::empty(children, root_more))
}

/// A comment awaiting assembly, with the fullnames of its children.
struct Slot {
    comment: Comment,
    children: Vec<String>,
    more: Option<MoreComments>,
}

/// Turn the linked slots into owned nodes, consuming every slot reached.
fn assemble(slots: &mut HashMap<String, Slot>, roots: Vec<String>) -> Result<Vec<CommentNode>> {
    struct Frame {
        comment: Comment,
        pending: std::vec::IntoIter<String>,
        children: Vec<CommentNode>,
        more: Option<MoreComments>,
    }

    fn open(slots: &mut HashMap<String, Slot>, name: &str) -> Result<Frame> {
        let slot = slots.remove(name).ok_or_else(|| {
            RedditError::malformed(format!("comment '{name}' is reachable twice"))
        })?;
        Ok(Frame {
            comment: slot.comment,
            pending: slot.children.into_iter(),
            children: Vec::new(),
            more: slot.more,
        })
    }

    let mut forest = Vec::with_capacity(roots.len());
    for root in roots {
        let mut stack = vec![open(slots, &root)?];
        while let Some(frame) = stack.last_mut() {
            if let Some(child) = frame.pending.next() {
                let next = open(slots, &child)?;
                stack.push(next);
                continue;
            }
            let Some(done) = stack.pop() else {
                break;
            };
            let node = Node::new(done.comment, done.children, done.more);
            match stack.last_mut() {
                Some(parent) => parent.children.push(node),
                None => forest.push(node),
            }
        }
    }
    Ok(forest)
}
