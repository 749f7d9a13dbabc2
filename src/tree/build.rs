//! Tree builder for nested thread responses.
//!
//! A thread response is a two-element array: a one-item listing holding the
//! submission, then a listing of top-level entries whose `replies` nest the
//! same listing shape. At every level a trailing `more` entry becomes the
//! node's [`MoreComments`].

use serde::Deserialize;
use serde_json::Value;

use crate::error::{RedditError, Result};
use crate::models::thing::{KIND_COMMENT, KIND_LISTING, KIND_MORE, KIND_SUBMISSION};
use crate::models::{Comment, CommentSort, MoreStub, Submission, Thing};
use crate::traits::SharedRequester;
use crate::tree::more::MoreComments;
use crate::tree::node::{CommentNode, Node, SubmissionNode};

/// Build the submission tree from a thread response.
///
/// # Errors
///
/// Returns [`RedditError::MalformedResponse`] when the response is not a
/// two-listing array, when the first listing does not hold a submission, or
/// when any level contains an unexpected kind or a `more` entry that is not
/// last.
pub fn build_thread(
    client: &SharedRequester,
    sort: Option<CommentSort>,
    response: &Value,
) -> Result<SubmissionNode> {
    let parts = response
        .as_array()
        .filter(|parts| parts.len() == 2)
        .ok_or_else(|| RedditError::malformed("thread response is not a two-element array"))?;

    let submission = parse_submission(&parts[0])?;
    let (children, more) = build_listing(client, &submission.id, sort, &parts[1])?;

    tracing::debug!(
        submission = %submission.id,
        top_level = children.len(),
        has_more = more.is_some(),
        "built comment tree"
    );
    Ok(Node::new(submission, children, more))
}

/// Build the nodes of one listing level and everything below it.
///
/// Returns the level's nodes in display order plus the thunk for the
/// trailing `more` entry, if any.
///
/// # Errors
///
/// See [`build_thread`].
pub fn build_listing(
    client: &SharedRequester,
    submission_id36: &str,
    sort: Option<CommentSort>,
    listing: &Value,
) -> Result<(Vec<CommentNode>, Option<MoreComments>)> {
    let ctx = Context {
        client,
        submission_id36,
        sort,
    };

    let (entries, more) = ctx.split_level(listing_children(listing)?)?;
    let mut stack = vec![Frame {
        comment: None,
        entries: entries.iter(),
        children: Vec::new(),
        more,
    }];

    loop {
        let Some(frame) = stack.last_mut() else {
            return Err(RedditError::malformed("comment tree frame stack underflow"));
        };

        if let Some(entry) = frame.entries.next() {
            let data = entry
                .get("data")
                .ok_or_else(|| RedditError::malformed("comment entry has no data"))?;
            let comment = Comment::deserialize(data)?;
            let (entries, more) = ctx.split_level(replies_of(data)?)?;
            stack.push(Frame {
                comment: Some(comment),
                entries: entries.iter(),
                children: Vec::new(),
                more,
            });
            continue;
        }

        let Some(done) = stack.pop() else {
            return Err(RedditError::malformed("comment tree frame stack underflow"));
        };
        match (done.comment, stack.last_mut()) {
            (Some(comment), Some(parent)) => {
                parent
                    .children
                    .push(Node::new(comment, done.children, done.more));
            }
            (None, None) => return Ok((done.children, done.more)),
            _ => return Err(RedditError::malformed("unbalanced comment tree frames")),
        }
    }
}

struct Context<'a> {
    client: &'a SharedRequester,
    submission_id36: &'a str,
    sort: Option<CommentSort>,
}

/// One listing level under construction.
struct Frame<'a> {
    comment: Option<Comment>,
    entries: std::slice::Iter<'a, Value>,
    children: Vec<CommentNode>,
    more: Option<MoreComments>,
}

impl Context<'_> {
    /// Separate a level's trailing `more` entry from its comment entries.
    fn split_level<'v>(
        &self,
        entries: &'v [Value],
    ) -> Result<(&'v [Value], Option<MoreComments>)> {
        let (entries, more) = match entries.split_last() {
            Some((last, rest)) if kind_of(last) == Some(KIND_MORE) => {
                let stub = MoreStub::deserialize(last.get("data").unwrap_or(&Value::Null))?;
                let more =
                    MoreComments::from_stub(self.client, self.submission_id36, self.sort, stub)?;
                (rest, Some(more))
            }
            _ => (entries, None),
        };

        if let Some(bad) = entries.iter().find(|e| kind_of(e) != Some(KIND_COMMENT)) {
            return Err(RedditError::malformed(format!(
                "unexpected '{}' entry among comments",
                kind_of(bad).unwrap_or("<missing kind>")
            )));
        }

        Ok((entries, more))
    }
}

fn kind_of(entry: &Value) -> Option<&str> {
    entry.get("kind").and_then(Value::as_str)
}

fn listing_children(listing: &Value) -> Result<&[Value]> {
    if let Some(kind) = kind_of(listing).filter(|k| *k != KIND_LISTING) {
        return Err(RedditError::malformed(format!(
            "expected a listing, found '{kind}'"
        )));
    }
    listing
        .pointer("/data/children")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .ok_or_else(|| RedditError::malformed("listing has no data.children array"))
}

/// The entries of a comment's `replies`, which is `""` when there are none.
fn replies_of(data: &Value) -> Result<&[Value]> {
    match data.get("replies") {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::String(s)) if s.is_empty() => Ok(&[]),
        Some(Value::Object(o)) if o.is_empty() => Ok(&[]),
        Some(listing @ Value::Object(_)) => listing_children(listing),
        Some(other) => Err(RedditError::malformed(format!(
            "comment replies has unexpected shape: {other}"
        ))),
    }
}

fn parse_submission(listing: &Value) -> Result<Submission> {
    let entry = listing_children(listing)?
        .first()
        .ok_or_else(|| RedditError::malformed("thread response holds no submission"))?;
    let thing = Thing::deserialize(entry)?;
    if thing.kind != KIND_SUBMISSION {
        return Err(RedditError::malformed(format!(
            "expected a submission, found '{}'",
            thing.kind
        )));
    }
    Ok(Submission::deserialize(&thing.data)?)
}
