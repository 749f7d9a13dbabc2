//! Pre-order traversal expressed as recursive streams.

use futures::future;
use futures::stream::{self, BoxStream, StreamExt};

use crate::error::Result;
use crate::traversal::Visit;
use crate::tree::CommentNode;

/// Walk `root` in the same order as [`depth_first`](crate::depth_first),
/// composing one stream per node.
///
/// Each level of the tree nests one more stream, so very deep threads are
/// better served by the iterative walker.
pub fn depth_first_recursive(root: CommentNode) -> BoxStream<'static, Result<Visit>> {
    walk(root, 0)
        .scan(false, |failed, item| {
            if *failed {
                return future::ready(None);
            }
            *failed = item.is_err();
            future::ready(Some(item))
        })
        .boxed()
}

fn walk(node: CommentNode, depth: usize) -> BoxStream<'static, Result<Visit>> {
    let child_depth = if node.value.is_some() { depth + 1 } else { depth };

    let head = stream::iter(node.value.map(|comment| Ok((depth, comment))));
    let children = stream::iter(node.children).flat_map(move |child| walk(child, child_depth));
    let more = stream::iter(node.more)
        .then(|more| async move { more.fetch().await })
        .flat_map(move |expanded| match expanded {
            Ok(expanded) => walk(expanded, child_depth),
            Err(e) => stream::once(future::ready(Err(e))).boxed(),
        });

    head.chain(children).chain(more).boxed()
}
