//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use serde::Serialize;

use crate::{Comment, Submission};

/// Indentation per depth level in tree output.
const INDENT: &str = "  ";

/// Longest body excerpt shown per comment line.
const EXCERPT_CHARS: usize = 80;

/// Trait for human-readable key-value output.
///
/// Implemented by entity types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

impl PrettyPrint for Submission {
    fn pretty_print(&self) -> String {
        let header = format!("Submission: {}", self.title);
        let divider = "─".repeat(header.chars().count().clamp(30, 80));

        let mut lines = vec![header, divider, format!("ID:             {}", self.fullname())];

        if let Some(ref subreddit) = self.subreddit {
            lines.push(format!("Subreddit:      r/{}", subreddit));
        }

        if let Some(ref author) = self.author {
            lines.push(format!("Author:         u/{}", author));
        }

        lines.push(format!("Score:          {}", self.score));
        lines.push(format!("Comments:       {}", self.num_comments));

        if let Some(created) = self.created() {
            lines.push(format!("Created:        {}", created.format("%Y-%m-%d %H:%M:%S UTC")));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Comment {
    fn pretty_print(&self) -> String {
        format!(
            "[{}] u/{} ({} points): {}",
            self.id,
            self.author_or_deleted(),
            self.score,
            excerpt(&self.body)
        )
    }
}

/// One traversal line: the comment indented by its depth.
pub fn render_visit(depth: usize, comment: &Comment) -> String {
    format!("{}{}", INDENT.repeat(depth), comment.pretty_print())
}

/// JSON shape of one traversal line.
#[derive(Debug, Serialize)]
pub struct VisitRecord<'a> {
    pub depth: usize,
    pub comment: &'a Comment,
}

/// First line of `body`, cut to a fixed number of characters.
fn excerpt(body: &str) -> String {
    let line = body.lines().next().unwrap_or_default();
    let mut out: String = line.chars().take(EXCERPT_CHARS).collect();
    if line.chars().count() > EXCERPT_CHARS || body.lines().nth(1).is_some() {
        out.push('…');
    }
    out
}
