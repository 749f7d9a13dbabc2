//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the redtree binary.

use clap::{Parser, Subcommand, ValueEnum};

use crate::CommentSort;

/// Reddit comment-tree command-line interface.
#[derive(Parser, Debug)]
#[command(name = "redtree", about = "Fetch and walk Reddit comment trees", version)]
pub struct Cli {
    /// Output one JSON object per comment instead of an indented tree.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print a submission's whole comment tree, expanding "load more" stubs.
    Thread {
        /// Submission id (base-36, with or without the `t3_` prefix).
        submission: String,

        /// Focus on this comment instead of the whole thread.
        #[arg(long)]
        comment: Option<String>,

        /// Comment sort order.
        #[arg(long)]
        sort: Option<CommentSort>,

        /// Traversal order.
        #[arg(long, value_enum, default_value_t = Order::Depth)]
        order: Order,

        /// Maximum number of comments in the initial fetch.
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Fetch specific comments by id and print them as a tree.
    More {
        /// Submission id the comments belong to.
        submission: String,

        /// Comment ids (base-36).
        #[arg(required = true)]
        ids: Vec<String>,

        /// Comment sort order.
        #[arg(long)]
        sort: Option<CommentSort>,
    },
}

/// Traversal orders offered by the CLI.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Order {
    /// Level by level.
    #[value(alias = "bfs")]
    Breadth,
    /// Pre-order with an explicit stack.
    #[value(alias = "dfs")]
    Depth,
    /// Pre-order with recursive streams.
    Recursive,
}
