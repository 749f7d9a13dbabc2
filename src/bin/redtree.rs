//! Reddit comment-tree CLI binary.
//!
//! Fetches a thread and prints every comment, expanding "load more" stubs
//! as the walk reaches them.

use std::process::ExitCode;

use clap::Parser;
use futures::stream::BoxStream;
use futures::TryStreamExt;
use redtree::cli::{Cli, Command, Order};
use redtree::output::{render_visit, PrettyPrint, VisitRecord};
use redtree::{
    breadth_first, depth_first, depth_first_recursive, fetch_more_children, CommentNode,
    CommentSort, Get, RedditClient, SharedRequester, SubmissionNode, ThreadQuery, Visit,
};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let client = match RedditClient::from_env() {
        Ok(c) => c.shared(),
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Set REDDIT_ACCESS_TOKEN environment variable");
            return ExitCode::FAILURE;
        }
    };

    match run(&client, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(client: &SharedRequester, cli: Cli) -> redtree::Result<()> {
    match cli.command {
        Command::Thread {
            submission,
            comment,
            sort,
            order,
            limit,
        } => {
            let query = ThreadQuery {
                comment,
                sort,
                limit,
                ..Default::default()
            };
            handle_thread(client, submission, query, order, cli.json).await
        }
        Command::More {
            submission,
            ids,
            sort,
        } => handle_more(client, &submission, &ids, sort, cli.json).await,
    }
}

async fn handle_thread(
    client: &SharedRequester,
    submission: String,
    query: ThreadQuery,
    order: Order,
    json: bool,
) -> redtree::Result<()> {
    let tree = SubmissionNode::get(client, (submission, query)).await?;
    let (submission, comments) = tree.into_forest();

    if !json {
        if let Some(submission) = submission {
            println!("{}\n", submission.pretty_print());
        }
    }

    print_walk(walk(comments, order), json).await
}

async fn handle_more(
    client: &SharedRequester,
    submission: &str,
    ids: &[String],
    sort: Option<CommentSort>,
    json: bool,
) -> redtree::Result<()> {
    let forest = fetch_more_children(client, submission, ids, sort).await?;
    print_walk(walk(forest, Order::Depth), json).await
}

fn walk(root: CommentNode, order: Order) -> BoxStream<'static, redtree::Result<Visit>> {
    match order {
        Order::Breadth => Box::pin(breadth_first(root).into_stream()),
        Order::Depth => Box::pin(depth_first(root).into_stream()),
        Order::Recursive => depth_first_recursive(root),
    }
}

async fn print_walk(
    mut visits: BoxStream<'static, redtree::Result<Visit>>,
    json: bool,
) -> redtree::Result<()> {
    let mut count = 0usize;
    while let Some((depth, comment)) = visits.try_next().await? {
        if json {
            let record = VisitRecord {
                depth,
                comment: &comment,
            };
            println!("{}", serde_json::to_string(&record)?);
        } else {
            println!("{}", render_visit(depth, &comment));
        }
        count += 1;
    }

    if !json {
        println!("\n{count} comments");
    }
    Ok(())
}
