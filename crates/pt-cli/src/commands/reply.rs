//! Reply command
//!
//! Add a reply and print the thread it landed in.

use super::{parse_board_id, Workspace};
use crate::render;
use anyhow::{Context, Result};
use clap::Args;
use pt_core::review::ReviewBuilder;
use pt_core::thread::ThreadWalker;
use pt_core::types::{AuthorRef, ReviewId};

/// Arguments for the reply command
#[derive(Debug, Args)]
pub struct ReplyArgs {
    /// Board ID
    pub board: String,

    /// ID of the review or reply being answered
    #[arg(long)]
    pub parent: String,

    /// Author user ID
    #[arg(long)]
    pub author: String,

    /// Author display name (defaults to the ID)
    #[arg(long)]
    pub name: Option<String>,

    /// Reply text
    pub body: String,
}

/// Execute the reply command
pub fn execute(workspace: &Workspace, args: ReplyArgs) -> Result<()> {
    use colored::Colorize;

    let config = workspace.config()?;
    let manager = workspace.manager(&config)?;
    let board_id = parse_board_id(&args.board)?;

    let name = args.name.unwrap_or_else(|| args.author.clone());
    let reply = ReviewBuilder::reply_to(ReviewId::from_string(args.parent), args.body)
        .author(AuthorRef::new(args.author, name))
        .build()?;
    let reply_id = reply.id.clone();

    let (_, forest) = manager
        .post_reply(&board_id, reply)
        .with_context(|| format!("Failed to reply on {}", board_id))?;

    println!(
        "{} Posted reply {} on {}",
        "✓".green(),
        reply_id.to_string().cyan(),
        board_id
    );

    if let Some(root) = forest.thread_of(&reply_id) {
        let layout = config.thread.reply_layout();
        render::print_entries(
            ThreadWalker::from_roots(std::slice::from_ref(root), layout),
            &config.export.date_format,
        );
    }

    Ok(())
}
