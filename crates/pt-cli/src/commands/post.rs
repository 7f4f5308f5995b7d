//! Post command
//!
//! Add a top-level review to a board, creating the board on first use.

use super::{parse_board_id, Workspace};
use crate::render;
use anyhow::{Context, Result};
use clap::Args;
use pt_core::review::ReviewBuilder;
use pt_core::types::AuthorRef;

/// Arguments for the post command
#[derive(Debug, Args)]
pub struct PostArgs {
    /// Board ID, e.g. note-65a1f0c2 or blog-intro-to-os
    pub board: String,

    /// Author user ID
    #[arg(long)]
    pub author: String,

    /// Author display name (defaults to the ID)
    #[arg(long)]
    pub name: Option<String>,

    /// Star rating, 1 to 5 (0 means no rating)
    #[arg(long, short)]
    pub rating: Option<u8>,

    /// Title to record when the board is created
    #[arg(long)]
    pub title: Option<String>,

    /// Review text
    pub body: String,
}

/// Execute the post command
pub fn execute(workspace: &Workspace, args: PostArgs) -> Result<()> {
    use colored::Colorize;

    let config = workspace.config()?;
    let manager = workspace.manager(&config)?;
    let board_id = parse_board_id(&args.board)?;

    let name = args.name.unwrap_or_else(|| args.author.clone());
    let mut builder = ReviewBuilder::top_level(args.body).author(AuthorRef::new(args.author, name));
    if let Some(rating) = args.rating {
        builder = builder.rating(rating);
    }
    let review = builder.build()?;
    let review_id = review.id.clone();

    // A new board is written together with its first accepted review
    let mut board = manager.load_or_new(&board_id, board_id.target_kind())?;
    if board.title.is_none() {
        board.title = args.title;
    }
    manager
        .post_review_to(&mut board, review)
        .with_context(|| format!("Failed to post review on {}", board_id))?;

    println!(
        "{} Posted review {} on {}",
        "✓".green(),
        review_id.to_string().cyan(),
        board_id
    );
    println!("  Rating: {}", render::rating_line(&board.rating_summary()));

    Ok(())
}
