//! Board command
//!
//! List, inspect and delete review boards.

use super::{parse_board_id, Workspace};
use crate::render;
use anyhow::{Context, Result};
use clap::Subcommand;
use pt_core::board::BoardManager;
use pt_core::review::MAX_RATING;
use pt_core::thread::{ReplyLayout, ThreadWalker};

/// Board subcommands
#[derive(Debug, Subcommand)]
pub enum BoardCommand {
    /// List all boards
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a board and its threads
    Show {
        /// Board ID
        id: String,

        /// Output the stored board as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show rating and thread statistics
    Stats {
        /// Board ID
        id: String,
    },

    /// Delete a board
    Delete {
        /// Board ID
        id: String,

        /// Skip confirmation
        #[arg(long, short)]
        yes: bool,
    },
}

/// Execute the board command
pub fn execute(workspace: &Workspace, cmd: BoardCommand) -> Result<()> {
    let config = workspace.config()?;
    let manager = workspace.manager(&config)?;

    match cmd {
        BoardCommand::List { json } => list_boards(&manager, json),
        BoardCommand::Show { id, json } => show_board(
            &manager,
            &id,
            json,
            config.thread.reply_layout(),
            &config.export.date_format,
        ),
        BoardCommand::Stats { id } => board_stats(&manager, &id),
        BoardCommand::Delete { id, yes } => delete_board(&manager, &id, yes),
    }
}

fn list_boards(manager: &BoardManager, as_json: bool) -> Result<()> {
    use colored::Colorize;

    let boards = manager.list()?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&boards)?);
        return Ok(());
    }

    if boards.is_empty() {
        println!("No boards found.");
        return Ok(());
    }

    println!("{}", "Boards:".bold().underline());
    println!();

    for info in &boards {
        let age = chrono::Utc::now()
            .signed_duration_since(info.updated_at)
            .num_hours();
        let age_str = if age < 1 {
            "just now".to_string()
        } else if age < 24 {
            format!("{}h ago", age)
        } else {
            format!("{}d ago", age / 24)
        };

        println!(
            "  {} {} reviews, {:.1}★ from {} ({})",
            info.id.to_string().green(),
            info.review_count.to_string().cyan(),
            info.average_rating,
            info.rated_count,
            age_str.dimmed()
        );
        if let Some(title) = &info.title {
            println!("    {}", title);
        }
    }

    Ok(())
}

fn show_board(
    manager: &BoardManager,
    id: &str,
    as_json: bool,
    layout: ReplyLayout,
    date_format: &str,
) -> Result<()> {
    use colored::Colorize;

    let board_id = parse_board_id(id)?;
    let board = manager
        .load(&board_id)
        .with_context(|| format!("Board '{}' not found", id))?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&board)?);
        return Ok(());
    }

    println!("{}", "Board Details".bold().underline());
    println!();
    println!("  ID: {}", board.id.to_string().green());
    println!("  Target: {}", board.target);
    if let Some(title) = &board.title {
        println!("  Title: {}", title);
    }
    println!("  Created: {}", board.created_at.format("%Y-%m-%d %H:%M:%S"));
    println!("  Updated: {}", board.updated_at.format("%Y-%m-%d %H:%M:%S"));
    println!("  Reviews: {}", board.review_count().to_string().yellow());
    println!("  Rating: {}", render::rating_line(&board.rating_summary()));

    let forest = manager.threads(&board);
    render::print_entries(ThreadWalker::new(&forest, layout), date_format);

    Ok(())
}

fn board_stats(manager: &BoardManager, id: &str) -> Result<()> {
    use colored::Colorize;

    let board_id = parse_board_id(id)?;
    let board = manager
        .load(&board_id)
        .with_context(|| format!("Board '{}' not found", id))?;
    let forest = manager.threads(&board);
    let summary = board.rating_summary();

    println!("{}", format!("Statistics for {}", board.id).bold().underline());
    println!();
    println!("  Rating: {}", render::rating_line(&summary));

    let widest = summary.distribution.iter().copied().max().unwrap_or(0).max(1);
    for stars in (1..=MAX_RATING).rev() {
        let count = summary.distribution[usize::from(stars - 1)];
        let bar = "█".repeat(count * 20 / widest);
        println!("    {} {:<20} {}", stars, bar.yellow(), count);
    }

    let top_level = board.reviews.top_level();
    let unanswered = top_level
        .iter()
        .filter(|r| board.reviews.replies_to(&r.id).is_empty())
        .count();
    let top_level = top_level.len();
    println!();
    println!("  Top-level reviews: {} ({} unanswered)", top_level, unanswered);
    println!("  Replies: {}", board.review_count() - top_level);
    println!("  Threads: {}", forest.len());
    println!("  Deepest reply: {}", forest.max_depth());
    if let Some(busiest) = forest.roots().iter().max_by_key(|r| r.reply_count()) {
        if busiest.reply_count() > 0 {
            println!(
                "  Busiest thread: {} ({} replies)",
                busiest.id().to_string().cyan(),
                busiest.reply_count()
            );
        }
    }

    Ok(())
}

fn delete_board(manager: &BoardManager, id: &str, yes: bool) -> Result<()> {
    use colored::Colorize;

    let board_id = parse_board_id(id)?;
    let board = manager
        .load(&board_id)
        .with_context(|| format!("Board '{}' not found", id))?;

    if !yes {
        use dialoguer::Confirm;

        println!("Board: {}", id.green());
        println!("  {} reviews and replies", board.review_count());

        let confirmed = Confirm::new()
            .with_prompt("Delete this board?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("Deletion cancelled.");
            return Ok(());
        }
    }

    manager.delete(&board_id)?;
    println!("{} Board '{}' deleted.", "✓".green(), id);

    Ok(())
}
