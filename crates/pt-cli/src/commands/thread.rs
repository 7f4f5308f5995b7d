//! Thread command
//!
//! Render the reply threads of a stored board or of a raw JSON export.

use super::{parse_board_id, Workspace};
use crate::render;
use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use pt_core::board::Board;
use pt_core::config::LayoutMode;
use pt_core::export::ExportManager;
use pt_core::review::ReviewCollection;
use pt_core::thread::{ThreadBuilder, ThreadWalker};
use pt_core::types::BoardId;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reply layout options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LayoutArg {
    /// Indent one level per reply depth
    Nested,
    /// All replies one level under their top-level review
    Flat,
}

impl From<LayoutArg> for LayoutMode {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Nested => LayoutMode::Nested,
            LayoutArg::Flat => LayoutMode::Flat,
        }
    }
}

/// Arguments for the thread command
#[derive(Debug, Args)]
pub struct ThreadArgs {
    /// Board ID
    #[arg(required_unless_present = "input", conflicts_with = "input")]
    pub board: Option<String>,

    /// Read records from a JSON file instead of a stored board
    #[arg(long, short)]
    pub input: Option<PathBuf>,

    /// Export format (json, json-compact, markdown, text)
    #[arg(long, short)]
    pub format: Option<String>,

    /// Reply layout
    #[arg(long, value_enum)]
    pub layout: Option<LayoutArg>,

    /// Deepest indentation for the nested layout
    #[arg(long)]
    pub max_indent: Option<usize>,

    /// Write to a file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Execute the thread command
pub fn execute(workspace: &Workspace, args: ThreadArgs) -> Result<()> {
    use colored::Colorize;

    let mut config = workspace.config()?;
    if let Some(layout) = args.layout {
        config.thread.layout = layout.into();
    }
    if let Some(max_indent) = args.max_indent {
        config.thread.max_indent = Some(max_indent);
    }
    config.validate()?;

    let (board, forest) = match (&args.input, &args.board) {
        (Some(path), _) => {
            let board = board_from_file(path)?;
            let forest = board.threads(&ThreadBuilder::from_config(&config.thread));
            (board, forest)
        }
        (None, Some(raw)) => {
            let board_id = parse_board_id(raw)?;
            let manager = workspace.manager(&config)?;
            let board = manager
                .load(&board_id)
                .with_context(|| format!("Board '{}' not found", board_id))?;
            let forest = manager.threads(&board);
            (board, forest)
        }
        (None, None) => bail!("Provide a board ID or --input <file>"),
    };
    debug!(
        "Built {} threads from {} records",
        forest.len(),
        forest.total_records()
    );

    if args.format.is_none() && args.output.is_none() {
        let heading = board.title.clone().unwrap_or_else(|| board.id.to_string());
        println!("{}", heading.bold().underline());
        println!("Rating: {}", render::rating_line(&board.rating_summary()));
        if forest.is_empty() {
            println!("\nNo reviews yet.");
        }
        render::print_entries(
            ThreadWalker::new(&forest, config.thread.reply_layout()),
            &config.export.date_format,
        );
        return Ok(());
    }

    let format = args
        .format
        .unwrap_or_else(|| config.export.default_format.clone());
    let exporter = ExportManager::from_config(&config);

    match args.output {
        Some(path) => {
            let written = exporter.export_to_file(&board, &forest, &format, &path)?;
            println!("{} Wrote {}", "✓".green(), written.display());
        }
        None => {
            let content = exporter.export(&board, &forest, &format)?;
            if content.ends_with('\n') {
                print!("{}", content);
            } else {
                println!("{}", content);
            }
        }
    }

    Ok(())
}

/// Wrap a raw record export in a transient board
fn board_from_file(path: &Path) -> Result<Board> {
    let records = pt_storage::read_records(path)?;

    let id = match path
        .file_stem()
        .and_then(|s| s.to_str())
        .and_then(|s| BoardId::from_string(s).ok())
    {
        Some(id) => id,
        None => BoardId::from_string("input")?,
    };

    let mut board = Board::new(id.clone(), id.target_kind());
    board.reviews = ReviewCollection::from_records_lenient(records);
    Ok(board)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_board_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("blog-hello.json");
        fs::write(
            &path,
            r#"[
                {"id": "a", "body": "first", "created_at": "2024-03-01T10:00:00Z"},
                {"id": "a", "body": "duplicate", "created_at": "2024-03-01T10:01:00Z"},
                {"id": "b", "parent_id": "a", "body": "reply", "created_at": "2024-03-01T10:02:00Z"}
            ]"#,
        )
        .unwrap();

        let board = board_from_file(&path).unwrap();
        assert_eq!(board.id.as_str(), "blog-hello");
        assert_eq!(board.review_count(), 2);
    }

    #[test]
    fn test_board_from_file_with_odd_name() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("my export.json");
        fs::write(&path, "[]").unwrap();

        assert_eq!(board_from_file(&path).unwrap().id.as_str(), "input");
    }
}
