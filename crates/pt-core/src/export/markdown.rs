//! Markdown exporter for boards

use super::exporter::Exporter;
use crate::board::Board;
use crate::error::Result;
use crate::review::{star_bar, RatingSummary, MAX_RATING};
use crate::thread::{Forest, ReplyLayout, ThreadWalker, VisualEntry};
use crate::types::author_display;
use chrono::{DateTime, Utc};

/// Markdown exporter
///
/// Top-level reviews become `###` sections; replies are rendered as
/// blockquotes, one `>` per indentation level.
pub struct MarkdownExporter {
    /// Reply layout
    layout: ReplyLayout,
    /// Include statistics section
    include_stats: bool,
    /// strftime pattern for timestamps
    date_format: String,
}

impl MarkdownExporter {
    /// Create a new Markdown exporter with default settings
    pub fn new() -> Self {
        Self {
            layout: ReplyLayout::default(),
            include_stats: true,
            date_format: "%Y-%m-%d %H:%M".to_string(),
        }
    }

    /// Set the reply layout
    pub fn with_layout(mut self, layout: ReplyLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Set whether to include statistics
    pub fn with_stats(mut self, include: bool) -> Self {
        self.include_stats = include;
        self
    }

    /// Set the timestamp format
    pub fn with_date_format(mut self, format: &str) -> Self {
        self.date_format = format.to_string();
        self
    }

    fn date(&self, at: &DateTime<Utc>) -> String {
        at.format(&self.date_format).to_string()
    }

    /// Render the report header
    fn render_header(&self, board: &Board) -> String {
        let mut header = String::new();
        match &board.title {
            Some(title) => header.push_str(&format!("# Reviews: {}\n\n", title)),
            None => header.push_str(&format!("# Reviews: {}\n\n", board.id)),
        }

        header.push_str(&format!("**Board:** `{}`\n", board.id));
        header.push_str(&format!("**Target:** {}\n", board.target));
        header.push_str(&format!("**Updated:** {}\n", self.date(&board.updated_at)));
        header.push('\n');
        header
    }

    /// Render the rating section
    fn render_stats(&self, summary: &RatingSummary) -> String {
        if !self.include_stats {
            return String::new();
        }

        let mut stats = String::new();
        stats.push_str("## Rating\n\n");

        if summary.is_empty() {
            stats.push_str("_No ratings yet_\n\n");
            return stats;
        }

        stats.push_str(&format!(
            "{} **{:.1}** / {} from {} {}\n\n",
            summary.stars(),
            summary.rounded_average(),
            MAX_RATING,
            summary.count,
            if summary.count == 1 { "review" } else { "reviews" }
        ));

        stats.push_str("| Stars | Reviews |\n|---|---|\n");
        for (i, n) in summary.distribution.iter().enumerate().rev() {
            stats.push_str(&format!("| {} | {} |\n", i + 1, n));
        }
        stats.push('\n');
        stats
    }

    /// Render one walker entry
    fn render_entry(&self, entry: &VisualEntry<'_>) -> String {
        let record = entry.record;
        let author = author_display(record.author.as_ref());
        let mut output = String::new();

        if entry.is_root() {
            output.push_str(&format!("### {}", author));
            if let Some(rating) = record.effective_rating() {
                output.push_str(&format!(" {}", star_bar(rating)));
            }
            output.push_str(&format!("\n\n*{}*\n\n", self.date(&record.created_at)));
            output.push_str(record.body.trim_end());
            output.push_str("\n\n");
            return output;
        }

        let quote = ">".repeat(entry.indent.max(1));
        output.push_str(&format!(
            "{} **{}** replying to @{} · *{}*\n{}\n",
            quote,
            author,
            author_display(entry.replying_to),
            self.date(&record.created_at),
            quote
        ));
        for line in record.body.trim_end().lines() {
            if line.is_empty() {
                output.push_str(&format!("{}\n", quote));
            } else {
                output.push_str(&format!("{} {}\n", quote, line));
            }
        }
        output.push('\n');
        output
    }

    /// Render all threads
    fn render_threads(&self, forest: &Forest) -> String {
        let mut output = String::from("## Threads\n\n");
        if forest.is_empty() {
            output.push_str("_No reviews yet_\n");
            return output;
        }

        for entry in ThreadWalker::new(forest, self.layout) {
            output.push_str(&self.render_entry(&entry));
        }
        output
    }
}

impl Default for MarkdownExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Exporter for MarkdownExporter {
    fn export(&self, board: &Board, forest: &Forest) -> Result<String> {
        let mut output = String::new();
        output.push_str(&self.render_header(board));
        output.push_str(&self.render_stats(&board.rating_summary()));
        output.push_str(&self.render_threads(forest));
        Ok(output)
    }

    fn format_name(&self) -> &str {
        "markdown"
    }

    fn file_extension(&self) -> &str {
        "md"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::fixtures::sample_board;
    use crate::thread::{ChildOrder, ThreadBuilder};

    fn render(exporter: MarkdownExporter) -> String {
        let board = sample_board();
        let forest = board.threads(&ThreadBuilder::new(ChildOrder::OldestFirst));
        exporter.export(&board, &forest).unwrap()
    }

    #[test]
    fn test_markdown_header_and_stats() {
        let md = render(MarkdownExporter::new());

        assert!(md.starts_with("# Reviews: Operating Systems, Unit 3\n"));
        assert!(md.contains("**Board:** `note-os3`"));
        assert!(md.contains("★★★☆☆ **3.0** / 5 from 2 reviews"));
        assert!(md.contains("| 4 | 1 |"));
        assert!(md.contains("| 2 | 1 |"));
    }

    #[test]
    fn test_markdown_nested_replies() {
        let md = render(MarkdownExporter::new());

        // Newest thread first
        let chen = md.find("### Chen ★★☆☆☆").unwrap();
        let asha = md.find("### Asha ★★★★☆").unwrap();
        assert!(chen < asha);

        assert!(md.contains("> **Ben** replying to @Asha · *2024-03-01 10:05*\n>\n> Agreed, page 4 helped\n"));
        assert!(md.contains(">> **Deleted User** replying to @Ben"));
        assert!(md.contains(">> Thanks both\n"));
    }

    #[test]
    fn test_markdown_layouts() {
        let flat = render(MarkdownExporter::new().with_layout(ReplyLayout::Flattened));
        assert!(flat.contains("\n> **Deleted User** replying to @Ben"));
        assert!(!flat.contains(">>"));

        let capped = render(
            MarkdownExporter::new().with_layout(ReplyLayout::Nested { max_indent: Some(1) }),
        );
        assert!(!capped.contains(">>"));
    }

    #[test]
    fn test_markdown_without_stats() {
        let md = render(MarkdownExporter::new().with_stats(false).with_date_format("%d/%m/%Y"));
        assert!(!md.contains("## Rating"));
        assert!(md.contains("*01/03/2024*"));
    }
}
