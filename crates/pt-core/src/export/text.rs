//! Plain-text exporter, as printed to a terminal

use super::exporter::Exporter;
use crate::board::Board;
use crate::error::Result;
use crate::review::star_bar;
use crate::thread::{Forest, ReplyLayout, ThreadWalker};
use crate::types::author_display;

const INDENT: &str = "    ";

/// Plain-text exporter
pub struct TextExporter {
    layout: ReplyLayout,
    include_stats: bool,
    date_format: String,
}

impl TextExporter {
    /// Create a new text exporter with default settings
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

    /// Set whether to include the rating line
    pub fn with_stats(mut self, include: bool) -> Self {
        self.include_stats = include;
        self
    }

    /// Set the timestamp format
    pub fn with_date_format(mut self, format: &str) -> Self {
        self.date_format = format.to_string();
        self
    }
}

impl Default for TextExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Exporter for TextExporter {
    fn export(&self, board: &Board, forest: &Forest) -> Result<String> {
        let mut output = String::new();

        match &board.title {
            Some(title) => output.push_str(&format!("{} ({})\n", title, board.id)),
            None => output.push_str(&format!("{}\n", board.id)),
        }

        if self.include_stats {
            let summary = board.rating_summary();
            if summary.is_empty() {
                output.push_str("Rating: none\n");
            } else {
                output.push_str(&format!(
                    "Rating: {} {:.1}/5 ({} rated, {} total)\n",
                    summary.stars(),
                    summary.rounded_average(),
                    summary.count,
                    forest.total_records()
                ));
            }
        }

        for entry in ThreadWalker::new(forest, self.layout) {
            let pad = INDENT.repeat(entry.indent);
            let record = entry.record;
            let author = author_display(record.author.as_ref());
            let date = record.created_at.format(&self.date_format);

            if entry.is_root() {
                output.push('\n');
                match record.effective_rating() {
                    Some(rating) => {
                        output.push_str(&format!("{} {}  {}\n", author, star_bar(rating), date))
                    }
                    None => output.push_str(&format!("{}  {}\n", author, date)),
                }
            } else {
                output.push_str(&format!(
                    "{}{} -> @{}  {}\n",
                    pad,
                    author,
                    author_display(entry.replying_to),
                    date
                ));
            }

            for line in record.body.trim_end().lines() {
                output.push_str(&format!("{}  {}\n", pad, line));
            }
        }

        Ok(output)
    }

    fn format_name(&self) -> &str {
        "text"
    }

    fn file_extension(&self) -> &str {
        "txt"
    }
}
