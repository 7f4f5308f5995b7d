//! Colored terminal rendering of reply threads

use colored::Colorize;
use pt_core::review::{star_bar, RatingSummary};
use pt_core::thread::VisualEntry;
use pt_core::types::author_display;

const INDENT: &str = "    ";

/// Print walker entries as an indented tree
pub fn print_entries<'a>(entries: impl IntoIterator<Item = VisualEntry<'a>>, date_format: &str) {
    for entry in entries {
        let record = entry.record;
        let pad = INDENT.repeat(entry.indent);
        let author = author_display(record.author.as_ref());
        let date = record.created_at.format(date_format).to_string();

        if entry.is_root() {
            println!();
            let rating = record
                .effective_rating()
                .map(|r| format!(" {}", star_bar(r)))
                .unwrap_or_default();
            println!(
                "{}{}  {}  {}",
                author.bold(),
                rating.yellow(),
                date.dimmed(),
                record.id.to_string().dimmed()
            );
        } else {
            println!(
                "{}↳ {} {}  {}  {}",
                pad,
                author.cyan(),
                format!("@{}", author_display(entry.replying_to)).dimmed(),
                date.dimmed(),
                record.id.to_string().dimmed()
            );
        }

        for line in record.body.trim_end().lines() {
            println!("{}  {}", pad, line);
        }
    }
}

/// One-line rating summary
pub fn rating_line(summary: &RatingSummary) -> String {
    if summary.is_empty() {
        return "no ratings yet".dimmed().to_string();
    }
    format!(
        "{} {:.1}/5 ({} {})",
        summary.stars().yellow(),
        summary.rounded_average(),
        summary.count,
        if summary.count == 1 { "rating" } else { "ratings" }
    )
}
