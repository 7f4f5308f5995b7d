//! Export functionality for review boards
//!
//! Exporters render a board together with its reply forest:
//! - JSON (pretty and compact), nested the same way as the forest
//! - Markdown reports with a rating summary
//! - Plain text, as printed by the CLI
//!
//! # Example
//!
//! ```ignore
//! use pt_core::export::ExportManager;
//!
//! let manager = ExportManager::new();
//! let forest = board.threads(&ThreadBuilder::default());
//! let md = manager.export(&board, &forest, "markdown")?;
//! ```

mod exporter;
mod json;
mod markdown;
mod text;

pub use exporter::{ExportManager, Exporter};
pub use json::{ExportData, ExportStats, ExportThread, JsonExporter};
pub use markdown::MarkdownExporter;
pub use text::TextExporter;

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::board::Board;
    use crate::config::ReviewConfig;
    use crate::review::{ReviewBuilder, ReviewValidator};
    use crate::types::{AuthorRef, BoardId, ReviewId, TargetKind};
    use chrono::{TimeZone, Utc};

    /// Board with two threads: r1 (4 stars) <- r2 <- r3, and r4 (2 stars)
    pub fn sample_board() -> Board {
        let mut board = Board::new(BoardId::from_string("note-os3").unwrap(), TargetKind::Note)
            .with_title("Operating Systems, Unit 3");
        let validator = ReviewValidator::new();
        let rules = ReviewConfig::default();
        let at = |minute| Utc.with_ymd_and_hms(2024, 3, 1, 10, minute, 0).unwrap();

        let records = vec![
            ReviewBuilder::top_level("Clear diagrams")
                .id(ReviewId::from_string("r1"))
                .author(AuthorRef::new("u1", "Asha"))
                .rating(4)
                .created_at(at(0))
                .build(),
            ReviewBuilder::reply_to(ReviewId::from_string("r1"), "Agreed, page 4 helped")
                .id(ReviewId::from_string("r2"))
                .author(AuthorRef::new("u2", "Ben"))
                .created_at(at(5))
                .build(),
            ReviewBuilder::reply_to(ReviewId::from_string("r2"), "Thanks both")
                .id(ReviewId::from_string("r3"))
                .created_at(at(6))
                .build(),
            ReviewBuilder::top_level("Missing the scheduling part")
                .id(ReviewId::from_string("r4"))
                .author(AuthorRef::new("u3", "Chen"))
                .rating(2)
                .created_at(at(30))
                .build(),
        ];
        for record in records {
            board.post(record.unwrap(), &validator, &rules).unwrap();
        }
        board
    }
}
