//! JSON exporter for boards

use super::exporter::Exporter;
use crate::board::{Board, CURRENT_SCHEMA_VERSION};
use crate::error::Result;
use crate::review::RatingSummary;
use crate::thread::{Forest, ThreadNode};
use crate::types::author_display;
use serde::{Deserialize, Serialize};

/// Deepest reply level written as nested `replies`
///
/// Replies below this level are listed flat, in thread order, under their
/// ancestor at this level. Two JSON levels per reply keeps the output within
/// serde_json's default parse depth.
pub const MAX_REPLY_NESTING: usize = 32;

/// JSON exporter with compact mode support
pub struct JsonExporter {
    /// Whether to use pretty-print formatting
    pretty: bool,
    /// Include the rating summary
    include_stats: bool,
    /// Format name
    name: String,
}

impl JsonExporter {
    /// Create a new JSON exporter
    pub fn new(compact: bool) -> Self {
        Self {
            pretty: !compact,
            include_stats: true,
            name: if compact {
                "json-compact".to_string()
            } else {
                "json".to_string()
            },
        }
    }

    /// Create a compact JSON exporter
    pub fn compact() -> Self {
        Self::new(true)
    }

    /// Create a pretty-printed JSON exporter
    pub fn pretty() -> Self {
        Self::new(false)
    }

    /// Set whether to include the rating summary
    pub fn with_stats(mut self, include: bool) -> Self {
        self.include_stats = include;
        self
    }
}

impl Exporter for JsonExporter {
    fn export(&self, board: &Board, forest: &Forest) -> Result<String> {
        let mut data = ExportData::from_board(board, forest);
        if !self.include_stats {
            data.stats = None;
        }

        let json = if self.pretty {
            serde_json::to_string_pretty(&data)?
        } else {
            serde_json::to_string(&data)?
        };

        Ok(json)
    }

    fn format_name(&self) -> &str {
        &self.name
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}

/// Exported data structure (compact field names)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportData {
    /// Schema version
    pub v: String,
    /// Board ID
    pub board: String,
    /// Target kind
    pub target: String,
    /// Board title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Unix timestamp of the last update
    pub ts: i64,
    /// Rating statistics
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<ExportStats>,
    /// Top-level reviews with nested replies
    pub threads: Vec<ExportThread>,
}

impl ExportData {
    /// Create from a board and its forest
    pub fn from_board(board: &Board, forest: &Forest) -> Self {
        Self {
            v: CURRENT_SCHEMA_VERSION.to_string(),
            board: board.id.to_string(),
            target: board.target.to_string(),
            title: board.title.clone(),
            ts: board.updated_at.timestamp(),
            stats: Some(ExportStats::from_board(board, forest)),
            threads: forest.roots().iter().map(ExportThread::from_node).collect(),
        }
    }
}

/// Export statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportStats {
    /// Records on the board
    pub n: usize,
    /// Thread count
    pub t: usize,
    /// Deepest reply level
    pub depth: usize,
    /// Rating summary
    pub rating: RatingSummary,
}

impl ExportStats {
    /// Create from a board and its forest
    pub fn from_board(board: &Board, forest: &Forest) -> Self {
        Self {
            n: forest.total_records(),
            t: forest.len(),
            depth: forest.max_depth(),
            rating: board.rating_summary(),
        }
    }
}

/// One exported review with its replies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportThread {
    /// Review ID
    pub id: String,
    /// Author display name
    pub by: String,
    /// Author of the parent review
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    /// Star rating
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    /// Message content
    pub msg: String,
    /// Unix timestamp
    pub ts: i64,
    /// Replies
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub replies: Vec<ExportThread>,
}

impl ExportThread {
    /// Create from a thread node, including its subtree
    ///
    /// Nesting is capped at [`MAX_REPLY_NESTING`] levels below `node`.
    pub fn from_node(node: &ThreadNode) -> Self {
        let mut parents: Vec<(Self, std::slice::Iter<'_, ThreadNode>)> = Vec::new();
        let mut current = (Self::entry(node), node.children.iter());
        loop {
            match current.1.next() {
                Some(child) if parents.len() + 1 < MAX_REPLY_NESTING => {
                    let parent =
                        std::mem::replace(&mut current, (Self::entry(child), child.children.iter()));
                    parents.push(parent);
                }
                Some(child) => {
                    current.0.replies.push(Self::entry(child));
                    current
                        .0
                        .replies
                        .extend(child.descendants().map(Self::entry));
                }
                None => match parents.pop() {
                    Some(mut parent) => {
                        parent.0.replies.push(current.0);
                        current = parent;
                    }
                    None => return current.0,
                },
            }
        }
    }

    /// One node without its replies
    fn entry(node: &ThreadNode) -> Self {
        let to = (node.depth > 0)
            .then(|| author_display(node.replying_to.as_ref()).to_string());

        Self {
            id: node.id().to_string(),
            by: author_display(node.record.author.as_ref()).to_string(),
            to,
            rating: node.record.effective_rating(),
            msg: node.record.body.clone(),
            ts: node.record.created_at.timestamp(),
            replies: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::fixtures::sample_board;
    use crate::thread::{ChildOrder, ThreadBuilder};
    use crate::types::ReviewId;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_json_nests_replies() {
        let board = sample_board();
        let forest = board.threads(&ThreadBuilder::new(ChildOrder::OldestFirst));
        let json = JsonExporter::pretty().export(&board, &forest).unwrap();

        let data: ExportData = serde_json::from_str(&json).unwrap();
        assert_eq!(data.board, "note-os3");
        assert_eq!(data.threads.len(), 2);

        // Newest thread first
        assert_eq!(data.threads[0].id, "r4");
        let r1 = &data.threads[1];
        assert_eq!(r1.rating, Some(4));
        assert_eq!(r1.replies[0].to.as_deref(), Some("Asha"));
        assert_eq!(r1.replies[0].replies[0].by, "Deleted User");
        assert_eq!(r1.replies[0].replies[0].to.as_deref(), Some("Ben"));

        let stats = data.stats.unwrap();
        assert_eq!(stats.n, 4);
        assert_eq!(stats.depth, 2);
        assert_eq!(stats.rating.count, 2);
        assert_eq!(stats.rating.average, 3.0);
    }

    #[test]
    fn test_deep_replies_flattened_below_cap() {
        let mut board = sample_board();
        let mut parent = ReviewId::from_string("r4");
        for i in 0..100 {
            let id = format!("deep-{}", i);
            let mut reply = board.reviews.get(&parent).unwrap().clone();
            reply.id = ReviewId::from_string(&id);
            reply.parent_id = Some(parent);
            reply.rating = None;
            board.reviews.extend_lenient(vec![reply]);
            parent = ReviewId::from_string(&id);
        }
        let forest = board.threads(&ThreadBuilder::default());

        let json = JsonExporter::compact().export(&board, &forest).unwrap();
        let data: ExportData = serde_json::from_str(&json).unwrap();

        let mut level = &data.threads[0];
        assert_eq!(level.id, "r4");
        for _ in 1..MAX_REPLY_NESTING {
            assert_eq!(level.replies.len(), 1);
            level = &level.replies[0];
        }
        assert_eq!(level.id, format!("deep-{}", MAX_REPLY_NESTING - 2));
        assert_eq!(level.replies.len(), 100 - (MAX_REPLY_NESTING - 1));
        assert!(level.replies.iter().all(|r| r.replies.is_empty()));
        assert_eq!(level.replies.last().unwrap().id, "deep-99");
        assert_eq!(data.stats.unwrap().n, 104);
    }

    #[test]
    fn test_compact_and_without_stats() {
        let board = sample_board();
        let forest = board.threads(&ThreadBuilder::default());

        let compact = JsonExporter::compact().with_stats(false);
        assert_eq!(compact.format_name(), "json-compact");

        let json = compact.export(&board, &forest).unwrap();
        assert!(!json.contains('\n'));
        assert!(!json.contains("\"stats\""));
    }
}
