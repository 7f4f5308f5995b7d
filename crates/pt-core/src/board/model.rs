//! Board data models

use crate::config::ReviewConfig;
use crate::error::{PeerThreadError, Result};
use crate::review::{RatingSummary, ReviewCollection, ReviewRecord, ReviewValidator};
use crate::thread::{Forest, ThreadBuilder};
use crate::types::{BoardId, ReviewId, TargetKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The reviews attached to one note or blog post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    /// Unique board identifier
    pub id: BoardId,
    /// What the reviews are about
    #[serde(default)]
    pub target: TargetKind,
    /// Title of the note or post
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// When the board was created
    pub created_at: DateTime<Utc>,
    /// When the board was last updated
    pub updated_at: DateTime<Utc>,
    /// Flat review collection
    #[serde(default)]
    pub reviews: ReviewCollection,
}

impl Board {
    /// Create a new empty board
    pub fn new(id: BoardId, target: TargetKind) -> Self {
        let now = Utc::now();
        Self {
            id,
            target,
            title: None,
            created_at: now,
            updated_at: now,
            reviews: ReviewCollection::new(),
        }
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Mark board as updated
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Validate and add a review or reply
    ///
    /// Replies must point at a review already on the board. With
    /// `one_top_level_per_author` set, an author may post one top-level
    /// review; replies are unlimited.
    pub fn post(
        &mut self,
        review: ReviewRecord,
        validator: &ReviewValidator,
        rules: &ReviewConfig,
    ) -> Result<ReviewId> {
        validator.validate(&review)?;

        if let Some(parent_id) = &review.parent_id {
            if !self.reviews.contains(parent_id) {
                return Err(PeerThreadError::ParentNotFound(parent_id.to_string()));
            }
        } else if rules.one_top_level_per_author {
            if let Some(author_id) = review.author_id() {
                if self.reviews.has_top_level_by(author_id) {
                    return Err(PeerThreadError::AlreadyReviewed {
                        author: author_id.to_string(),
                        board: self.id.to_string(),
                    });
                }
            }
        }

        let id = self.reviews.add(review)?;
        self.touch();
        debug!("Posted review {} on board {}", id, self.id);
        Ok(id)
    }

    /// Build the reply forest for this board
    pub fn threads(&self, builder: &ThreadBuilder) -> Forest {
        builder.build(self.reviews.all())
    }

    /// Rating statistics for this board
    pub fn rating_summary(&self) -> RatingSummary {
        self.reviews.rating_summary()
    }

    /// Get the number of reviews and replies
    pub fn review_count(&self) -> usize {
        self.reviews.count()
    }

    /// Get board info summary
    pub fn info(&self) -> BoardInfo {
        BoardInfo::from(self)
    }
}

/// Board summary for listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardInfo {
    /// Board ID
    pub id: BoardId,
    /// Target kind
    pub target: TargetKind,
    /// Title
    pub title: Option<String>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last update time
    pub updated_at: DateTime<Utc>,
    /// Reviews and replies
    pub review_count: usize,
    /// Rated top-level reviews
    pub rated_count: usize,
    /// Mean rating
    pub average_rating: f64,
}

impl From<&Board> for BoardInfo {
    fn from(board: &Board) -> Self {
        let summary = board.rating_summary();
        Self {
            id: board.id.clone(),
            target: board.target,
            title: board.title.clone(),
            created_at: board.created_at,
            updated_at: board.updated_at,
            review_count: board.review_count(),
            rated_count: summary.count,
            average_rating: summary.average,
        }
    }
}
