//! Review indexing for fast lookup

use super::model::ReviewRecord;
use crate::types::ReviewId;
use std::collections::HashMap;

/// Secondary indexes over a review collection
#[derive(Debug, Clone, Default)]
pub struct ReviewIndex {
    /// Top-level reviews by author id
    top_level_by_author: HashMap<String, Vec<ReviewId>>,
    /// Direct replies by claimed parent id
    replies_by_parent: HashMap<ReviewId, Vec<ReviewId>>,
}

impl ReviewIndex {
    /// Create a new empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a review to the index
    pub fn add(&mut self, review: &ReviewRecord) {
        match &review.parent_id {
            Some(parent_id) => {
                self.replies_by_parent
                    .entry(parent_id.clone())
                    .or_default()
                    .push(review.id.clone());
            }
            None => {
                if let Some(author_id) = review.author_id() {
                    self.top_level_by_author
                        .entry(author_id.to_string())
                        .or_default()
                        .push(review.id.clone());
                }
            }
        }
    }

    /// Direct replies claiming the given parent
    pub fn get_replies(&self, parent_id: &ReviewId) -> Vec<ReviewId> {
        self.replies_by_parent
            .get(parent_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Check if an author already has a top-level review
    pub fn has_top_level_by(&self, author_id: &str) -> bool {
        self.top_level_by_author
            .get(author_id)
            .map(|ids| !ids.is_empty())
            .unwrap_or(false)
    }
}
