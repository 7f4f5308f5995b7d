//! Flat review collection with indexing support

use super::index::ReviewIndex;
use super::model::ReviewRecord;
use super::stats::RatingSummary;
use crate::error::{PeerThreadError, Result};
use crate::types::ReviewId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Insertion-ordered flat list of reviews
///
/// Insertion order is preserved because thread building uses it to order
/// replies under the `input-order` policy.
#[derive(Debug, Clone, Default)]
pub struct ReviewCollection {
    /// Reviews in insertion order
    reviews: Vec<ReviewRecord>,
    /// Position of each review in `reviews`
    positions: HashMap<ReviewId, usize>,
    /// Secondary indexes
    index: ReviewIndex,
}

impl ReviewCollection {
    /// Create a new empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from untrusted records, keeping the first occurrence of each id
    pub fn from_records_lenient(records: impl IntoIterator<Item = ReviewRecord>) -> Self {
        let mut collection = Self::new();
        collection.extend_lenient(records);
        collection
    }

    /// Add a review, rejecting duplicate ids
    pub fn add(&mut self, review: ReviewRecord) -> Result<ReviewId> {
        let id = review.id.clone();

        if self.positions.contains_key(&id) {
            return Err(PeerThreadError::Validation(format!(
                "Review with ID {} already exists",
                id
            )));
        }

        self.index.add(&review);
        self.positions.insert(id.clone(), self.reviews.len());
        self.reviews.push(review);
        Ok(id)
    }

    /// Append reviews, silently skipping ids already present
    pub fn extend_lenient(&mut self, records: impl IntoIterator<Item = ReviewRecord>) -> usize {
        let mut skipped = 0;
        for review in records {
            if self.positions.contains_key(&review.id) {
                debug!("Skipping duplicate review {}", review.id);
                skipped += 1;
                continue;
            }
            self.index.add(&review);
            self.positions.insert(review.id.clone(), self.reviews.len());
            self.reviews.push(review);
        }
        skipped
    }

    /// Get a review by ID
    pub fn get(&self, id: &ReviewId) -> Option<&ReviewRecord> {
        self.positions.get(id).map(|&pos| &self.reviews[pos])
    }

    /// Check whether a review exists
    pub fn contains(&self, id: &ReviewId) -> bool {
        self.positions.contains_key(id)
    }

    /// All reviews in insertion order
    pub fn all(&self) -> &[ReviewRecord] {
        &self.reviews
    }

    /// Reviews that claim no parent
    pub fn top_level(&self) -> Vec<&ReviewRecord> {
        self.reviews.iter().filter(|r| r.is_top_level()).collect()
    }

    /// Direct replies to a review
    pub fn replies_to(&self, id: &ReviewId) -> Vec<&ReviewRecord> {
        self.index
            .get_replies(id)
            .iter()
            .filter_map(|reply_id| self.get(reply_id))
            .collect()
    }

    /// Check whether an author already posted a top-level review
    pub fn has_top_level_by(&self, author_id: &str) -> bool {
        self.index.has_top_level_by(author_id)
    }

    /// Rating statistics over the collection
    pub fn rating_summary(&self) -> RatingSummary {
        RatingSummary::from_reviews(&self.reviews)
    }

    /// Get total review count
    pub fn count(&self) -> usize {
        self.reviews.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }
}

impl Serialize for ReviewCollection {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.reviews.serialize(serializer)
    }
}

// Stored as a plain array; positions and index are rebuilt on load
impl<'de> Deserialize<'de> for ReviewCollection {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let reviews = Vec::<ReviewRecord>::deserialize(deserializer)?;
        Ok(Self::from_records_lenient(reviews))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::ReviewBuilder;
    use crate::types::AuthorRef;
    use chrono::{Duration, TimeZone, Utc};

    fn review(id: &str, author: &str, body: &str, minutes: i64) -> ReviewRecord {
        let base = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        ReviewBuilder::top_level(body)
            .id(ReviewId::from_string(id))
            .author(AuthorRef::new(author, author.to_uppercase()))
            .created_at(base + Duration::minutes(minutes))
            .build()
            .unwrap()
    }

    fn reply(id: &str, parent: &str, minutes: i64) -> ReviewRecord {
        let base = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        ReviewBuilder::reply_to(ReviewId::from_string(parent), "reply")
            .id(ReviewId::from_string(id))
            .created_at(base + Duration::minutes(minutes))
            .build()
            .unwrap()
    }

    #[test]
    fn test_add_and_get() {
        let mut collection = ReviewCollection::new();
        let id = collection.add(review("r1", "u1", "Nice", 0)).unwrap();

        assert!(collection.get(&id).is_some());
        assert!(collection.contains(&id));
        assert_eq!(collection.count(), 1);
    }

    #[test]
    fn test_duplicate_add_fails() {
        let mut collection = ReviewCollection::new();
        collection.add(review("r1", "u1", "Nice", 0)).unwrap();
        assert!(collection.add(review("r1", "u2", "Other", 1)).is_err());
    }

    #[test]
    fn test_lenient_keeps_first_occurrence() {
        let collection = ReviewCollection::from_records_lenient(vec![
            review("r1", "u1", "first", 0),
            review("r1", "u2", "second", 1),
            review("r2", "u2", "third", 2),
        ]);

        assert_eq!(collection.count(), 2);
        assert_eq!(collection.get(&ReviewId::from_string("r1")).unwrap().body, "first");
    }

    #[test]
    fn test_replies_and_top_level() {
        let mut collection = ReviewCollection::new();
        collection.add(review("r1", "u1", "Root", 0)).unwrap();
        collection.add(reply("r2", "r1", 1)).unwrap();
        collection.add(reply("r3", "r1", 2)).unwrap();

        assert_eq!(collection.top_level().len(), 1);
        assert_eq!(collection.replies_to(&ReviewId::from_string("r1")).len(), 2);
        assert!(collection.has_top_level_by("u1"));
        assert!(collection.replies_to(&ReviewId::from_string("r2")).is_empty());
    }

    #[test]
    fn test_insertion_order_kept() {
        let mut collection = ReviewCollection::new();
        collection.add(review("late", "u1", "b", 10)).unwrap();
        collection.add(review("early", "u2", "a", 0)).unwrap();

        assert_eq!(collection.all()[0].id.as_str(), "late");
        assert_eq!(collection.all()[1].id.as_str(), "early");
    }

    #[test]
    fn test_serialization_is_plain_array() {
        let mut collection = ReviewCollection::new();
        collection.add(review("r1", "u1", "Nice", 0)).unwrap();
        collection.add(reply("r2", "r1", 1)).unwrap();

        let json = serde_json::to_string(&collection).unwrap();
        assert!(json.starts_with('['));

        let restored: ReviewCollection = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.count(), 2);
        assert_eq!(restored.replies_to(&ReviewId::from_string("r1")).len(), 1);
    }
}
