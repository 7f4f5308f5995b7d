//! Review data models

use crate::types::{AuthorRef, ReviewId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lowest star rating a top-level review may carry
pub const MIN_RATING: u8 = 1;

/// Highest star rating a top-level review may carry
pub const MAX_RATING: u8 = 5;

/// One review, comment or reply, stored flat
///
/// Field aliases accept the payloads served by the note and blog review
/// endpoints (`_id`, `user`, `parentReviewId`, `comment`, `createdAt`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRecord {
    /// Unique review identifier
    #[serde(alias = "_id")]
    pub id: ReviewId,
    /// Posting user, `None` once the account is deleted
    #[serde(default, alias = "user")]
    pub author: Option<AuthorRef>,
    /// Review this one replies to
    #[serde(default, alias = "parentReviewId", skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<ReviewId>,
    /// Star rating (top-level reviews only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    /// Text content
    #[serde(alias = "comment", alias = "text")]
    pub body: String,
    /// When the review was posted
    #[serde(alias = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl ReviewRecord {
    /// Whether the record claims no parent
    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Whether the record claims a parent
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }

    /// Whether the record names itself as its parent
    pub fn is_self_referential(&self) -> bool {
        self.parent_id.as_ref() == Some(&self.id)
    }

    /// Rating that counts towards statistics
    ///
    /// Replies never count, and a stored `0` means "no rating given".
    pub fn effective_rating(&self) -> Option<u8> {
        if self.is_reply() {
            return None;
        }
        self.rating.filter(|r| *r >= MIN_RATING)
    }

    /// Id of the posting user, if any
    pub fn author_id(&self) -> Option<&str> {
        self.author.as_ref().map(|a| a.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn create_test_review() -> ReviewRecord {
        ReviewRecord {
            id: ReviewId::from_string("r1"),
            author: Some(AuthorRef::new("u1", "Asha")),
            parent_id: None,
            rating: Some(4),
            body: "Clear and well organised notes".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_top_level_and_reply() {
        let mut review = create_test_review();
        assert!(review.is_top_level());
        assert!(!review.is_reply());

        review.parent_id = Some(ReviewId::from_string("r0"));
        assert!(review.is_reply());
        assert!(!review.is_self_referential());

        review.parent_id = Some(review.id.clone());
        assert!(review.is_self_referential());
    }

    #[test]
    fn test_effective_rating() {
        let mut review = create_test_review();
        assert_eq!(review.effective_rating(), Some(4));

        review.rating = Some(0);
        assert_eq!(review.effective_rating(), None);

        review.rating = Some(5);
        review.parent_id = Some(ReviewId::from_string("r0"));
        assert_eq!(review.effective_rating(), None);
    }

    #[test]
    fn test_deserialize_api_payload() {
        let json = r#"{
            "_id": "65f0a1",
            "user": {"_id": "u9", "name": "Meera", "avatar": "https://cdn/a.png"},
            "rating": 5,
            "comment": "Saved my exam",
            "parentReviewId": null,
            "createdAt": "2024-03-01T10:00:00Z",
            "updatedAt": "2024-03-01T10:00:00Z"
        }"#;

        let review: ReviewRecord = serde_json::from_str(json).unwrap();
        assert_eq!(review.id.as_str(), "65f0a1");
        assert_eq!(review.author_id(), Some("u9"));
        assert_eq!(review.body, "Saved my exam");
        assert!(review.is_top_level());
    }

    #[test]
    fn test_deserialize_deleted_author() {
        let json = r#"{"id": "r2", "author": null, "parent_id": "r1",
                       "body": "+1", "created_at": "2024-03-02T08:30:00Z"}"#;
        let review: ReviewRecord = serde_json::from_str(json).unwrap();
        assert!(review.author.is_none());
        assert_eq!(review.parent_id, Some(ReviewId::from_string("r1")));
        assert_eq!(review.rating, None);
    }

    #[test]
    fn test_review_serialization() {
        let review = create_test_review();
        let json = serde_json::to_string(&review).unwrap();
        assert!(!json.contains("parent_id"));
        let review2: ReviewRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(review, review2);
    }
}
