//! Review builder for fluent API

use super::model::ReviewRecord;
use crate::error::{PeerThreadError, Result};
use crate::types::{AuthorRef, ReviewId};
use chrono::{DateTime, Utc};

/// Builder for creating reviews and replies with fluent API
///
/// Replies are started with [`ReviewBuilder::reply_to`] and have no rating
/// setter, so a reply built here never carries a rating.
pub struct ReviewBuilder {
    id: Option<ReviewId>,
    author: Option<AuthorRef>,
    parent_id: Option<ReviewId>,
    rating: Option<u8>,
    body: Option<String>,
    created_at: Option<DateTime<Utc>>,
}

impl ReviewBuilder {
    fn empty() -> Self {
        Self {
            id: None,
            author: None,
            parent_id: None,
            rating: None,
            body: None,
            created_at: None,
        }
    }

    /// Start a top-level review
    pub fn top_level(body: impl Into<String>) -> TopLevelBuilder {
        let mut inner = Self::empty();
        inner.body = Some(body.into());
        TopLevelBuilder { inner }
    }

    /// Start a reply to an existing review
    pub fn reply_to(parent_id: ReviewId, body: impl Into<String>) -> Self {
        let mut builder = Self::empty();
        builder.parent_id = Some(parent_id);
        builder.body = Some(body.into());
        builder
    }

    /// Use a specific id instead of a generated one
    pub fn id(mut self, id: ReviewId) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the posting user
    pub fn author(mut self, author: AuthorRef) -> Self {
        self.author = Some(author);
        self
    }

    /// Override the creation timestamp
    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Build the review
    pub fn build(self) -> Result<ReviewRecord> {
        let body = self.body.ok_or_else(|| {
            PeerThreadError::Validation("Review body is required".to_string())
        })?;

        if body.trim().is_empty() {
            return Err(PeerThreadError::Validation(
                "Review body cannot be empty".to_string(),
            ));
        }

        Ok(ReviewRecord {
            id: self.id.unwrap_or_else(ReviewId::generate),
            author: self.author,
            parent_id: self.parent_id,
            rating: self.rating,
            body,
            created_at: self.created_at.unwrap_or_else(Utc::now),
        })
    }
}

/// Builder state for top-level reviews, which may carry a rating
pub struct TopLevelBuilder {
    inner: ReviewBuilder,
}

impl TopLevelBuilder {
    /// Set the star rating (0 means "no rating")
    pub fn rating(mut self, rating: u8) -> Self {
        self.inner.rating = if rating == 0 { None } else { Some(rating) };
        self
    }

    /// Use a specific id instead of a generated one
    pub fn id(mut self, id: ReviewId) -> Self {
        self.inner = self.inner.id(id);
        self
    }

    /// Set the posting user
    pub fn author(mut self, author: AuthorRef) -> Self {
        self.inner = self.inner.author(author);
        self
    }

    /// Override the creation timestamp
    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.inner = self.inner.created_at(created_at);
        self
    }

    /// Build the review
    pub fn build(self) -> Result<ReviewRecord> {
        self.inner.build()
    }
}
