//! Review validation

use super::model::{ReviewRecord, MAX_RATING, MIN_RATING};
use crate::config::ReviewConfig;
use crate::error::{PeerThreadError, Result};

/// Maximum body length (default)
pub const MAX_BODY_LENGTH: usize = 2000;

/// Validator for reviews before they are posted
pub struct ReviewValidator {
    max_length: usize,
}

impl ReviewValidator {
    /// Create a new validator with default settings
    pub fn new() -> Self {
        Self {
            max_length: MAX_BODY_LENGTH,
        }
    }

    /// Create a new validator with custom max length
    pub fn with_max_length(max_length: usize) -> Self {
        Self { max_length }
    }

    /// Create a validator from review configuration
    pub fn from_config(config: &ReviewConfig) -> Self {
        Self::with_max_length(config.max_body_length)
    }

    /// Validate body text
    pub fn validate_body(&self, body: &str) -> Result<()> {
        let trimmed = body.trim();

        if trimmed.is_empty() {
            return Err(PeerThreadError::Validation(
                "Review body cannot be empty".to_string(),
            ));
        }

        if trimmed.chars().count() > self.max_length {
            return Err(PeerThreadError::Validation(format!(
                "Review body exceeds maximum length of {} characters",
                self.max_length
            )));
        }

        Ok(())
    }

    /// Validate the rating against the record's position in a thread
    pub fn validate_rating(&self, review: &ReviewRecord) -> Result<()> {
        match review.rating {
            None | Some(0) => Ok(()),
            Some(_) if review.is_reply() => Err(PeerThreadError::Validation(
                "Replies cannot carry a rating".to_string(),
            )),
            Some(r) if (MIN_RATING..=MAX_RATING).contains(&r) => Ok(()),
            Some(r) => Err(PeerThreadError::Validation(format!(
                "Rating {} is outside {}..={}",
                r, MIN_RATING, MAX_RATING
            ))),
        }
    }

    /// Validate a complete review
    pub fn validate(&self, review: &ReviewRecord) -> Result<()> {
        if review.id.as_str().trim().is_empty() {
            return Err(PeerThreadError::Validation(
                "Review id cannot be empty".to_string(),
            ));
        }

        self.validate_body(&review.body)?;
        self.validate_rating(review)?;

        if review.is_self_referential() {
            return Err(PeerThreadError::Validation(format!(
                "Review {} cannot reply to itself",
                review.id
            )));
        }

        Ok(())
    }
}

impl Default for ReviewValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::ReviewBuilder;
    use crate::types::ReviewId;

    #[test]
    fn test_validate_body_valid() {
        let validator = ReviewValidator::new();
        assert!(validator.validate_body("Helpful notes").is_ok());
        assert!(validator.validate_body("  padded  ").is_ok());
    }

    #[test]
    fn test_validate_body_empty() {
        let validator = ReviewValidator::new();
        assert!(validator.validate_body("").is_err());
        assert!(validator.validate_body(" \n ").is_err());
    }

    #[test]
    fn test_validate_body_too_long() {
        let validator = ReviewValidator::with_max_length(10);
        assert!(validator.validate_body("Short").is_ok());
        assert!(validator.validate_body("This is too long").is_err());
    }

    #[test]
    fn test_rating_range() {
        let validator = ReviewValidator::new();
        let mut review = ReviewBuilder::top_level("ok").build().unwrap();

        for r in [0, 1, 3, 5] {
            review.rating = Some(r);
            assert!(validator.validate(&review).is_ok(), "rating {}", r);
        }

        review.rating = Some(6);
        assert!(validator.validate(&review).is_err());
    }

    #[test]
    fn test_reply_with_rating_rejected() {
        let validator = ReviewValidator::new();
        let mut reply = ReviewBuilder::reply_to(ReviewId::from_string("r1"), "thanks")
            .build()
            .unwrap();
        assert!(validator.validate(&reply).is_ok());

        reply.rating = Some(4);
        let err = validator.validate(&reply).unwrap_err();
        assert!(err.to_string().contains("Replies cannot carry a rating"));
    }

    #[test]
    fn test_self_reply_rejected() {
        let validator = ReviewValidator::new();
        let id = ReviewId::from_string("r7");
        let reply = ReviewBuilder::reply_to(id.clone(), "loop")
            .id(id)
            .build()
            .unwrap();
        assert!(validator.validate(&reply).is_err());
    }
}
