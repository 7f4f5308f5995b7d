//! Rating statistics

use super::model::{ReviewRecord, MAX_RATING, MIN_RATING};
use serde::{Deserialize, Serialize};

/// Aggregate of the ratings on a board
///
/// Only top-level reviews with a rating of at least one star count. This is
/// the figure shown as a note's rating and review count.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RatingSummary {
    /// Mean rating, 0.0 when nothing is rated
    pub average: f64,
    /// Number of rated top-level reviews
    pub count: usize,
    /// Review count per star, index 0 is one star
    pub distribution: [usize; MAX_RATING as usize],
}

impl RatingSummary {
    /// Compute the summary over a set of reviews
    pub fn from_reviews<'a>(reviews: impl IntoIterator<Item = &'a ReviewRecord>) -> Self {
        let mut summary = Self::default();
        let mut total: u64 = 0;

        for rating in reviews
            .into_iter()
            .filter_map(ReviewRecord::effective_rating)
            .map(|r| r.min(MAX_RATING))
        {
            total += u64::from(rating);
            summary.count += 1;
            summary.distribution[usize::from(rating - MIN_RATING)] += 1;
        }

        if summary.count > 0 {
            summary.average = total as f64 / summary.count as f64;
        }
        summary
    }

    /// Average rounded to one decimal place
    pub fn rounded_average(&self) -> f64 {
        (self.average * 10.0).round() / 10.0
    }

    /// Star bar for the rounded average, e.g. "★★★★☆"
    pub fn stars(&self) -> String {
        star_bar(self.average.round() as u8)
    }

    /// Check if any rating was recorded
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Five-star bar with `rating` stars filled
pub fn star_bar(rating: u8) -> String {
    let full = usize::from(rating.min(MAX_RATING));
    format!(
        "{}{}",
        "★".repeat(full),
        "☆".repeat(usize::from(MAX_RATING) - full)
    )
}
