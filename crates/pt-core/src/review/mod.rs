//! Review data layer
//!
//! Flat review records as the hosting application stores them, plus the
//! write-side helpers around them: a fluent builder, validation, indexing
//! and rating statistics.

pub mod model;
pub mod builder;
pub mod validator;
pub mod index;
pub mod collection;
pub mod stats;

pub use model::*;
pub use builder::ReviewBuilder;
pub use validator::ReviewValidator;
pub use index::ReviewIndex;
pub use collection::ReviewCollection;
pub use stats::{star_bar, RatingSummary};
