//! Error types for peerthread

use thiserror::Error;

/// Main error type for peerthread
#[derive(Debug, Error)]
pub enum PeerThreadError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(String),

    /// Board not found
    #[error("Board not found: {0}")]
    BoardNotFound(String),

    /// Reply points at a review that is not on the board
    #[error("Parent review not found: {0}")]
    ParentNotFound(String),

    /// Author already posted a top-level review on this board
    #[error("Author {author} has already posted a top-level review on {board}")]
    AlreadyReviewed { author: String, board: String },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unsupported schema version
    #[error("Unsupported schema version: {0}")]
    UnsupportedSchemaVersion(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<PeerThreadError>,
    },
}

impl PeerThreadError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        PeerThreadError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

impl From<toml::de::Error> for PeerThreadError {
    fn from(err: toml::de::Error) -> Self {
        PeerThreadError::Toml(err.to_string())
    }
}

impl From<toml::ser::Error> for PeerThreadError {
    fn from(err: toml::ser::Error) -> Self {
        PeerThreadError::Toml(err.to_string())
    }
}

/// Result type alias for peerthread
pub type Result<T> = std::result::Result<T, PeerThreadError>;
