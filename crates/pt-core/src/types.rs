//! Core type definitions for peerthread

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque identifier of a review or reply
///
/// Identifiers come from the hosting application (database object ids,
/// numeric ids, ...), so no format is imposed beyond being non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewId(pub String);

impl ReviewId {
    /// Generate a fresh ReviewId
    pub fn generate() -> Self {
        ReviewId(Uuid::new_v4().simple().to_string())
    }

    /// Create a ReviewId from a string
    pub fn from_string(s: impl Into<String>) -> Self {
        ReviewId(s.into())
    }

    /// Get the string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ReviewId {
    fn from(s: &str) -> Self {
        ReviewId(s.to_string())
    }
}

/// Reference to the user who posted a review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRef {
    /// User identifier
    #[serde(alias = "_id")]
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Avatar URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl AuthorRef {
    /// Create an author reference
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            avatar: None,
        }
    }

    /// Name to show, falling back to the id
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

/// Placeholder shown for reviews whose author account no longer exists
pub const DELETED_AUTHOR: &str = "Deleted User";

/// Display name for an optional author
pub fn author_display(author: Option<&AuthorRef>) -> &str {
    author.map(AuthorRef::display_name).unwrap_or(DELETED_AUTHOR)
}

/// Identifier of a review board (one per note or blog post)
/// Format: `[A-Za-z0-9_-]+`, so it can double as a file name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardId(pub String);

impl BoardId {
    /// Maximum accepted length
    pub const MAX_LEN: usize = 128;

    /// Create from a string with validation
    pub fn from_string(s: impl Into<String>) -> crate::Result<Self> {
        let s = s.into();
        if Self::validate(&s) {
            Ok(BoardId(s))
        } else {
            Err(crate::PeerThreadError::Validation(format!(
                "Invalid board ID: {:?} (expected letters, digits, '-' or '_')",
                s
            )))
        }
    }

    /// Build the conventional id for a note or blog post
    pub fn for_target(kind: TargetKind, key: &str) -> crate::Result<Self> {
        Self::from_string(format!("{}-{}", kind.prefix(), key))
    }

    /// Target kind implied by the id prefix, `Note` when there is none
    pub fn target_kind(&self) -> TargetKind {
        let blog = TargetKind::Blog.prefix();
        match self.0.strip_prefix(blog) {
            Some(rest) if rest.starts_with('-') => TargetKind::Blog,
            _ => TargetKind::Note,
        }
    }

    fn validate(s: &str) -> bool {
        !s.is_empty()
            && s.len() <= Self::MAX_LEN
            && s
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    }

    /// Get the string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BoardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a board's reviews are attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    /// An uploaded note
    #[default]
    Note,
    /// A blog post
    Blog,
}

impl TargetKind {
    /// Prefix used in conventional board ids
    pub fn prefix(&self) -> &'static str {
        match self {
            TargetKind::Note => "note",
            TargetKind::Blog => "blog",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetKind::Note => write!(f, "Note"),
            TargetKind::Blog => write!(f, "Blog"),
        }
    }
}

/// Schema version for compatibility
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaVersion {
    pub major: u32,
    pub minor: u32,
}

impl SchemaVersion {
    pub const V1_0: Self = Self { major: 1, minor: 0 };

    /// Parse "major.minor"
    pub fn parse(s: &str) -> Option<Self> {
        let (major, minor) = s.split_once('.')?;
        Some(Self {
            major: major.parse().ok()?,
            minor: minor.parse().ok()?,
        })
    }

    /// Check if this version is compatible with another version
    pub fn is_compatible(&self, other: &Self) -> bool {
        self.major == other.major
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        Self::V1_0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_id_generation() {
        let id1 = ReviewId::generate();
        let id2 = ReviewId::generate();
        assert_ne!(id1, id2);
        assert_eq!(id1.as_str().len(), 32);
    }

    #[test]
    fn test_review_id_is_transparent_in_json() {
        let id = ReviewId::from_string("65a1f0c2");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"65a1f0c2\"");
    }

    #[test]
    fn test_author_display_name() {
        let author = AuthorRef::new("u1", "Asha");
        assert_eq!(author.display_name(), "Asha");

        let nameless = AuthorRef::new("u2", "  ");
        assert_eq!(nameless.display_name(), "u2");

        assert_eq!(author_display(None), DELETED_AUTHOR);
        assert_eq!(author_display(Some(&author)), "Asha");
    }

    #[test]
    fn test_author_accepts_mongo_id_alias() {
        let author: AuthorRef =
            serde_json::from_str(r#"{"_id": "abc", "name": "Ravi", "avatar": "a.png"}"#).unwrap();
        assert_eq!(author.id, "abc");
        assert_eq!(author.avatar.as_deref(), Some("a.png"));
    }

    #[test]
    fn test_board_id_validation() {
        assert!(BoardId::from_string("note-65a1f0c2").is_ok());
        assert!(BoardId::from_string("blog_my-first-post").is_ok());
        assert!(BoardId::from_string("").is_err());
        assert!(BoardId::from_string("../etc").is_err());
        assert!(BoardId::from_string("a b").is_err());
        assert!(BoardId::from_string("x".repeat(BoardId::MAX_LEN + 1)).is_err());
    }

    #[test]
    fn test_board_id_for_target() {
        let id = BoardId::for_target(TargetKind::Blog, "intro-to-os").unwrap();
        assert_eq!(id.as_str(), "blog-intro-to-os");
        assert_eq!(id.target_kind(), TargetKind::Blog);
        assert_eq!(BoardId::from_string("note-1").unwrap().target_kind(), TargetKind::Note);
        assert_eq!(BoardId::from_string("blogroll").unwrap().target_kind(), TargetKind::Note);
    }

    #[test]
    fn test_schema_version() {
        let v = SchemaVersion::parse("1.3").unwrap();
        assert_eq!(v, SchemaVersion { major: 1, minor: 3 });
        assert!(v.is_compatible(&SchemaVersion::V1_0));
        assert!(!SchemaVersion { major: 2, minor: 0 }.is_compatible(&SchemaVersion::V1_0));
        assert!(SchemaVersion::parse("1").is_none());
        assert!(SchemaVersion::parse("a.b").is_none());
    }
}
