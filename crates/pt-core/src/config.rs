//! Configuration management for peerthread

use crate::error::{PeerThreadError, Result};
use crate::thread::{ChildOrder, ReplyLayout};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Thread building and layout settings
    pub thread: ThreadConfig,
    /// Review posting rules
    pub review: ReviewConfig,
    /// Export settings
    pub export: ExportConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            PeerThreadError::Io(e).with_context(format!("Failed to read {}", path.display()))
        })?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        debug!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is missing
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!("No configuration at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Serialize to pretty TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write configuration to a TOML file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Check value ranges that serde cannot express
    pub fn validate(&self) -> Result<()> {
        if self.review.max_body_length == 0 {
            return Err(PeerThreadError::Config(
                "review.max_body_length must be greater than zero".to_string(),
            ));
        }
        if self.thread.max_indent == Some(0) {
            return Err(PeerThreadError::Config(
                "thread.max_indent must be at least 1 (omit it for unlimited nesting)".to_string(),
            ));
        }
        Ok(())
    }
}

/// How replies are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Indent each level, up to `max_indent`
    Nested,
    /// Show every reply one level under its top-level review
    Flat,
}

/// Thread-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThreadConfig {
    /// Ordering applied to each node's replies
    pub child_order: ChildOrder,
    /// Reply layout
    pub layout: LayoutMode,
    /// Deepest visual indentation for the nested layout
    pub max_indent: Option<usize>,
}

impl Default for ThreadConfig {
    fn default() -> Self {
        Self {
            child_order: ChildOrder::OldestFirst,
            layout: LayoutMode::Nested,
            max_indent: Some(3),
        }
    }
}

impl ThreadConfig {
    /// Resolve the configured layout
    pub fn reply_layout(&self) -> ReplyLayout {
        match self.layout {
            LayoutMode::Nested => ReplyLayout::Nested {
                max_indent: self.max_indent,
            },
            LayoutMode::Flat => ReplyLayout::Flattened,
        }
    }
}

/// Review posting rules
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    /// Maximum body length in characters
    pub max_body_length: usize,
    /// Allow a single top-level review per author and board
    pub one_top_level_per_author: bool,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            max_body_length: 2000,
            one_top_level_per_author: true,
        }
    }
}

/// Export-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Default export format
    pub default_format: String,
    /// Include the rating summary
    pub include_stats: bool,
    /// strftime pattern for timestamps
    pub date_format: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            default_format: "markdown".to_string(),
            include_stats: true,
            date_format: "%Y-%m-%d %H:%M".to_string(),
        }
    }
}
