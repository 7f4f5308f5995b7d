//! Board file format and schema migration

use super::model::Board;
use crate::error::{PeerThreadError, Result};
use crate::types::SchemaVersion;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Current schema version
pub const CURRENT_SCHEMA_VERSION: &str = "1.0";

/// Board file format with schema version
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardFile {
    /// Schema version for migration
    pub schema_version: String,
    /// The board data
    pub board: Board,
    /// Extra fields for forward compatibility
    #[serde(flatten, default)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl BoardFile {
    /// Create a new board file with current schema version
    pub fn new(board: Board) -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION.to_string(),
            board,
            extra: HashMap::new(),
        }
    }

    /// Get the board, consuming the file
    pub fn into_board(self) -> Board {
        self.board
    }

    /// Parse schema version
    pub fn parse_version(&self) -> Option<SchemaVersion> {
        SchemaVersion::parse(&self.schema_version)
    }
}

/// Board schema migrator
pub struct BoardMigrator;

impl BoardMigrator {
    /// Migrate a board file to the current schema version
    pub fn migrate(mut file: BoardFile) -> Result<BoardFile> {
        let version = file.parse_version().ok_or_else(|| {
            PeerThreadError::UnsupportedSchemaVersion(file.schema_version.clone())
        })?;

        let current = SchemaVersion::V1_0;
        if !version.is_compatible(&current) {
            return Err(PeerThreadError::UnsupportedSchemaVersion(format!(
                "{} (expected {}.x)",
                file.schema_version, current.major
            )));
        }

        // 1.x files only ever add optional fields, so stamping is enough
        file.schema_version = CURRENT_SCHEMA_VERSION.to_string();
        Ok(file)
    }

    /// Check if a file needs migration
    pub fn needs_migration(file: &BoardFile) -> bool {
        file.schema_version != CURRENT_SCHEMA_VERSION
    }
}
