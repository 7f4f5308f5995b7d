//! Board storage trait and abstractions

use super::model::{Board, BoardInfo};
use crate::error::Result;
use crate::types::BoardId;

/// Trait for board storage implementations
pub trait BoardStorage: Send + Sync {
    /// Save a board
    fn save(&self, board: &Board) -> Result<()>;

    /// Load a board by ID
    fn load(&self, id: &BoardId) -> Result<Board>;

    /// List all boards (as info)
    fn list(&self) -> Result<Vec<BoardInfo>>;

    /// Delete a board
    fn delete(&self, id: &BoardId) -> Result<()>;

    /// Check if a board exists
    fn exists(&self, id: &BoardId) -> bool;

    /// Get the most recently updated board
    fn latest(&self) -> Result<Option<Board>> {
        let latest = self.list()?.into_iter().max_by_key(|b| b.updated_at);
        match latest {
            Some(info) => self.load(&info.id).map(Some),
            None => Ok(None),
        }
    }
}
