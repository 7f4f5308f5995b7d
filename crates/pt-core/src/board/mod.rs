//! Review board management
//!
//! A board holds the flat review collection of one note or blog post and
//! is the unit of persistence.
//!
//! # Example
//!
//! ```ignore
//! use pt_core::board::BoardManager;
//!
//! let storage = FileSystemStorage::new(".peerthread")?;
//! let manager = BoardManager::new(storage);
//!
//! let board_id = BoardId::for_target(TargetKind::Note, "65a1f0c2")?;
//! let mut board = manager.load_or_new(&board_id, TargetKind::Note)?;
//! manager.post_review_to(&mut board, review)?;
//! let (board, forest) = manager.post_reply(&board_id, reply)?;
//! ```

mod manager;
pub mod migration;
mod model;
mod persistence;

pub use manager::BoardManager;
pub use migration::{BoardFile, BoardMigrator, CURRENT_SCHEMA_VERSION};
pub use model::{Board, BoardInfo};
pub use persistence::BoardStorage;

#[cfg(test)]
pub use persistence::memory::MemoryStorage;
