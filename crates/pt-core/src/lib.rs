//! pt-core - Core library for peerthread
//!
//! This crate turns flat review/comment collections into threaded forests,
//! and provides the review model, board persistence contracts and exporters
//! built around that transform.

pub mod error;
pub mod types;
pub mod config;
pub mod review;
pub mod thread;
pub mod board;
pub mod export;

pub use error::{PeerThreadError, Result};
pub use types::*;
