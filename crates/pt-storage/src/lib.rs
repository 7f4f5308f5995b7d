//! pt-storage - Storage library for peerthread
//!
//! File system persistence for review boards, and loading of raw review
//! exports for one-off thread rendering.

mod board_store;
mod records;

pub use board_store::FileSystemStorage;
pub use records::{read_records, read_records_from_str};
