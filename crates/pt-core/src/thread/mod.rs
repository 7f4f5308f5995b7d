//! Comment thread reconstruction
//!
//! Turns a flat, unordered collection of [`ReviewRecord`]s into an ordered
//! forest of reply trees.
//!
//! # Overview
//!
//! - Top-level reviews are ordered newest first.
//! - Replies are ordered by the builder's [`ChildOrder`].
//! - A reply whose parent is missing, is itself, or closes a parent cycle is
//!   promoted to top-level, so no record is ever dropped.
//! - Duplicate ids keep their first occurrence.
//!
//! # Example
//!
//! ```ignore
//! use pt_core::thread::{ThreadBuilder, ChildOrder};
//!
//! let forest = ThreadBuilder::new(ChildOrder::OldestFirst).build(board.reviews.all());
//! for root in forest.roots() {
//!     println!("{} ({} replies)", root.record.body, root.reply_count());
//! }
//! let forest = forest.insert_reply(new_reply);
//! ```

mod builder;
mod cache;
mod forest;
mod node;
mod walk;

pub use builder::{build_threads, ChildOrder, ThreadBuilder};
pub use cache::{fingerprint, ThreadCache};
pub use forest::{insert_reply, Forest};
pub use node::{flatten_descendants, NodeIter, ThreadNode};
pub use walk::{ReplyLayout, ThreadWalker, VisualEntry};
