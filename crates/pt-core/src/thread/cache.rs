//! Rebuild-on-change cache for forests

use super::builder::ThreadBuilder;
use super::forest::Forest;
use crate::review::ReviewRecord;
use tracing::debug;

/// Content fingerprint of a flat review collection
///
/// Covers every field that affects thread structure or rendering, in
/// collection order.
pub fn fingerprint(records: &[ReviewRecord]) -> blake3::Hash {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&(records.len() as u64).to_le_bytes());
    for record in records {
        update_field(&mut hasher, record.id.as_str().as_bytes());
        update_field(
            &mut hasher,
            record.parent_id.as_ref().map(|p| p.as_str()).unwrap_or("").as_bytes(),
        );
        hasher.update(&[u8::from(record.parent_id.is_some()), record.rating.unwrap_or(0)]);
        match &record.author {
            Some(author) => {
                update_field(&mut hasher, author.id.as_bytes());
                update_field(&mut hasher, author.name.as_bytes());
            }
            None => {
                hasher.update(&[0xff]);
            }
        }
        update_field(&mut hasher, record.body.as_bytes());
        hasher.update(&record.created_at.timestamp().to_le_bytes());
        hasher.update(&record.created_at.timestamp_subsec_nanos().to_le_bytes());
    }
    hasher.finalize()
}

fn update_field(hasher: &mut blake3::Hasher, bytes: &[u8]) {
    hasher.update(&(bytes.len() as u64).to_le_bytes());
    hasher.update(bytes);
}

/// Holds the last built forest and rebuilds it only when the input changes
#[derive(Debug, Clone, Default)]
pub struct ThreadCache {
    builder: ThreadBuilder,
    fingerprint: Option<blake3::Hash>,
    forest: Forest,
    rebuilds: usize,
}

impl ThreadCache {
    /// Create an empty cache
    pub fn new(builder: ThreadBuilder) -> Self {
        Self {
            builder,
            ..Self::default()
        }
    }

    /// Forest for `records`, rebuilt if they changed since the last call
    pub fn get_or_build(&mut self, records: &[ReviewRecord]) -> &Forest {
        let current = fingerprint(records);
        if self.fingerprint != Some(current) {
            debug!(
                "Review collection changed ({}), rebuilding threads",
                current.to_hex()
            );
            self.forest = self.builder.build(records);
            self.fingerprint = Some(current);
            self.rebuilds += 1;
        }
        &self.forest
    }

    /// Force the next call to rebuild
    pub fn invalidate(&mut self) {
        self.fingerprint = None;
    }

    /// Number of rebuilds performed so far
    pub fn rebuild_count(&self) -> usize {
        self.rebuilds
    }
}
