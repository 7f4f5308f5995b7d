//! Flat-to-tree thread builder

use super::forest::Forest;
use super::node::ThreadNode;
use crate::config::ThreadConfig;
use crate::review::ReviewRecord;
use crate::types::{AuthorRef, ReviewId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::debug;

/// Ordering applied to the replies of each node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChildOrder {
    /// Order in which records appear in the input
    #[default]
    InputOrder,
    /// Oldest `created_at` first
    OldestFirst,
    /// Newest `created_at` first
    NewestFirst,
}

impl ChildOrder {
    /// Total order over sibling nodes; ties fall back to input position
    pub(crate) fn compare(&self, a: &ThreadNode, b: &ThreadNode) -> Ordering {
        let by_time = match self {
            ChildOrder::InputOrder => Ordering::Equal,
            ChildOrder::OldestFirst => a.record.created_at.cmp(&b.record.created_at),
            ChildOrder::NewestFirst => b.record.created_at.cmp(&a.record.created_at),
        };
        by_time.then(a.seq.cmp(&b.seq))
    }

    /// Index at which `node` belongs among already ordered `siblings`
    pub(crate) fn insertion_point(&self, siblings: &[ThreadNode], node: &ThreadNode) -> usize {
        siblings.partition_point(|s| self.compare(s, node) == Ordering::Less)
    }
}

/// Ordering of top-level threads: newest first
pub(crate) const ROOT_ORDER: ChildOrder = ChildOrder::NewestFirst;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    New,
    OnPath,
    Done,
}

/// Builds reply forests from flat review collections
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadBuilder {
    child_order: ChildOrder,
}

impl ThreadBuilder {
    /// Create a builder with the given reply ordering
    pub fn new(child_order: ChildOrder) -> Self {
        Self { child_order }
    }

    /// Create a builder from thread configuration
    pub fn from_config(config: &ThreadConfig) -> Self {
        Self::new(config.child_order)
    }

    /// Reply ordering used by this builder
    pub fn child_order(&self) -> ChildOrder {
        self.child_order
    }

    /// Build a forest from borrowed records
    pub fn build(&self, records: &[ReviewRecord]) -> Forest {
        self.build_owned(records.to_vec())
    }

    /// Build a forest, taking ownership of the records
    pub fn build_owned(&self, records: Vec<ReviewRecord>) -> Forest {
        let input_len = records.len();

        // Pass 1: first occurrence of each id wins
        let mut positions: HashMap<ReviewId, usize> = HashMap::with_capacity(input_len);
        let mut kept: Vec<ReviewRecord> = Vec::with_capacity(input_len);
        for record in records {
            if positions.contains_key(&record.id) {
                debug!("Ignoring duplicate review id {}", record.id);
                continue;
            }
            positions.insert(record.id.clone(), kept.len());
            kept.push(record);
        }
        let n = kept.len();

        // Pass 2: resolve parents; self references and dangling ids stay unresolved
        let mut parents: Vec<Option<usize>> = kept
            .iter()
            .map(|r| {
                let parent_id = r.parent_id.as_ref().filter(|p| *p != &r.id)?;
                let resolved = positions.get(parent_id).copied();
                if resolved.is_none() {
                    debug!("Review {} has unresolved parent {}, promoting", r.id, parent_id);
                }
                resolved
            })
            .collect();

        break_cycles(&mut parents, &kept);

        let mut children: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut roots: Vec<usize> = Vec::new();
        for (i, parent) in parents.iter().enumerate() {
            match parent {
                Some(p) => children[*p].push(i),
                None => roots.push(i),
            }
        }

        let replying_to: Vec<Option<AuthorRef>> = parents
            .iter()
            .map(|p| p.and_then(|p| kept[p].author.clone()))
            .collect();

        // Parents come before their children in `order`
        let mut depth = vec![0usize; n];
        let mut order: Vec<usize> = Vec::with_capacity(n);
        let mut stack: Vec<usize> = roots.clone();
        while let Some(i) = stack.pop() {
            order.push(i);
            for &c in &children[i] {
                depth[c] = depth[i] + 1;
                stack.push(c);
            }
        }

        // Materialise bottom-up so every child is built before its parent
        let mut slots: Vec<Option<ReviewRecord>> = kept.into_iter().map(Some).collect();
        let mut built: Vec<Option<ThreadNode>> = vec![None; n];
        for &i in order.iter().rev() {
            let Some(record) = slots[i].take() else {
                continue;
            };
            let mut node = ThreadNode::leaf(record, depth[i], replying_to[i].clone(), i);
            node.children = children[i]
                .iter()
                .filter_map(|&c| built[c].take())
                .collect();
            node.children.sort_by(|a, b| self.child_order.compare(a, b));
            built[i] = Some(node);
        }

        let mut top: Vec<ThreadNode> = roots.iter().filter_map(|&r| built[r].take()).collect();
        top.sort_by(|a, b| ROOT_ORDER.compare(a, b));

        debug!(
            "Built {} threads from {} reviews ({} distinct)",
            top.len(),
            input_len,
            n
        );

        Forest::from_parts(top, self.child_order)
    }
}

/// Promote one member of every parent cycle to top-level
///
/// Ancestor chains are walked in input order; when a chain returns to a
/// record already on it, that record loses its parent.
fn break_cycles(parents: &mut [Option<usize>], records: &[ReviewRecord]) {
    let mut state = vec![Visit::New; parents.len()];
    let mut chain: Vec<usize> = Vec::new();

    for start in 0..parents.len() {
        let mut current = Some(start);
        while let Some(i) = current {
            match state[i] {
                Visit::New => {
                    state[i] = Visit::OnPath;
                    chain.push(i);
                    current = parents[i];
                }
                Visit::OnPath => {
                    debug!("Review {} closes a reply cycle, promoting", records[i].id);
                    parents[i] = None;
                    break;
                }
                Visit::Done => break,
            }
        }
        for i in chain.drain(..) {
            state[i] = Visit::Done;
        }
    }
}

/// Build a forest with the default builder (replies in input order)
pub fn build_threads(records: &[ReviewRecord]) -> Forest {
    ThreadBuilder::default().build(records)
}
