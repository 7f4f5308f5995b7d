//! Ordered forest of reply trees

use super::builder::{ChildOrder, ThreadBuilder, ROOT_ORDER};
use super::node::{NodeIter, ThreadNode};
use crate::review::ReviewRecord;
use crate::types::ReviewId;
use tracing::debug;

/// Top-level threads of one board, newest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Forest {
    roots: Vec<ThreadNode>,
    child_order: ChildOrder,
}

impl Forest {
    pub(crate) fn from_parts(roots: Vec<ThreadNode>, child_order: ChildOrder) -> Self {
        Self { roots, child_order }
    }

    /// Top-level threads
    pub fn roots(&self) -> &[ThreadNode] {
        &self.roots
    }

    /// Reply ordering the forest was built with
    pub fn child_order(&self) -> ChildOrder {
        self.child_order
    }

    /// Number of top-level threads
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    /// Check if there are no threads
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Every node in the forest, depth-first pre-order
    pub fn nodes(&self) -> NodeIter<'_> {
        NodeIter::new(&self.roots)
    }

    /// Every record in the forest, depth-first pre-order
    pub fn records(&self) -> Vec<&ReviewRecord> {
        self.nodes().map(|n| &n.record).collect()
    }

    /// Number of records reachable from the forest
    pub fn total_records(&self) -> usize {
        self.nodes().count()
    }

    /// Find a node by review id
    pub fn find(&self, id: &ReviewId) -> Option<&ThreadNode> {
        self.nodes().find(|n| n.id() == id)
    }

    /// Top-level thread that contains the given review
    pub fn thread_of(&self, id: &ReviewId) -> Option<&ThreadNode> {
        self.roots.iter().find(|root| root.find(id).is_some())
    }

    /// Check whether a review is in the forest
    pub fn contains(&self, id: &ReviewId) -> bool {
        self.find(id).is_some()
    }

    /// Flattened replies under the node with the given id
    pub fn flatten_descendants_of(&self, id: &ReviewId) -> Option<Vec<&ReviewRecord>> {
        self.find(id).map(ThreadNode::flatten_descendants)
    }

    /// Deepest nesting level in the forest
    pub fn max_depth(&self) -> usize {
        self.nodes().map(|n| n.depth).max().unwrap_or(0)
    }

    /// Records of the forest in original input order
    pub fn to_records(&self) -> Vec<ReviewRecord> {
        let mut nodes: Vec<&ThreadNode> = self.nodes().collect();
        nodes.sort_by_key(|n| n.seq);
        nodes.into_iter().map(|n| n.record.clone()).collect()
    }

    /// Add one record without rebuilding from the full collection
    ///
    /// The result equals rebuilding from this forest's records with `record`
    /// appended. A record whose id is already present is ignored. When
    /// existing orphans name `record` as their parent, the forest is rebuilt
    /// so they are adopted.
    pub fn insert_reply(mut self, record: ReviewRecord) -> Forest {
        if self.contains(&record.id) {
            debug!("Review {} already in forest, ignoring", record.id);
            return self;
        }

        let adopts_orphans = self
            .roots
            .iter()
            .any(|root| root.record.parent_id.as_ref() == Some(&record.id));
        if adopts_orphans {
            debug!("Review {} adopts orphaned replies, rebuilding", record.id);
            let order = self.child_order;
            let mut records = self.to_records();
            records.push(record);
            return ThreadBuilder::new(order).build_owned(records);
        }

        let seq = self.total_records();
        let order = self.child_order;
        let parent_id = record
            .parent_id
            .clone()
            .filter(|p| p != &record.id);

        let parent = match parent_id.as_ref() {
            Some(p) => find_mut(&mut self.roots, p),
            None => None,
        };

        match parent {
            Some(parent) => {
                let node = ThreadNode::leaf(
                    record,
                    parent.depth + 1,
                    parent.record.author.clone(),
                    seq,
                );
                let pos = order.insertion_point(&parent.children, &node);
                parent.children.insert(pos, node);
            }
            None => {
                let node = ThreadNode::leaf(record, 0, None, seq);
                let pos = ROOT_ORDER.insertion_point(&self.roots, &node);
                self.roots.insert(pos, node);
            }
        }

        self
    }
}

/// Child indices leading from `roots` to the node with the given id
fn path_to(roots: &[ThreadNode], id: &ReviewId) -> Option<Vec<usize>> {
    let mut path: Vec<usize> = Vec::new();
    let mut pending: Vec<(usize, usize, &ThreadNode)> = roots
        .iter()
        .enumerate()
        .rev()
        .map(|(i, n)| (0, i, n))
        .collect();
    while let Some((level, index, node)) = pending.pop() {
        path.truncate(level);
        path.push(index);
        if node.id() == id {
            return Some(path);
        }
        pending.extend(
            node.children
                .iter()
                .enumerate()
                .rev()
                .map(|(i, c)| (level + 1, i, c)),
        );
    }
    None
}

fn find_mut<'a>(roots: &'a mut [ThreadNode], id: &ReviewId) -> Option<&'a mut ThreadNode> {
    let path = path_to(roots, id)?;
    let (first, rest) = path.split_first()?;
    let mut node = roots.get_mut(*first)?;
    for &i in rest {
        node = node.children.get_mut(i)?;
    }
    Some(node)
}

/// Insert a new record into an existing forest
pub fn insert_reply(forest: Forest, record: ReviewRecord) -> Forest {
    forest.insert_reply(record)
}
