//! Thread tree nodes

use crate::review::ReviewRecord;
use crate::types::{AuthorRef, ReviewId};
use std::fmt;

/// A review together with its resolved replies
///
/// Cloning, comparing and dropping walk the subtree with an explicit stack,
/// so arbitrarily long reply chains are safe.
pub struct ThreadNode {
    /// The wrapped review
    pub record: ReviewRecord,
    /// Direct replies, ordered by the builder's child ordering
    pub children: Vec<ThreadNode>,
    /// 0 for top-level, +1 per nesting level
    pub depth: usize,
    /// Author of the resolved parent
    pub replying_to: Option<AuthorRef>,
    /// Position in the de-duplicated input
    pub(crate) seq: usize,
}

impl ThreadNode {
    pub(crate) fn leaf(
        record: ReviewRecord,
        depth: usize,
        replying_to: Option<AuthorRef>,
        seq: usize,
    ) -> Self {
        Self {
            record,
            children: Vec::new(),
            depth,
            replying_to,
            seq,
        }
    }

    /// Id of the wrapped review
    pub fn id(&self) -> &ReviewId {
        &self.record.id
    }

    /// Check if the node has no replies
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Every descendant node in depth-first pre-order
    ///
    /// Each call starts a fresh traversal.
    pub fn descendants(&self) -> NodeIter<'_> {
        NodeIter::new(&self.children)
    }

    /// Every descendant record in depth-first pre-order
    pub fn flatten_descendants(&self) -> Vec<&ReviewRecord> {
        self.descendants().map(|n| &n.record).collect()
    }

    /// Effective reply count: all descendants, not only direct replies
    pub fn reply_count(&self) -> usize {
        self.descendants().count()
    }

    /// Deepest depth reached in this subtree
    pub fn max_depth(&self) -> usize {
        self.descendants()
            .map(|n| n.depth)
            .max()
            .unwrap_or(self.depth)
    }

    /// Find a node in this subtree by review id
    pub fn find(&self, id: &ReviewId) -> Option<&ThreadNode> {
        if self.id() == id {
            return Some(self);
        }
        self.descendants().find(|n| n.id() == id)
    }

    /// Copy of this node without its replies
    fn detached(&self) -> Self {
        Self {
            record: self.record.clone(),
            children: Vec::with_capacity(self.children.len()),
            depth: self.depth,
            replying_to: self.replying_to.clone(),
            seq: self.seq,
        }
    }

    fn same_entry(&self, other: &Self) -> bool {
        self.record == other.record
            && self.depth == other.depth
            && self.replying_to == other.replying_to
            && self.seq == other.seq
            && self.children.len() == other.children.len()
    }
}

impl Clone for ThreadNode {
    fn clone(&self) -> Self {
        // Each frame pairs a source node with its copy, children filled in order
        let mut parents: Vec<(&ThreadNode, ThreadNode)> = Vec::new();
        let mut current = (self, self.detached());
        loop {
            let source = current.0;
            match source.children.get(current.1.children.len()) {
                Some(child) => {
                    let parent = std::mem::replace(&mut current, (child, child.detached()));
                    parents.push(parent);
                }
                None => match parents.pop() {
                    Some(mut parent) => {
                        parent.1.children.push(current.1);
                        current = parent;
                    }
                    None => return current.1,
                },
            }
        }
    }
}

impl PartialEq for ThreadNode {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((a, b)) = pending.pop() {
            if !a.same_entry(b) {
                return false;
            }
            pending.extend(a.children.iter().zip(&b.children));
        }
        true
    }
}

impl Eq for ThreadNode {}

impl Drop for ThreadNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

impl fmt::Debug for ThreadNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let replies: Vec<(usize, &str)> = self
            .descendants()
            .map(|n| (n.depth, n.id().as_str()))
            .collect();
        f.debug_struct("ThreadNode")
            .field("record", &self.record)
            .field("depth", &self.depth)
            .field("replying_to", &self.replying_to)
            .field("replies", &replies)
            .finish()
    }
}

/// Every descendant record of `node` in depth-first pre-order
pub fn flatten_descendants(node: &ThreadNode) -> Vec<&ReviewRecord> {
    node.flatten_descendants()
}

/// Pre-order traversal over a list of sibling trees
///
/// Uses an explicit stack, so traversal depth is not bounded by the call
/// stack.
#[derive(Debug, Clone)]
pub struct NodeIter<'a> {
    stack: Vec<&'a ThreadNode>,
}

impl<'a> NodeIter<'a> {
    /// Traverse `nodes` and all of their descendants
    pub fn new(nodes: &'a [ThreadNode]) -> Self {
        Self {
            stack: nodes.iter().rev().collect(),
        }
    }
}

impl<'a> Iterator for NodeIter<'a> {
    type Item = &'a ThreadNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thread::fixtures::{ids, record};

    fn tree() -> ThreadNode {
        // 1 -> (2 -> 3), 4
        let mut root = ThreadNode::leaf(record("1", None, 0), 0, None, 0);
        let mut two = ThreadNode::leaf(record("2", Some("1"), 1), 1, None, 1);
        two.children
            .push(ThreadNode::leaf(record("3", Some("2"), 2), 2, None, 2));
        root.children.push(two);
        root.children
            .push(ThreadNode::leaf(record("4", Some("1"), 3), 1, None, 3));
        root
    }

    #[test]
    fn test_flatten_descendants_pre_order() {
        let root = tree();
        assert_eq!(ids(root.flatten_descendants()), vec!["2", "3", "4"]);
        assert_eq!(ids(flatten_descendants(&root.children[0])), vec!["3"]);
    }

    #[test]
    fn test_descendants_restartable() {
        let root = tree();
        let first: Vec<_> = root.descendants().map(|n| n.id().clone()).collect();
        let second: Vec<_> = root.descendants().map(|n| n.id().clone()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_reply_count_and_depth() {
        let root = tree();
        assert_eq!(root.reply_count(), 3);
        assert_eq!(root.max_depth(), 2);
        assert!(root.children[1].is_leaf());
        assert_eq!(root.children[1].max_depth(), 1);
    }

    #[test]
    fn test_find() {
        let root = tree();
        assert_eq!(root.find(&ReviewId::from_string("3")).unwrap().depth, 2);
        assert!(root.find(&ReviewId::from_string("1")).is_some());
        assert!(root.find(&ReviewId::from_string("9")).is_none());
    }

    #[test]
    fn test_clone_and_eq_cover_whole_subtree() {
        let root = tree();
        let copy = root.clone();
        assert_eq!(root, copy);
        assert_eq!(ids(copy.flatten_descendants()), vec!["2", "3", "4"]);

        let mut changed = root.clone();
        changed.children[0].children[0].record.body = "edited".to_string();
        assert_ne!(root, changed);

        let mut pruned = root.clone();
        pruned.children[0].children.clear();
        assert_ne!(root, pruned);
    }

    #[test]
    fn test_debug_lists_replies() {
        let out = format!("{:?}", tree());
        assert!(out.contains("replies: [(1, \"2\"), (2, \"3\"), (1, \"4\")]"));
    }
}
