//! Depth-aware traversal for rendering

use super::forest::Forest;
use super::node::ThreadNode;
use crate::review::ReviewRecord;
use crate::types::AuthorRef;

/// How replies are laid out when rendering a forest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyLayout {
    /// Indent one step per nesting level, capped at `max_indent` when set
    Nested { max_indent: Option<usize> },
    /// Every reply of a thread at a single indentation level
    Flattened,
}

impl Default for ReplyLayout {
    fn default() -> Self {
        ReplyLayout::Nested { max_indent: None }
    }
}

/// One line of a rendered thread
#[derive(Debug, Clone, Copy)]
pub struct VisualEntry<'a> {
    /// The review to render
    pub record: &'a ReviewRecord,
    /// Logical nesting depth
    pub depth: usize,
    /// Indentation to render at
    pub indent: usize,
    /// Author of the parent review, for replies
    pub replying_to: Option<&'a AuthorRef>,
    /// Number of replies below this entry
    pub reply_count: usize,
}

impl VisualEntry<'_> {
    /// Check if this entry starts a thread
    pub fn is_root(&self) -> bool {
        self.depth == 0
    }
}

/// Pre-order walk over a forest that assigns visual indentation
pub struct ThreadWalker<'a> {
    layout: ReplyLayout,
    roots: std::slice::Iter<'a, ThreadNode>,
    thread: std::vec::IntoIter<(&'a ThreadNode, usize)>,
}

impl<'a> ThreadWalker<'a> {
    /// Walk `forest` with the given layout
    pub fn new(forest: &'a Forest, layout: ReplyLayout) -> Self {
        Self::from_roots(forest.roots(), layout)
    }

    /// Walk a subset of threads, e.g. `std::slice::from_ref(root)`
    pub fn from_roots(roots: &'a [ThreadNode], layout: ReplyLayout) -> Self {
        Self {
            layout,
            roots: roots.iter(),
            thread: Vec::new().into_iter(),
        }
    }

    fn entry(&self, node: &'a ThreadNode, reply_count: usize) -> VisualEntry<'a> {
        let indent = match self.layout {
            ReplyLayout::Nested { max_indent: Some(cap) } => node.depth.min(cap),
            ReplyLayout::Nested { max_indent: None } => node.depth,
            ReplyLayout::Flattened => node.depth.min(1),
        };
        VisualEntry {
            record: &node.record,
            depth: node.depth,
            indent,
            replying_to: node.replying_to.as_ref(),
            reply_count,
        }
    }
}

impl<'a> Iterator for ThreadWalker<'a> {
    type Item = VisualEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((node, reply_count)) = self.thread.next() {
                return Some(self.entry(node, reply_count));
            }
            let root = self.roots.next()?;
            self.thread = with_reply_counts(root).into_iter();
        }
    }
}

/// Nodes of one thread in pre-order, each with its descendant count
fn with_reply_counts(root: &ThreadNode) -> Vec<(&ThreadNode, usize)> {
    let mut order: Vec<(&ThreadNode, Option<usize>)> = Vec::new();
    let mut pending = vec![(root, None)];
    while let Some((node, parent)) = pending.pop() {
        let index = order.len();
        order.push((node, parent));
        pending.extend(node.children.iter().rev().map(|c| (c, Some(index))));
    }

    // Parents precede children, so a reverse pass sees every subtree complete
    let mut counts = vec![0usize; order.len()];
    for (i, (_, parent)) in order.iter().enumerate().rev() {
        if let Some(p) = parent {
            counts[*p] += counts[i] + 1;
        }
    }

    order.into_iter().map(|(node, _)| node).zip(counts).collect()
}
