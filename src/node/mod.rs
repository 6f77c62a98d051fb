//! Implementation of the radix tree node and associated plumbing
//!
//! A node consumes its `prefix` from any search key that reaches it, optionally carries a
//! leaf, and has a list of edges sorted by label. The label of an edge is the first byte of
//! the prefix of its target, so finding the child for the next search byte is a binary search.
use std::fmt::Write;

use log::trace;

use crate::util::Hex;

mod iterators;
mod mutation;
mod query;
#[cfg(test)]
mod tests;
mod walk;

pub use iterators::Iter;
pub use walk::Visit;

/// A key that terminates at a node, together with its value
#[derive(Debug, Clone)]
pub(crate) struct Leaf<V> {
    pub key: Box<[u8]>,
    pub value: V,
}

impl<V> Leaf<V> {
    pub fn new(key: &[u8], value: V) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// An outgoing edge, keyed by the first byte of the prefix of the target
#[derive(Debug, Clone)]
pub(crate) struct Edge<V> {
    pub label: u8,
    pub node: Node<V>,
}

impl<V> Edge<V> {
    pub fn new(node: Node<V>) -> Self {
        let label = *node
            .prefix
            .first()
            .expect("edge target must have a non empty prefix");
        Self { label, node }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Node<V> {
    pub prefix: Vec<u8>,
    pub leaf: Option<Leaf<V>>,
    pub edges: Vec<Edge<V>>,
}

impl<V> Default for Node<V> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Tears the subtree down with an explicit stack instead of recursing once per level
impl<V> Drop for Node<V> {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.edges);
        while let Some(mut edge) = stack.pop() {
            stack.append(&mut edge.node.edges);
        }
    }
}

impl<V> Node<V> {
    pub const fn empty() -> Self {
        Self {
            prefix: Vec::new(),
            leaf: None,
            edges: Vec::new(),
        }
    }

    /// A node without children that consumes `prefix` and stores `key`
    pub fn single(prefix: &[u8], key: &[u8], value: V) -> Self {
        Self {
            prefix: prefix.to_vec(),
            leaf: Some(Leaf::new(key, value)),
            edges: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.leaf.is_some()
    }

    /// true if the node carries neither a leaf nor children
    pub fn is_empty(&self) -> bool {
        self.leaf.is_none() && self.edges.is_empty()
    }

    /// index of the edge with the given label, or the insertion point for it
    fn edge_index(&self, label: u8) -> Result<usize, usize> {
        self.edges.binary_search_by_key(&label, |e| e.label)
    }

    pub fn get_edge(&self, label: u8) -> Option<&Node<V>> {
        let idx = self.edge_index(label).ok()?;
        Some(&self.edges[idx].node)
    }

    pub fn get_edge_mut(&mut self, label: u8) -> Option<&mut Node<V>> {
        let idx = self.edge_index(label).ok()?;
        Some(&mut self.edges[idx].node)
    }

    /// add an edge, keeping the edges sorted by label
    pub fn add_edge(&mut self, edge: Edge<V>) {
        match self.edge_index(edge.label) {
            Ok(_) => panic!("adding duplicate edge {:02x}", edge.label),
            Err(idx) => self.edges.insert(idx, edge),
        }
    }

    /// remove the edge with the given label, returning its target
    pub fn del_edge(&mut self, label: u8) -> Option<Node<V>> {
        let idx = self.edge_index(label).ok()?;
        Some(self.edges.remove(idx).node)
    }

    /// Split the prefix of this node at `n`.
    ///
    /// Afterwards self consumes only the first `n` bytes of the former prefix and has no leaf
    /// and a single child, which is the former self with the remainder as prefix.
    pub fn split(&mut self, n: usize) {
        assert!(
            n > 0 && n < self.prefix.len(),
            "split at {} of a prefix of length {}",
            n,
            self.prefix.len()
        );
        trace!("split {} at {}", Hex::new(&self.prefix), n);
        let rest = self.prefix.split_off(n);
        let child = Self {
            prefix: rest,
            leaf: self.leaf.take(),
            edges: std::mem::take(&mut self.edges),
        };
        self.edges.push(Edge::new(child));
    }

    /// Absorb the single child of a node without a leaf.
    ///
    /// This is the inverse of [Node::split].
    pub fn merge_child(&mut self) {
        assert!(
            self.leaf.is_none() && self.edges.len() == 1,
            "merging a node with leaf={} and {} edges",
            self.is_leaf(),
            self.edges.len()
        );
        if let Some(Edge { node: mut child, .. }) = self.edges.pop() {
            trace!(
                "merge {} with {}",
                Hex::new(&self.prefix),
                Hex::new(&child.prefix)
            );
            self.prefix.extend_from_slice(&child.prefix);
            self.leaf = child.leaf.take();
            self.edges = std::mem::take(&mut child.edges);
        }
    }

    /// Restore the compression invariant for the child at `idx` after a mutation below it.
    ///
    /// A child left with neither leaf nor children is unlinked, a child without leaf and with
    /// a single edge is merged with that edge. Returns true if the edge at `idx` was removed,
    /// in which case the next edge now sits at `idx`.
    pub fn compact_child(&mut self, idx: usize) -> bool {
        let child = &mut self.edges[idx].node;
        if child.is_empty() {
            trace!("unlink {}", Hex::new(&child.prefix));
            self.edges.remove(idx);
            true
        } else {
            if !child.is_leaf() && child.edges.len() == 1 {
                child.merge_child();
            }
            false
        }
    }

    /// Check the structural invariants of this subtree, returning the number of leaves.
    ///
    /// `path` is the concatenation of the prefixes from the root to, but excluding, self.
    pub fn check(&self, path: &mut Vec<u8>, is_root: bool) -> anyhow::Result<usize> {
        if is_root {
            anyhow::ensure!(
                self.prefix.is_empty(),
                "root has prefix {}",
                Hex::new(&self.prefix)
            );
        } else {
            anyhow::ensure!(
                !self.prefix.is_empty(),
                "node below {} has an empty prefix",
                Hex::partial(path, 32)
            );
        }
        path.extend_from_slice(&self.prefix);
        if let Some(leaf) = &self.leaf {
            anyhow::ensure!(
                &*leaf.key == path.as_slice(),
                "leaf key {} stored at {}",
                Hex::partial(&leaf.key, 32),
                Hex::partial(path, 32)
            );
        } else if !is_root {
            anyhow::ensure!(
                self.edges.len() >= 2,
                "node {} has no leaf and {} edges",
                Hex::partial(path, 32),
                self.edges.len()
            );
        }
        for w in self.edges.windows(2) {
            anyhow::ensure!(
                w[0].label < w[1].label,
                "edges of {} not sorted: {:02x} >= {:02x}",
                Hex::partial(path, 32),
                w[0].label,
                w[1].label
            );
        }
        let mut count = usize::from(self.is_leaf());
        for edge in &self.edges {
            anyhow::ensure!(
                edge.node.prefix.first() == Some(&edge.label),
                "edge {:02x} of {} points to prefix {}",
                edge.label,
                Hex::partial(path, 32),
                Hex::new(&edge.node.prefix)
            );
            count += edge.node.check(path, false)?;
        }
        path.truncate(path.len() - self.prefix.len());
        Ok(count)
    }

    /// Render the subtree, one line per node, indented by the path to the node
    pub fn dump_tree(
        &self,
        indent: &str,
        p: impl Fn(&[u8]) -> anyhow::Result<String> + Copy,
        out: &mut String,
    ) -> anyhow::Result<()>
    where
        V: std::fmt::Debug,
    {
        let prefix = p(&self.prefix)?;
        if let Some(leaf) = &self.leaf {
            writeln!(out, "{}{}:{:?}", indent, prefix, leaf.value)?;
        } else {
            writeln!(out, "{}{}", indent, prefix)?;
        }
        let indent = indent.to_owned() + &prefix;
        for edge in &self.edges {
            edge.node.dump_tree(&indent, p, out)?;
        }
        Ok(())
    }
}
