//! Insert, remove and remove_prefix
//!
//! All operations are called on a node whose own prefix has already been consumed, with
//! `search` being the rest of the key.
use log::trace;

use super::{Edge, Leaf, Node};
use crate::util::common_prefix;

impl<V> Node<V> {
    /// Insert `value` for `key`, returning the previous value if there was one.
    pub fn insert(&mut self, key: &[u8], search: &[u8], value: V) -> Option<V> {
        let mut current = self;
        let mut search = search;
        while let Some(label) = search.first() {
            let idx = match current.edge_index(*label) {
                Ok(idx) => idx,
                Err(_) => {
                    current.add_edge(Edge::new(Node::single(search, key, value)));
                    return None;
                }
            };
            let child = &mut current.edges[idx].node;
            let n = common_prefix(search, &child.prefix);
            if n < child.prefix.len() {
                // the child now consumes exactly the shared part, the leftover of the key
                // either ends there or diverges from the former child
                child.split(n);
            }
            current = child;
            search = &search[n..];
        }
        if let Some(leaf) = &mut current.leaf {
            return Some(std::mem::replace(&mut leaf.value, value));
        }
        current.leaf = Some(Leaf::new(key, value));
        None
    }

    /// Remove the value for `search`, compacting the path afterwards.
    pub fn remove(&mut self, search: &[u8]) -> Option<V> {
        let mut path = Vec::new();
        let mut current = &mut *self;
        let mut search = search;
        while let Some(label) = search.first() {
            let idx = current.edge_index(*label).ok()?;
            let child = &mut current.edges[idx].node;
            search = search.strip_prefix(child.prefix.as_slice())?;
            path.push(idx);
            current = child;
        }
        let value = current.leaf.take()?.value;
        // only the node that lost its leaf and its parent can change shape: the node may be
        // unlinked or merged, and a parent that lost an edge may be left with a single one
        for depth in (path.len().saturating_sub(2)..path.len()).rev() {
            self.descend_mut(&path[..depth]).compact_child(path[depth]);
        }
        Some(value)
    }

    /// Remove all values whose remaining key starts with `prefix`.
    ///
    /// `prefix` must be non empty, the case of an empty prefix is handled by the caller since
    /// it removes self entirely. Returns the number of removed values.
    pub fn remove_prefix(&mut self, prefix: &[u8]) -> usize {
        let mut path = Vec::new();
        let mut current = &mut *self;
        let mut search = prefix;
        let count = loop {
            let label = match search.first() {
                Some(label) => *label,
                None => return 0,
            };
            let idx = match current.edge_index(label) {
                Ok(idx) => idx,
                Err(_) => return 0,
            };
            if current.edges[idx].node.prefix.starts_with(search) {
                // prefix ends within or at the end of the child prefix
                let count = current.edges[idx].node.count();
                current.edges.remove(idx);
                trace!("removed subtree with {} values", count);
                break count;
            }
            let child = &mut current.edges[idx].node;
            search = match search.strip_prefix(child.prefix.as_slice()) {
                Some(rest) => rest,
                None => return 0,
            };
            path.push(idx);
            current = child;
        };
        // the node that lost an edge may be left without leaf and with a single edge
        if let Some((idx, parents)) = path.split_last() {
            self.descend_mut(parents).compact_child(*idx);
        }
        count
    }

    /// follow a path of edge indices
    fn descend_mut(&mut self, path: &[usize]) -> &mut Node<V> {
        let mut current = self;
        for idx in path {
            current = &mut current.edges[*idx].node;
        }
        current
    }

    /// number of values in this subtree
    pub fn count(&self) -> usize {
        self.iter().count()
    }
}
