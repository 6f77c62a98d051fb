//! Read only descent
use super::{Leaf, Node};

impl<V> Node<V> {
    /// Follow `search` through full prefix matches, returning the node where it is exhausted.
    pub fn find(&self, search: &[u8]) -> Option<&Node<V>> {
        let mut current = self;
        let mut search = search;
        while let Some(label) = search.first() {
            current = current.get_edge(*label)?;
            search = search.strip_prefix(current.prefix.as_slice())?;
        }
        Some(current)
    }

    pub fn find_mut(&mut self, search: &[u8]) -> Option<&mut Node<V>> {
        let mut current = self;
        let mut search = search;
        while let Some(label) = search.first() {
            current = current.get_edge_mut(*label)?;
            search = search.strip_prefix(current.prefix.as_slice())?;
        }
        Some(current)
    }

    /// Find the subtree containing all keys that start with `prefix`.
    ///
    /// Unlike [Node::find], the prefix may end in the middle of the prefix of a node, in which
    /// case that node is returned.
    pub fn find_prefix(&self, prefix: &[u8]) -> Option<&Node<V>> {
        let mut current = self;
        let mut search = prefix;
        while let Some(label) = search.first() {
            current = current.get_edge(*label)?;
            if let Some(rest) = search.strip_prefix(current.prefix.as_slice()) {
                search = rest;
            } else if current.prefix.starts_with(search) {
                break;
            } else {
                return None;
            }
        }
        Some(current)
    }

    /// The leaf of the deepest node on the path of `search`
    pub fn longest_prefix(&self, search: &[u8]) -> Option<&Leaf<V>> {
        let mut last = None;
        let mut current = self;
        let mut search = search;
        loop {
            if let Some(leaf) = &current.leaf {
                last = Some(leaf);
            }
            let label = match search.first() {
                Some(label) => *label,
                None => break,
            };
            current = match current.get_edge(label) {
                Some(child) => child,
                None => break,
            };
            search = match search.strip_prefix(current.prefix.as_slice()) {
                Some(rest) => rest,
                None => break,
            };
        }
        last
    }

    pub fn minimum(&self) -> Option<&Leaf<V>> {
        let mut current = self;
        loop {
            if let Some(leaf) = &current.leaf {
                return Some(leaf);
            }
            current = &current.edges.first()?.node;
        }
    }

    pub fn maximum(&self) -> Option<&Leaf<V>> {
        let mut current = self;
        while let Some(edge) = current.edges.last() {
            current = &edge.node;
        }
        current.leaf.as_ref()
    }
}
