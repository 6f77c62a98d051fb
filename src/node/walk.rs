//! Pre-order traversal
//!
//! Visitors return true to stop the walk. The stop is propagated through all enclosing calls.
use super::Node;

/// What to do with the entry a [walk_mut](crate::RadixTree::walk_mut) visitor was called with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// keep the entry and go on
    Continue,
    /// remove the entry and go on
    Remove,
    /// keep the entry and end the walk
    Stop,
    /// remove the entry and end the walk
    RemoveAndStop,
}

impl Visit {
    fn removes(self) -> bool {
        matches!(self, Visit::Remove | Visit::RemoveAndStop)
    }

    fn stops(self) -> bool {
        matches!(self, Visit::Stop | Visit::RemoveAndStop)
    }
}

impl<V> Node<V> {
    /// Visit the leaf of self, then all children in ascending label order.
    pub fn walk<F: FnMut(&[u8], &V) -> bool>(&self, f: &mut F) -> bool {
        self.iter().any(|(key, value)| f(key, value))
    }

    /// Visit the leaves of all nodes on the path of `search`, starting with self.
    pub fn walk_path<F: FnMut(&[u8], &V) -> bool>(&self, search: &[u8], f: &mut F) {
        let mut current = self;
        let mut search = search;
        loop {
            if let Some(leaf) = &current.leaf {
                if f(&leaf.key, &leaf.value) {
                    return;
                }
            }
            let label = match search.first() {
                Some(label) => *label,
                None => return,
            };
            current = match current.get_edge(label) {
                Some(child) => child,
                None => return,
            };
            search = match search.strip_prefix(current.prefix.as_slice()) {
                Some(rest) => rest,
                None => return,
            };
        }
    }

    /// Pre-order walk that lets the visitor remove the entry it is visiting.
    ///
    /// Removed leaves are counted in `removed`. A removal may leave a child that has to be
    /// unlinked or merged with its only child. This is done once the subtree of the child has
    /// been visited, so the merged contents are never visited twice. The live edge count is
    /// re-read after every child, and the index is not advanced when a child was unlinked,
    /// because its successor has taken its slot.
    pub fn walk_mut<F: FnMut(&[u8], &mut V) -> Visit>(
        &mut self,
        f: &mut F,
        removed: &mut usize,
    ) -> bool {
        let visit = match &mut self.leaf {
            Some(leaf) => f(&leaf.key, &mut leaf.value),
            None => Visit::Continue,
        };
        if visit.removes() {
            self.leaf = None;
            *removed += 1;
        }
        if visit.stops() {
            return true;
        }
        let mut i = 0;
        while i < self.edges.len() {
            let stop = self.edges[i].node.walk_mut(f, removed);
            let unlinked = self.compact_child(i);
            if stop {
                return true;
            }
            if !unlinked {
                i += 1;
            }
        }
        false
    }
}
