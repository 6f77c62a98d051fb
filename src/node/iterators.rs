use std::iter::FusedIterator;

use super::Node;

/// An ordered iterator over the entries of a [RadixTree](crate::RadixTree) or one of its
/// subtrees.
///
/// Keys are stored in the leaves, so unlike a walk over prefix fragments no key has to be
/// assembled during iteration.
pub struct Iter<'a, V> {
    /// nodes on the current path, with the position within each node.
    ///
    /// Position 0 is the leaf of the node, position i > 0 is edge i - 1.
    stack: Vec<(&'a Node<V>, usize)>,
}

impl<'a, V> Iter<'a, V> {
    pub(crate) fn new(tree: Option<&'a Node<V>>) -> Self {
        Self {
            stack: tree.into_iter().map(|node| (node, 0)).collect(),
        }
    }

    /// advance the position of the topmost node, returning the previous one
    fn inc(&mut self) -> Option<(&'a Node<V>, usize)> {
        let (node, pos) = self.stack.last_mut()?;
        let res = (*node, *pos);
        *pos += 1;
        Some(res)
    }
}

impl<V> Node<V> {
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(Some(self))
    }
}

impl<'a, V> Clone for Iter<'a, V> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a [u8], &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, pos)) = self.inc() {
            if pos == 0 {
                if let Some(leaf) = &node.leaf {
                    return Some((&leaf.key, &leaf.value));
                }
            } else if let Some(edge) = node.edges.get(pos - 1) {
                self.stack.push((&edge.node, 0));
            } else {
                self.stack.pop();
            }
        }
        None
    }
}

impl<'a, V> FusedIterator for Iter<'a, V> {}
