use std::{collections::BTreeMap, fmt::Debug};

use log::debug;

use crate::{
    node::{Iter, Node, Visit},
    util::Hex,
};

/// An ordered map from byte strings to values, stored as a prefix compressed radix tree.
///
/// Besides exact lookup it supports longest prefix match, ordered traversal and iteration,
/// and traversal and removal of all entries below a prefix.
///
/// The tree is not synchronized. Concurrent use requires an external lock around the whole
/// tree.
#[derive(Clone)]
pub struct RadixTree<V> {
    root: Node<V>,
    size: usize,
}

impl<V> Default for RadixTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> RadixTree<V> {
    /// An empty tree
    pub const fn new() -> Self {
        Self {
            root: Node::empty(),
            size: 0,
        }
    }

    /// Build a tree from key value pairs, inserting them in iteration order.
    ///
    /// Later pairs with an equal key overwrite earlier ones.
    pub fn from_map<K: AsRef<[u8]>>(map: impl IntoIterator<Item = (K, V)>) -> Self {
        let mut res = Self::new();
        res.extend(map);
        res
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Remove all entries
    pub fn clear(&mut self) {
        self.root = Node::empty();
        self.size = 0;
    }

    /// Insert a value, returning the previous value if the key was already present.
    pub fn insert(&mut self, key: impl AsRef<[u8]>, value: V) -> Option<V> {
        let key = key.as_ref();
        let res = self.root.insert(key, key, value);
        if res.is_none() {
            self.size += 1;
        }
        res
    }

    /// Remove a key, returning its value if it was present.
    pub fn remove(&mut self, key: impl AsRef<[u8]>) -> Option<V> {
        let res = self.root.remove(key.as_ref());
        if res.is_some() {
            self.size -= 1;
        }
        res
    }

    /// Remove all keys that start with `prefix`, returning the number of removed keys.
    ///
    /// Runs in time proportional to the length of the prefix plus the size of the removed
    /// subtree.
    pub fn remove_prefix(&mut self, prefix: impl AsRef<[u8]>) -> usize {
        let prefix = prefix.as_ref();
        let count = if prefix.is_empty() {
            let count = self.size;
            self.root = Node::empty();
            count
        } else {
            self.root.remove_prefix(prefix)
        };
        self.size -= count;
        debug!("remove_prefix {} removed {}", Hex::new(prefix), count);
        count
    }

    pub fn get(&self, key: impl AsRef<[u8]>) -> Option<&V> {
        let node = self.root.find(key.as_ref())?;
        node.leaf.as_ref().map(|leaf| &leaf.value)
    }

    pub fn get_mut(&mut self, key: impl AsRef<[u8]>) -> Option<&mut V> {
        let node = self.root.find_mut(key.as_ref())?;
        node.leaf.as_mut().map(|leaf| &mut leaf.value)
    }

    pub fn contains_key(&self, key: impl AsRef<[u8]>) -> bool {
        self.get(key).is_some()
    }

    /// The entry with the longest key that is a prefix of `key`, including `key` itself.
    pub fn longest_prefix(&self, key: impl AsRef<[u8]>) -> Option<(&[u8], &V)> {
        let leaf = self.root.longest_prefix(key.as_ref())?;
        Some((&leaf.key, &leaf.value))
    }

    /// The entry with the smallest key
    pub fn minimum(&self) -> Option<(&[u8], &V)> {
        let leaf = self.root.minimum()?;
        Some((&leaf.key, &leaf.value))
    }

    /// The entry with the largest key
    pub fn maximum(&self) -> Option<(&[u8], &V)> {
        let leaf = self.root.maximum()?;
        Some((&leaf.key, &leaf.value))
    }

    /// Visit all entries in ascending key order until `f` returns true.
    pub fn walk(&self, mut f: impl FnMut(&[u8], &V) -> bool) {
        self.root.walk(&mut f);
    }

    /// Visit all entries whose key starts with `prefix` in ascending key order, until `f`
    /// returns true.
    pub fn walk_prefix(&self, prefix: impl AsRef<[u8]>, mut f: impl FnMut(&[u8], &V) -> bool) {
        if let Some(node) = self.root.find_prefix(prefix.as_ref()) {
            node.walk(&mut f);
        }
    }

    /// Visit all entries whose key is a prefix of `path`, shortest first, until `f` returns
    /// true.
    ///
    /// Where [walk_prefix](Self::walk_prefix) visits the entries below a prefix, this visits
    /// the entries above a key.
    pub fn walk_path(&self, path: impl AsRef<[u8]>, mut f: impl FnMut(&[u8], &V) -> bool) {
        self.root.walk_path(path.as_ref(), &mut f);
    }

    /// Visit all entries in ascending key order, allowing the visitor to modify the value and
    /// to remove the entry it is visiting.
    ///
    /// Every entry present at the start is visited exactly once, unless the walk is stopped.
    pub fn walk_mut(&mut self, mut f: impl FnMut(&[u8], &mut V) -> Visit) {
        let mut removed = 0;
        self.root.walk_mut(&mut f, &mut removed);
        self.size -= removed;
    }

    /// Keep only the entries for which `f` returns true.
    pub fn retain(&mut self, mut f: impl FnMut(&[u8], &mut V) -> bool) {
        self.walk_mut(|k, v| if f(k, v) { Visit::Continue } else { Visit::Remove })
    }

    /// Iterate over all entries in ascending key order
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(Some(&self.root))
    }

    /// Iterate over all entries whose key starts with `prefix`, in ascending key order
    pub fn scan_prefix(&self, prefix: impl AsRef<[u8]>) -> Iter<'_, V> {
        Iter::new(self.root.find_prefix(prefix.as_ref()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &[u8]> {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, v)| v)
    }

    /// Copy all entries into a map
    pub fn to_map(&self) -> BTreeMap<Vec<u8>, V>
    where
        V: Clone,
    {
        let mut res = BTreeMap::new();
        self.walk(|k, v| {
            res.insert(k.to_vec(), v.clone());
            false
        });
        res
    }

    /// Check the structural invariants of the tree.
    ///
    /// Edges are sorted by label and match the first byte of their target's prefix, every
    /// node except the root has a leaf or at least two children, every leaf is stored at the
    /// node its key leads to, and the number of leaves equals [len](Self::len).
    pub fn check_invariants(&self) -> anyhow::Result<()> {
        let count = self.root.check(&mut Vec::new(), true)?;
        anyhow::ensure!(
            count == self.size,
            "tree has {} leaves but size {}",
            count,
            self.size
        );
        Ok(())
    }

    /// Render the node structure with prefixes as hex
    pub fn dump_tree(&self) -> anyhow::Result<String>
    where
        V: Debug,
    {
        fn hex(x: &[u8]) -> anyhow::Result<String> {
            Ok(hex::encode(x))
        }
        let mut res = String::new();
        self.root.dump_tree("", hex, &mut res)?;
        Ok(res)
    }

    /// Render the node structure with prefixes as utf8.
    ///
    /// Fails if a prefix is not valid utf8, which can happen even if all keys are, since
    /// prefixes may split multi byte characters.
    pub fn dump_tree_utf8(&self) -> anyhow::Result<String>
    where
        V: Debug,
    {
        fn utf8(x: &[u8]) -> anyhow::Result<String> {
            Ok(std::str::from_utf8(x)?.to_owned())
        }
        let mut res = String::new();
        self.root.dump_tree("", utf8, &mut res)?;
        Ok(res)
    }
}

impl<V: Debug> Debug for RadixTree<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(k, v)| (Hex::new(k), v)))
            .finish()
    }
}

impl<V: PartialEq> PartialEq for RadixTree<V> {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.iter().eq(other.iter())
    }
}

impl<V: Eq> Eq for RadixTree<V> {}

impl<K: AsRef<[u8]>, V> Extend<(K, V)> for RadixTree<V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: AsRef<[u8]>, V> FromIterator<(K, V)> for RadixTree<V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::from_map(iter)
    }
}

impl<'a, V> IntoIterator for &'a RadixTree<V> {
    type Item = (&'a [u8], &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Create a [RadixTree] from a list of key value pairs
#[macro_export]
macro_rules! radixtree {
    ($($key:expr => $value:expr,)+) => { $crate::radixtree!($($key => $value),+) };
    ($($key:expr => $value:expr),*) => {{
        #[allow(unused_mut)]
        let mut tree = $crate::RadixTree::new();
        $(
            tree.insert($key, $value);
        )*
        tree
    }};
}
