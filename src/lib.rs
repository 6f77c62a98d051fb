//! An ordered, prefix compressed string dictionary.
//!
//! [RadixTree] maps byte string keys to values of an arbitrary type. Besides exact lookup it
//! supports longest prefix match, ordered traversal, and traversal and bulk removal of all
//! keys below a prefix, which makes it usable as a routing table, an autocomplete index or a
//! hierarchical configuration store.
//!
//! ```
//! use radixtrie::{radixtree, RadixTree};
//!
//! let mut routes: RadixTree<u32> = radixtree! {
//!     "/" => 0,
//!     "/api" => 1,
//!     "/api/users" => 2,
//! };
//! assert_eq!(routes.longest_prefix("/api/users/42"), Some((&b"/api/users"[..], &2)));
//! assert_eq!(routes.scan_prefix("/api").count(), 2);
//! assert_eq!(routes.remove_prefix("/api"), 2);
//! assert_eq!(routes.len(), 1);
//! ```
//!
//! Each node consumes a compressed prefix of the key and has its children sorted by the
//! first byte of their prefix. Chains of nodes without values are always collapsed, so the
//! shape of the tree only depends on the set of keys it contains.
mod node;
mod tree;
mod util;
pub use node::{Iter, Visit};
pub use tree::RadixTree;

#[cfg(test)]
#[macro_use]
extern crate maplit;
