//! An ordered map backed by an [AVL tree], where every node also tracks the
//! number of nodes in its subtree (its "weight").
//!
//! The weights make the position of a key and the key at a position both
//! O(log n) queries:
//!
//! ```
//! use weightavl::AvlTree;
//!
//! let mut t = AvlTree::default();
//! for (k, v) in [(10, "a"), (20, "b"), (30, "c")] {
//!     t.insert(k, v);
//! }
//!
//! // Inserting in ascending order rotated 20 up to the root.
//! let root = t.root().unwrap();
//! assert_eq!(*root.key(), 20);
//! assert_eq!(root.weight(), 3);
//!
//! assert_eq!(t.rank(&30), Ok(3));
//! assert_eq!(t.select(1), Ok((&10, &"a")));
//!
//! assert_eq!(t.remove(&20), Some("b"));
//! assert_eq!(t.len(), 2);
//! ```
//!
//! Every mutation rebalances the tree and keeps the cached height and weight
//! of each node exact, which [`AvlTree::check_invariants()`] verifies.
//!
//! The tree performs no internal synchronisation; wrap it in a lock to share
//! it between threads.
//!
//! [AVL tree]: https://en.wikipedia.org/wiki/AVL_tree

#![deny(rustdoc::broken_intra_doc_links, rust_2018_idioms)]
#![warn(missing_debug_implementations, clippy::use_self, clippy::dbg_macro)]

#[macro_use]
mod log;

mod entry;
mod error;
mod iter;
mod node;
mod tree;

pub use entry::*;
pub use error::*;
pub use iter::*;
pub use node::Node;
pub use tree::*;

#[cfg(test)]
mod test_utils;
