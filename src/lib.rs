//! This crate exposes ordered, key-based containers built on a plain Binary Search Tree (BST):
//! a [`Set`] of unique keys and a [`Multiset`] that keeps duplicates.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to insert, find, and delete
//! stored keys. BSTs are typically defined recursively using the notion of a `Node`. A `Node`
//! stores a key and will sometimes have child `Node`s. The invariants kept here are:
//!
//! 1. For every `Node` in the tree, all the `Node`s in its left subtree have a key less than its
//!    own key.
//! 2. For every `Node` in the tree, all the `Node`s in its right subtree have a key greater than
//!    or equal to its own key.
//!
//! The "or equal" is what lets the [`Multiset`] reuse the exact same tree as the [`Set`]: a
//! duplicate simply goes right. The [`Set`] never hands the tree a duplicate in the first place.
//!
//! Every `Node` also knows its parent. That's what lets a [`Cursor`] step to the next or previous
//! key in `O(height)` without keeping a stack of the nodes above it.
//!
//! > Note that this tree is never rebalanced. Inserting keys in sorted order builds a tree that
//! > is really a linked list, and operations on it take `O(n)`.
//!
//! ## Cursors
//!
//! Lookups return a [`Cursor`] rather than a reference. A missing key is not an error: it gives
//! back the end position. Only reading the key under a cursor can fail, with an [`Error`].
//!
//! ```
//! use ordtree::{Error, Multiset};
//!
//! let multiset = Multiset::from([1, 2, 2, 3]);
//!
//! let two = multiset.find(&2);
//! assert_eq!(multiset.get(multiset.next(two)), Ok(&2));
//!
//! let missing = multiset.find(&4);
//! assert_eq!(missing, multiset.end());
//! assert_eq!(multiset.get(missing), Err(Error::OutOfBounds));
//! ```
//!
//! ## Features
//!
//! - `serde`: `Serialize`/`Deserialize` for both containers, as sequences of keys.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod cursor;
mod error;
pub mod multiset;
pub mod ordered;
pub mod set;
mod tree;

#[cfg(feature = "serde")]
mod serde_impls;


pub use cursor::{Cursor, IntoIter, Iter};
pub use error::{Error, Result};
pub use multiset::Multiset;
pub use ordered::OrderedContainer;
pub use set::Set;
