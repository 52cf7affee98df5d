//! Positions in an ordered container and in-order traversal.
//!
//! A [`Cursor`] names one element (or the end position) of a [`Set`][crate::Set] or
//! [`Multiset`][crate::Multiset]. It holds no borrow, so a cursor returned by `find` can be handed
//! straight back to `erase`. Stepping and dereferencing go through the container that produced
//! it.
//!
//! The end position sits between the largest and smallest element: stepping forward from the
//! last element reaches it, and stepping forward again wraps to the first.
//!
//! # Examples
//!
//! ```
//! use ordtree::Set;
//!
//! let set = Set::from([15, 1, 6]);
//!
//! let mut cursor = set.begin();
//! assert_eq!(set.get(cursor), Ok(&1));
//!
//! cursor = set.next(cursor);
//! assert_eq!(set.get(cursor), Ok(&6));
//!
//! cursor = set.next(set.next(cursor));
//! assert_eq!(cursor, set.end());
//! assert!(set.get(cursor).is_err());
//!
//! assert_eq!(set.get(set.prev(cursor)), Ok(&15));
//! ```

use std::iter::FusedIterator;

use crate::error::{Error, Result};
use crate::tree::{Link, NodeId, Tree, TreeId};

/// A position in an ordered container.
///
/// Two cursors are equal exactly when they name the same node. The default cursor is the end
/// position of every container.
///
/// A cursor stays valid until the node it names is removed. Reading through a cursor whose node
/// is gone, or one handed out by a different container, reports [`Error::StaleCursor`] rather
/// than returning some other element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Cursor {
    at: Option<(TreeId, NodeId)>,
}

impl Cursor {
    pub(crate) const END: Self = Self { at: None };

    /// Whether this is the end position.
    pub const fn is_end(self) -> bool {
        self.at.is_none()
    }
}

impl<K> Tree<K> {
    /// The node after `id` in sorted order, or `None` past the maximum.
    ///
    /// Uses the right subtree when there is one. Otherwise the successor is the first ancestor
    /// reached from its left side.
    pub(crate) fn successor(&self, id: NodeId) -> Link {
        let node = self.get(id)?;
        if let Some(right) = node.right {
            return Some(self.minimum_excluding(right, id));
        }

        let mut child = id;
        let mut parent = node.parent;
        while let Some(ancestor) = parent {
            let ancestor_node = self.node(ancestor);
            if ancestor_node.right != Some(child) {
                break;
            }
            child = ancestor;
            parent = ancestor_node.parent;
        }
        parent
    }

    /// The node before `id` in sorted order, or `None` before the minimum.
    pub(crate) fn predecessor(&self, id: NodeId) -> Link {
        let node = self.get(id)?;
        if let Some(left) = node.left {
            return Some(self.maximum_excluding(left, id));
        }

        let mut child = id;
        let mut parent = node.parent;
        while let Some(ancestor) = parent {
            let ancestor_node = self.node(ancestor);
            if ancestor_node.left != Some(child) {
                break;
            }
            child = ancestor;
            parent = ancestor_node.parent;
        }
        parent
    }

    pub(crate) fn first(&self) -> Link {
        self.root().map(|root| self.minimum(root))
    }

    pub(crate) fn last(&self) -> Link {
        self.root().map(|root| self.maximum(root))
    }

    /// A cursor at `link`, tagged as belonging to this tree.
    pub(crate) fn cursor(&self, link: Link) -> Cursor {
        Cursor {
            at: link.map(|id| (self.id(), id)),
        }
    }

    /// The live node `cursor` names in this tree.
    pub(crate) fn resolve(&self, cursor: Cursor) -> Result<NodeId> {
        let (tree, id) = cursor.at.ok_or(Error::OutOfBounds)?;
        if tree != self.id() || self.get(id).is_none() {
            return Err(Error::StaleCursor);
        }
        Ok(id)
    }

    pub(crate) fn begin(&self) -> Cursor {
        self.cursor(self.first())
    }

    pub(crate) fn next(&self, cursor: Cursor) -> Cursor {
        match self.resolve(cursor) {
            Ok(id) => self.cursor(self.successor(id)),
            Err(Error::OutOfBounds) => self.begin(),
            Err(Error::StaleCursor) => Cursor::END,
        }
    }

    pub(crate) fn prev(&self, cursor: Cursor) -> Cursor {
        match self.resolve(cursor) {
            Ok(id) => self.cursor(self.predecessor(id)),
            Err(Error::OutOfBounds) => self.cursor(self.last()),
            Err(Error::StaleCursor) => Cursor::END,
        }
    }

    pub(crate) fn key_at(&self, cursor: Cursor) -> Result<&K> {
        self.resolve(cursor).map(|id| &self.node(id).key)
    }

    /// Counts elements by walking from the first to the last.
    pub(crate) fn len(&self) -> usize {
        self.iter().count()
    }

    pub(crate) fn iter(&self) -> Iter<'_, K> {
        Iter {
            tree: self,
            front: self.first(),
            back: self.last(),
        }
    }
}

/// An iterator over the keys of a container in sorted order.
///
/// Created by `iter` on [`Set`][crate::Set] and [`Multiset`][crate::Multiset]. Each step follows
/// parent links, so it needs no allocation.
pub struct Iter<'a, K> {
    tree: &'a Tree<K>,
    front: Link,
    back: Link,
}

impl<K> Clone for Iter<'_, K> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            front: self.front,
            back: self.back,
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.front?;
        if self.front == self.back {
            self.front = None;
            self.back = None;
        } else {
            self.front = self.tree.successor(id);
        }
        Some(&self.tree.node(id).key)
    }
}

impl<K> DoubleEndedIterator for Iter<'_, K> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let id = self.back?;
        if self.front == self.back {
            self.front = None;
            self.back = None;
        } else {
            self.back = self.tree.predecessor(id);
        }
        Some(&self.tree.node(id).key)
    }
}

impl<K> FusedIterator for Iter<'_, K> {}

/// An owning iterator over the keys of a container in sorted order.
///
/// Each step unlinks the smallest remaining node, so the keys are moved out rather than cloned.
pub struct IntoIter<K> {
    tree: Tree<K>,
    next: Link,
}

impl<K> IntoIter<K> {
    pub(crate) fn new(tree: Tree<K>) -> Self {
        let next = tree.first();
        Self { tree, next }
    }
}

impl<K> Iterator for IntoIter<K> {
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let (key, next) = self.tree.remove_and_advance(id);
        self.next = next;
        Some(key)
    }
}

impl<K> FusedIterator for IntoIter<K> {}
