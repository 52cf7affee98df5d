//! An ordered set of unique keys on top of the unbalanced tree.
//!
//! # Examples
//!
//! ```
//! use ordtree::Set;
//!
//! let mut set = Set::new();
//!
//! // Nothing in here yet.
//! assert!(set.is_empty());
//! assert_eq!(set.find(&1), set.end());
//!
//! let (cursor, inserted) = set.insert(1);
//! assert!(inserted);
//! assert_eq!(set.get(cursor), Ok(&1));
//!
//! // Inserting the same key again is refused and reports the end position.
//! assert_eq!(set.insert(1), (set.end(), false));
//! assert_eq!(set.len(), 1);
//!
//! // Erasing through a cursor hands the key back.
//! let cursor = set.find(&1);
//! assert_eq!(set.erase(cursor), Some(1));
//! assert!(!set.contains(&1));
//! ```

use std::borrow::Borrow;
use std::fmt;
use std::mem;

use tracing::{debug, trace};

use crate::cursor::{Cursor, IntoIter, Iter};
use crate::error::Result;
use crate::tree::Tree;

/// An ordered set of unique keys. See the [module documentation][crate::set] for an example.
///
/// Nothing is cached: [`Set::len`] walks every element.
pub struct Set<K> {
    tree: Tree<K>,
}

impl<K> Default for Set<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Set<K> {
    /// Generates a new, empty `Set`.
    pub fn new() -> Self {
        Self { tree: Tree::new() }
    }

    /// A cursor at the smallest key, or [`Set::end`] if the set is empty.
    pub fn begin(&self) -> Cursor {
        self.tree.begin()
    }

    /// The position one past the largest key.
    pub fn end(&self) -> Cursor {
        Cursor::END
    }

    /// The cursor after `cursor` in sorted order. Stepping from the end position wraps to
    /// [`Set::begin`].
    pub fn next(&self, cursor: Cursor) -> Cursor {
        self.tree.next(cursor)
    }

    /// The cursor before `cursor` in sorted order. Stepping back from the end position lands on
    /// the largest key.
    pub fn prev(&self, cursor: Cursor) -> Cursor {
        self.tree.prev(cursor)
    }

    /// The key under `cursor`.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfBounds`][crate::Error::OutOfBounds] for the end position and
    /// [`Error::StaleCursor`][crate::Error::StaleCursor] if the key has been erased.
    pub fn get(&self, cursor: Cursor) -> Result<&K> {
        self.tree.key_at(cursor)
    }

    /// Iterates over the keys in ascending order.
    pub fn iter(&self) -> Iter<'_, K> {
        self.tree.iter()
    }

    /// The smallest key.
    pub fn first(&self) -> Option<&K> {
        self.tree.first().map(|id| &self.tree.node(id).key)
    }

    /// The largest key.
    pub fn last(&self) -> Option<&K> {
        self.tree.last().map(|id| &self.tree.node(id).key)
    }

    /// Whether the set holds no keys.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Counts the keys. This walks the whole set, so it is `O(n)`.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// The most keys a set of this key type could ever hold. This is a fixed bound, not a measure
    /// of available memory.
    pub fn max_size(&self) -> usize {
        Tree::<K>::max_size()
    }

    /// Removes every key.
    pub fn clear(&mut self) {
        let destroyed = self.tree.clear();
        debug!(destroyed, "cleared set");
    }

    /// Removes the key under `cursor` and returns it. Erasing the end position, a cursor whose key
    /// is already gone, or one from another set does nothing.
    ///
    /// Cursors to other keys stay valid, except that a cursor to the erased key's successor may
    /// go stale when the erased node had two children.
    pub fn erase(&mut self, cursor: Cursor) -> Option<K> {
        let id = self.tree.resolve(cursor).ok()?;
        trace!("erasing key from set");
        Some(self.tree.remove(id))
    }

    /// Exchanges the contents of two sets without moving any keys.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.tree, &mut other.tree);
        debug!("swapped sets");
    }

    /// Keeps only the keys for which `keep` returns `true`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::Set;
    ///
    /// let mut set: Set<_> = (0..10).collect();
    /// set.retain(|key| key % 3 == 0);
    /// assert!(set.iter().eq(&[0, 3, 6, 9]));
    /// ```
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&K) -> bool,
    {
        let mut link = self.tree.first();
        while let Some(id) = link {
            if keep(&self.tree.node(id).key) {
                link = self.tree.successor(id);
            } else {
                let (_, next) = self.tree.remove_and_advance(id);
                link = next;
            }
        }
    }
}

impl<K: Ord> Set<K> {
    /// Inserts `key` unless an equal key is already present.
    ///
    /// Returns a cursor to the new key and `true`, or [`Set::end`] and `false` if the key was
    /// already there (in which case `key` is dropped).
    pub fn insert(&mut self, key: K) -> (Cursor, bool) {
        if self.tree.find(&key).is_some() {
            return (self.end(), false);
        }
        let id = self.tree.insert(key);
        (self.tree.cursor(Some(id)), true)
    }

    /// Inserts each key in turn, reporting for each one what [`Set::insert`] did.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::Set;
    ///
    /// let mut set = Set::from([2]);
    /// let inserted: Vec<_> = set.emplace([1, 2, 3]).into_iter().map(|(_, new)| new).collect();
    ///
    /// assert_eq!(inserted, [true, false, true]);
    /// assert!(set.emplace([]).is_empty());
    /// ```
    pub fn emplace<I>(&mut self, keys: I) -> Vec<(Cursor, bool)>
    where
        I: IntoIterator<Item = K>,
    {
        keys.into_iter().map(|key| self.insert(key)).collect()
    }

    /// Moves every key of `other` into `self`, leaving `other` empty. Keys already in `self` are
    /// dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::Set;
    ///
    /// let mut a = Set::from([1, 3, 5]);
    /// let mut b = Set::from([3, 4]);
    /// a.merge(&mut b);
    ///
    /// assert!(b.is_empty());
    /// assert!(a.iter().eq(&[1, 3, 4, 5]));
    /// ```
    pub fn merge(&mut self, other: &mut Self) {
        let mut moved = 0usize;
        let mut dropped = 0usize;
        for key in mem::take(other) {
            if self.insert(key).1 {
                moved += 1;
            } else {
                dropped += 1;
            }
        }
        debug!(moved, dropped, "merged sets");
    }

    /// A cursor to `key`, or [`Set::end`] if it isn't present.
    pub fn find<Q>(&self, key: &Q) -> Cursor
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.cursor(self.tree.find(key))
    }

    /// Whether `key` is present.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.find(key).is_some()
    }

    /// Removes `key` and returns it, or does nothing if it isn't present.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let removed = self.tree.delete(key);
        if removed.is_some() {
            trace!("removed key from set");
        }
        removed
    }
}

/// Copies by re-inserting the keys in pre-order, so the copy has the same shape as the original.
impl<K: Ord + Clone> Clone for Set<K> {
    fn clone(&self) -> Self {
        self.tree.preorder().cloned().collect()
    }
}

impl<K: fmt::Debug> fmt::Debug for Set<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K: PartialEq> PartialEq for Set<K> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl<K: Eq> Eq for Set<K> {}

impl<K: Ord> FromIterator<K> for Set<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<K: Ord> Extend<K> for Set<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Ord, const N: usize> From<[K; N]> for Set<K> {
    fn from(keys: [K; N]) -> Self {
        keys.into_iter().collect()
    }
}

impl<'a, K> IntoIterator for &'a Set<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K> IntoIterator for Set<K> {
    type Item = K;
    type IntoIter = IntoIter<K>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.tree)
    }
}
