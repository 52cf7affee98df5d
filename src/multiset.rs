//! An ordered collection that keeps every copy of equal keys.
//!
//! It shares its tree and traversal with [`Set`][crate::Set]; the only difference is that
//! inserting never checks for an existing key. Equal keys end up next to each other in sorted
//! order, in the order they were inserted.
//!
//! # Examples
//!
//! ```
//! use ordtree::Multiset;
//!
//! let mut multiset = Multiset::from([1, 2, 2, 3]);
//! multiset.insert(2);
//!
//! assert_eq!(multiset.len(), 5);
//! assert_eq!(multiset.count(&2), 3);
//!
//! // `lower_bound` is the first 2, `upper_bound` the first key after the 2s.
//! let (lower, upper) = multiset.equal_range(&2);
//! assert_eq!(multiset.get(lower), Ok(&2));
//! assert_eq!(multiset.get(upper), Ok(&3));
//!
//! // Nothing is greater than 3.
//! assert_eq!(multiset.upper_bound(&3), multiset.end());
//! ```

use std::borrow::Borrow;
use std::fmt;
use std::mem;

use tracing::{debug, trace};

use crate::cursor::{Cursor, IntoIter, Iter};
use crate::error::Result;
use crate::tree::{Link, Tree};

/// An ordered collection of keys that may repeat. See the [module
/// documentation][crate::multiset] for an example.
pub struct Multiset<K> {
    tree: Tree<K>,
}

impl<K> Default for Multiset<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Multiset<K> {
    /// Generates a new, empty `Multiset`.
    pub fn new() -> Self {
        Self { tree: Tree::new() }
    }

    /// A cursor at the smallest key, or [`Multiset::end`] if the multiset is empty.
    pub fn begin(&self) -> Cursor {
        self.tree.begin()
    }

    /// The position one past the largest key.
    pub fn end(&self) -> Cursor {
        Cursor::END
    }

    /// The cursor after `cursor` in sorted order. Stepping from the end position wraps to
    /// [`Multiset::begin`].
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

    /// Iterates over the keys in ascending order, repeats included.
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

    /// Whether the multiset holds no keys.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Counts the keys, repeats included. This walks the whole multiset, so it is `O(n)`.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// The most keys a multiset of this key type could ever hold.
    pub fn max_size(&self) -> usize {
        Tree::<K>::max_size()
    }

    /// Removes every key.
    pub fn clear(&mut self) {
        let destroyed = self.tree.clear();
        debug!(destroyed, "cleared multiset");
    }

    /// Removes exactly the element under `cursor` (not any other copy of its key) and returns
    /// it. Erasing the end position, a cursor whose element is already gone, or one from another
    /// multiset does nothing.
    pub fn erase(&mut self, cursor: Cursor) -> Option<K> {
        let id = self.tree.resolve(cursor).ok()?;
        trace!("erasing key from multiset");
        Some(self.tree.remove(id))
    }

    /// Exchanges the contents of two multisets without moving any keys.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.tree, &mut other.tree);
        debug!("swapped multisets");
    }

    /// Keeps only the keys for which `keep` returns `true`.
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

impl<K: Ord> Multiset<K> {
    /// Inserts `key`, even if equal keys are already present. Returns a cursor to the new
    /// element, which comes after every existing copy in sorted order.
    pub fn insert(&mut self, key: K) -> Cursor {
        let id = self.tree.insert(key);
        self.tree.cursor(Some(id))
    }

    /// Inserts each key in turn. Every report is `(cursor, true)` since insertion can't be
    /// refused.
    pub fn emplace<I>(&mut self, keys: I) -> Vec<(Cursor, bool)>
    where
        I: IntoIterator<Item = K>,
    {
        keys.into_iter().map(|key| (self.insert(key), true)).collect()
    }

    /// Moves every key of `other` into `self`, leaving `other` empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::Multiset;
    ///
    /// let mut a = Multiset::from([1, 3]);
    /// let mut b = Multiset::from([3, 3]);
    /// a.merge(&mut b);
    ///
    /// assert!(b.is_empty());
    /// assert_eq!(a.count(&3), 3);
    /// ```
    pub fn merge(&mut self, other: &mut Self) {
        let mut moved = 0usize;
        for key in mem::take(other) {
            self.insert(key);
            moved += 1;
        }
        debug!(moved, "merged multisets");
    }

    /// A cursor to the first copy of `key`, or [`Multiset::end`] if there is none.
    pub fn find<Q>(&self, key: &Q) -> Cursor
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.cursor(self.tree.find(key))
    }

    /// Whether at least one copy of `key` is present.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.find(key).is_some()
    }

    /// How many copies of `key` are present.
    pub fn count<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.skip_equal(self.tree.find(key), key).1
    }

    /// A cursor to the first key not less than `key`, or [`Multiset::end`] if every key is
    /// smaller.
    pub fn lower_bound<Q>(&self, key: &Q) -> Cursor
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.cursor(self.tree.lower_bound(key))
    }

    /// A cursor to the first key greater than `key`, or [`Multiset::end`] if there is none.
    pub fn upper_bound<Q>(&self, key: &Q) -> Cursor
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.cursor(self.skip_equal(self.tree.lower_bound(key), key).0)
    }

    /// [`Multiset::lower_bound`] and [`Multiset::upper_bound`] together. Walking from the first to
    /// the second visits exactly the copies of `key`.
    pub fn equal_range<Q>(&self, key: &Q) -> (Cursor, Cursor)
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let lower = self.tree.lower_bound(key);
        let (upper, _) = self.skip_equal(lower, key);
        (self.tree.cursor(lower), self.tree.cursor(upper))
    }

    /// Removes one copy of `key` and returns it, or does nothing if there is none.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let removed = self.tree.delete(key);
        if removed.is_some() {
            trace!("removed key from multiset");
        }
        removed
    }

    /// Steps forward from `link` past every key equal to `key`. Returns where it stopped and how
    /// many steps it took.
    fn skip_equal<Q>(&self, mut link: Link, key: &Q) -> (Link, usize)
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut skipped = 0;
        while let Some(id) = link {
            let node_key: &Q = self.tree.node(id).key.borrow();
            if node_key != key {
                break;
            }
            skipped += 1;
            link = self.tree.successor(id);
        }
        (link, skipped)
    }
}

/// Copies by re-inserting the keys in pre-order, so the copy has the same shape as the original.
impl<K: Ord + Clone> Clone for Multiset<K> {
    fn clone(&self) -> Self {
        self.tree.preorder().cloned().collect()
    }
}

impl<K: fmt::Debug> fmt::Debug for Multiset<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K: PartialEq> PartialEq for Multiset<K> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl<K: Eq> Eq for Multiset<K> {}

impl<K: Ord> FromIterator<K> for Multiset<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut multiset = Self::new();
        multiset.extend(iter);
        multiset
    }
}

impl<K: Ord> Extend<K> for Multiset<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Ord, const N: usize> From<[K; N]> for Multiset<K> {
    fn from(keys: [K; N]) -> Self {
        keys.into_iter().collect()
    }
}

impl<'a, K> IntoIterator for &'a Multiset<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K> IntoIterator for Multiset<K> {
    type Item = K;
    type IntoIter = IntoIter<K>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    const KEYS: [i32; 18] = [1, 1, 1, 2, 2, 2, 3, 3, 5, 6, -1, -1, 6, 7, 9, 22, 0, -3];

    fn keys(multiset: &Multiset<i32>) -> Vec<i32> {
        multiset.iter().copied().collect()
    }

    fn sorted(keys: &[i32]) -> Vec<i32> {
        let mut keys = keys.to_vec();
        keys.sort();
        keys
    }

    #[test]
    fn duplicates_are_kept() {
        let multiset = Multiset::from([1, 1, 2, 2, 3, 3]);
        assert_eq!(multiset.len(), 6);
        assert_eq!(keys(&multiset), [1, 1, 2, 2, 3, 3]);
        multiset.tree.assert_invariants();
    }

    #[test]
    fn insert_one_by_one() {
        let mut multiset = Multiset::new();
        for key in [1, 1, 2, 3, 3] {
            let cursor = multiset.insert(key);
            assert_eq!(multiset.get(cursor), Ok(&key));
        }
        assert_eq!(keys(&multiset), [1, 1, 2, 3, 3]);
    }

    #[test]
    fn from_unsorted_list() {
        let multiset = Multiset::from(KEYS);
        assert_eq!(keys(&multiset), sorted(&KEYS));
        assert_eq!(multiset.len(), KEYS.len());
        multiset.tree.assert_invariants();
    }

    #[test]
    fn insert_lands_after_existing_copies() {
        let mut multiset = Multiset::from([2, 1, 3]);
        let first_two = multiset.find(&2);
        let second_two = multiset.insert(2);

        assert_ne!(first_two, second_two);
        assert_eq!(multiset.next(first_two), second_two);
        assert_eq!(multiset.get(multiset.next(second_two)), Ok(&3));
    }

    #[test]
    fn bounds() {
        let multiset = Multiset::from([1, 2, 2, 3]);
        let lower = multiset.lower_bound(&2);

        assert_eq!(multiset.get(lower), Ok(&2));
        assert_eq!(lower, multiset.find(&2));
        assert_eq!(multiset.get(multiset.next(lower)), Ok(&2));

        assert_eq!(multiset.get(multiset.upper_bound(&2)), Ok(&3));
        assert_eq!(multiset.upper_bound(&3), multiset.end());
    }

    #[test]
    fn bounds_for_missing_keys() {
        let multiset = Multiset::from([10, 20, 20, 30]);

        assert_eq!(multiset.lower_bound(&5), multiset.begin());
        assert_eq!(multiset.upper_bound(&5), multiset.begin());
        assert_eq!(multiset.get(multiset.lower_bound(&15)), Ok(&20));
        assert_eq!(multiset.get(multiset.upper_bound(&25)), Ok(&30));
        assert_eq!(multiset.lower_bound(&35), multiset.end());
        assert_eq!(multiset.upper_bound(&35), multiset.end());

        let empty = Multiset::<i32>::new();
        assert_eq!(empty.lower_bound(&1), empty.end());
        assert_eq!(empty.upper_bound(&1), empty.end());
    }

    #[test]
    fn equal_range_walks_copies() {
        let multiset = Multiset::from(KEYS);
        let (mut cursor, upper) = multiset.equal_range(&2);

        let mut copies = 0;
        while cursor != upper {
            assert_eq!(multiset.get(cursor), Ok(&2));
            copies += 1;
            cursor = multiset.next(cursor);
        }
        assert_eq!(copies, 3);

        let (lower, upper) = multiset.equal_range(&4);
        assert_eq!(lower, upper);
        assert_eq!(multiset.get(lower), Ok(&5));
    }

    #[test]
    fn count() {
        let multiset = Multiset::from(KEYS);
        assert_eq!(multiset.count(&1), 3);
        assert_eq!(multiset.count(&-1), 2);
        assert_eq!(multiset.count(&22), 1);
        assert_eq!(multiset.count(&4), 0);
        assert_eq!(Multiset::<i32>::new().count(&4), 0);
    }

    #[test]
    fn erase_removes_that_copy() {
        let mut multiset = Multiset::from(KEYS);
        let second = multiset.next(multiset.begin());

        assert_eq!(multiset.erase(second), Some(-1));
        assert_eq!(multiset.count(&-1), 1);

        let mut expected = sorted(&KEYS);
        expected.remove(1);
        assert_eq!(keys(&multiset), expected);
        multiset.tree.assert_invariants();
    }

    #[test]
    fn erase_stale_cursor() {
        let mut multiset = Multiset::from([4, 4]);
        let cursor = multiset.insert(4);

        assert_eq!(multiset.erase(cursor), Some(4));
        assert_eq!(multiset.erase(cursor), None);
        assert_eq!(multiset.get(cursor), Err(Error::StaleCursor));
        assert_eq!(multiset.count(&4), 2);
    }

    #[test]
    fn remove_one_copy() {
        let mut multiset = Multiset::from([4, 4, 4]);
        assert_eq!(multiset.remove(&4), Some(4));
        assert_eq!(multiset.count(&4), 2);
        multiset.tree.assert_invariants();
    }

    #[test]
    fn clear() {
        let mut multiset = Multiset::from(KEYS);
        multiset.clear();
        assert!(multiset.is_empty());
        assert_eq!(multiset.get(multiset.begin()), Err(Error::OutOfBounds));
        multiset.tree.assert_invariants();
    }

    #[test]
    fn take_empties_source() {
        let mut a = Multiset::from(KEYS);
        let b = mem::take(&mut a);

        assert!(a.is_empty());
        assert_eq!(keys(&b), sorted(&KEYS));
    }

    #[test]
    fn clone_keeps_shape() {
        let a = Multiset::from(KEYS);
        let b = a.clone();

        assert_eq!(a, b);
        assert!(a.tree.preorder().eq(b.tree.preorder()));
        b.tree.assert_invariants();
    }

    #[test]
    fn merge_keeps_multiplicities() {
        let mut a = Multiset::from([1, 2, 2]);
        let mut b = Multiset::from([2, 3, 1]);

        a.merge(&mut b);
        assert!(b.is_empty());
        assert_eq!(keys(&a), [1, 1, 2, 2, 2, 3]);
        a.tree.assert_invariants();
    }

    #[test]
    fn swap() {
        let mut a = Multiset::from(KEYS);
        let mut b = Multiset::from([7]);

        a.swap(&mut b);
        assert_eq!(keys(&a), [7]);
        assert_eq!(b.len(), KEYS.len());
    }

    #[test]
    fn cursor_from_another_multiset_is_stale() {
        let mut a = Multiset::from([1, 1, 2]);
        let b = Multiset::from([1, 1, 2]);
        let foreign = b.lower_bound(&1);

        assert_eq!(a.get(foreign), Err(Error::StaleCursor));
        assert_eq!(a.next(foreign), a.end());
        assert_eq!(a.erase(foreign), None);

        assert_eq!(keys(&a), [1, 1, 2]);
        assert_eq!(b.get(foreign), Ok(&1));
        a.tree.assert_invariants();
    }

    #[test]
    fn emplace_always_inserts() {
        let mut multiset = Multiset::new();
        let reports = multiset.emplace([3, 3, 1]);

        assert_eq!(reports.len(), 3);
        assert!(reports.iter().all(|(_, inserted)| *inserted));
        assert_eq!(multiset.get(reports[2].0), Ok(&1));
        assert_eq!(keys(&multiset), [1, 3, 3]);
    }

    #[test]
    fn retain_drops_all_copies() {
        let mut multiset = Multiset::from(KEYS);
        multiset.retain(|key| *key != 1 && *key != 6);

        let expected: Vec<_> = sorted(&KEYS)
            .into_iter()
            .filter(|key| *key != 1 && *key != 6)
            .collect();
        assert_eq!(keys(&multiset), expected);
        multiset.tree.assert_invariants();
    }

    #[test]
    fn max_size_matches_set() {
        assert_eq!(
            Multiset::<i32>::new().max_size(),
            crate::Set::<i32>::new().max_size()
        );
    }
}
