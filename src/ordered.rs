//! A common interface over [`Set`] and [`Multiset`] for code that only needs to insert, erase,
//! find and walk keys.
//!
//! # Examples
//!
//! ```
//! use ordtree::{Multiset, OrderedContainer, Set};
//!
//! fn sorted_keys<C: OrderedContainer<Key = i32>>(container: &C) -> Vec<i32> {
//!     let mut keys = Vec::new();
//!     let mut cursor = container.begin();
//!     while let Ok(key) = container.get(cursor) {
//!         keys.push(*key);
//!         cursor = container.next(cursor);
//!     }
//!     keys
//! }
//!
//! assert_eq!(sorted_keys(&Set::from([2, 1, 2])), [1, 2]);
//! assert_eq!(sorted_keys(&Multiset::from([2, 1, 2])), [1, 2, 2]);
//! ```

use crate::cursor::Cursor;
use crate::error::Result;
use crate::{Multiset, Set};

/// Operations shared by every ordered container in this crate.
pub trait OrderedContainer {
    /// The type of the stored keys.
    type Key: Ord;

    /// A cursor at the smallest key, or the end position if empty.
    fn begin(&self) -> Cursor;

    /// The position one past the largest key.
    fn end(&self) -> Cursor;

    /// The cursor after `cursor` in sorted order.
    fn next(&self, cursor: Cursor) -> Cursor;

    /// The cursor before `cursor` in sorted order.
    fn prev(&self, cursor: Cursor) -> Cursor;

    /// The key under `cursor`.
    fn get(&self, cursor: Cursor) -> Result<&Self::Key>;

    /// Inserts `key`, returning a cursor to it and whether it was inserted. A container that
    /// refuses the key returns the end position and `false`.
    fn insert(&mut self, key: Self::Key) -> (Cursor, bool);

    /// Removes the key under `cursor`, returning it.
    fn erase(&mut self, cursor: Cursor) -> Option<Self::Key>;

    /// A cursor to `key`, or the end position.
    fn find(&self, key: &Self::Key) -> Cursor;

    /// Whether `key` is present.
    fn contains(&self, key: &Self::Key) -> bool {
        !self.find(key).is_end()
    }

    /// Removes every key.
    fn clear(&mut self);

    /// Counts the keys by walking them.
    fn len(&self) -> usize;

    /// Whether there are no keys.
    fn is_empty(&self) -> bool;
}

impl<K: Ord> OrderedContainer for Set<K> {
    type Key = K;

    fn begin(&self) -> Cursor {
        Set::begin(self)
    }

    fn end(&self) -> Cursor {
        Set::end(self)
    }

    fn next(&self, cursor: Cursor) -> Cursor {
        Set::next(self, cursor)
    }

    fn prev(&self, cursor: Cursor) -> Cursor {
        Set::prev(self, cursor)
    }

    fn get(&self, cursor: Cursor) -> Result<&K> {
        Set::get(self, cursor)
    }

    fn insert(&mut self, key: K) -> (Cursor, bool) {
        Set::insert(self, key)
    }

    fn erase(&mut self, cursor: Cursor) -> Option<K> {
        Set::erase(self, cursor)
    }

    fn find(&self, key: &K) -> Cursor {
        Set::find(self, key)
    }

    fn clear(&mut self) {
        Set::clear(self)
    }

    fn len(&self) -> usize {
        Set::len(self)
    }

    fn is_empty(&self) -> bool {
        Set::is_empty(self)
    }
}

impl<K: Ord> OrderedContainer for Multiset<K> {
    type Key = K;

    fn begin(&self) -> Cursor {
        Multiset::begin(self)
    }

    fn end(&self) -> Cursor {
        Multiset::end(self)
    }

    fn next(&self, cursor: Cursor) -> Cursor {
        Multiset::next(self, cursor)
    }

    fn prev(&self, cursor: Cursor) -> Cursor {
        Multiset::prev(self, cursor)
    }

    fn get(&self, cursor: Cursor) -> Result<&K> {
        Multiset::get(self, cursor)
    }

    fn insert(&mut self, key: K) -> (Cursor, bool) {
        (Multiset::insert(self, key), true)
    }

    fn erase(&mut self, cursor: Cursor) -> Option<K> {
        Multiset::erase(self, cursor)
    }

    fn find(&self, key: &K) -> Cursor {
        Multiset::find(self, key)
    }

    fn clear(&mut self) {
        Multiset::clear(self)
    }

    fn len(&self) -> usize {
        Multiset::len(self)
    }

    fn is_empty(&self) -> bool {
        Multiset::is_empty(self)
    }
}
