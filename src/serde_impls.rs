//! `serde` support, behind the `serde` feature.
//!
//! Both containers serialize as a plain sequence of keys in ascending order. Deserializing a
//! [`Set`] drops repeated keys; a [`Multiset`] keeps them.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{Deserialize, Deserializer, SeqAccess, Visitor};
use serde::ser::{Serialize, Serializer};

use crate::{Multiset, Set};

impl<K: Serialize> Serialize for Set<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self)
    }
}

impl<K: Serialize> Serialize for Multiset<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self)
    }
}

/// Builds any container that can be extended one key at a time.
struct KeysVisitor<C, K> {
    marker: PhantomData<fn() -> (C, K)>,
}

impl<C, K> KeysVisitor<C, K> {
    fn new() -> Self {
        Self {
            marker: PhantomData,
        }
    }
}

impl<'de, C, K> Visitor<'de> for KeysVisitor<C, K>
where
    C: Default + Extend<K>,
    K: Deserialize<'de>,
{
    type Value = C;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a sequence of keys")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<C, A::Error> {
        let mut container = C::default();
        while let Some(key) = seq.next_element()? {
            container.extend(Some(key));
        }
        Ok(container)
    }
}

impl<'de, K: Ord + Deserialize<'de>> Deserialize<'de> for Set<K> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(KeysVisitor::<Self, K>::new())
    }
}

impl<'de, K: Ord + Deserialize<'de>> Deserialize<'de> for Multiset<K> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(KeysVisitor::<Self, K>::new())
    }
}
