//! The unbalanced binary search tree shared by [`Set`][crate::Set] and
//! [`Multiset`][crate::Multiset].
//!
//! Nodes live in an arena owned by the [`Tree`] and refer to each other with [`NodeId`]s instead
//! of pointers. Every node knows its parent, which is what lets a cursor walk to its successor or
//! predecessor without a stack (see [`crate::cursor`]). The parent link is only ever used for
//! navigation - a node is owned by the arena slot it lives in, never by its parent.
//!
//! Keys that compare equal to a node's key are always routed into its right subtree. The tree
//! itself never rejects a duplicate; a [`Set`][crate::Set] simply checks with [`Tree::find`]
//! before inserting.
//!
//! Nothing here rebalances. Inserting keys in sorted order produces a linked list and every
//! operation degrades to `O(n)`. All the algorithms are iterative so a degenerate tree can't
//! overflow the call stack.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::mem;
use std::sync::atomic::{self, AtomicU64};

use slotmap::{new_key_type, SlotMap};

/// An optional reference to a node. `None` is an empty subtree (or the lack of a parent).
pub(crate) type Link = Option<NodeId>;

new_key_type! {
    /// A handle to a node in a [`Tree`]'s arena. A handle to a removed node never resolves to
    /// whatever node reuses its slot later.
    pub(crate) struct NodeId;
}

/// Identifies one [`Tree`]. Handles from two different arenas can look alike, so anything that
/// outlives a borrow of the tree (a cursor) carries this alongside the [`NodeId`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct TreeId(u64);

impl TreeId {
    fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, atomic::Ordering::Relaxed))
    }
}

pub(crate) struct Node<K> {
    pub(crate) key: K,
    pub(crate) left: Link,
    pub(crate) right: Link,
    pub(crate) parent: Link,
}

impl<K> Node<K> {
    fn new(key: K, parent: Link) -> Self {
        Self {
            key,
            left: None,
            right: None,
            parent,
        }
    }
}

/// The tree engine. Holds the arena and the root link; an empty tree has no root.
///
/// There is deliberately no length counter here. Containers count by walking the tree.
pub(crate) struct Tree<K> {
    id: TreeId,
    nodes: SlotMap<NodeId, Node<K>>,
    root: Link,
}

impl<K> Default for Tree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Tree<K> {
    /// Generates a new, empty `Tree` with an identity no other tree shares.
    pub(crate) fn new() -> Self {
        Self {
            id: TreeId::fresh(),
            nodes: SlotMap::with_key(),
            root: None,
        }
    }

    pub(crate) fn id(&self) -> TreeId {
        self.id
    }

    pub(crate) fn root(&self) -> Link {
        self.root
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The largest number of nodes an arena of this key type could ever address. Bounded both by
    /// memory and by the 32-bit slot index of the arena.
    pub(crate) fn max_size() -> usize {
        let by_memory = isize::MAX as usize / mem::size_of::<Node<K>>().max(1);
        by_memory.min(u32::MAX as usize - 1)
    }

    /// Resolves a handle, returning `None` if its node has been freed.
    pub(crate) fn get(&self, id: NodeId) -> Option<&Node<K>> {
        self.nodes.get(id)
    }

    /// Resolves a handle taken from a link inside this tree.
    ///
    /// ## Panics
    ///
    /// If the handle is stale. Links stored in live nodes are never stale, so this only fires on
    /// an engine bug.
    pub(crate) fn node(&self, id: NodeId) -> &Node<K> {
        self.nodes
            .get(id)
            .expect("Tree links always point at live nodes")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<K> {
        self.nodes
            .get_mut(id)
            .expect("Tree links always point at live nodes")
    }

    /// Frees the node behind `id` and hands back its key. The caller must already have unlinked
    /// the node from its parent and children.
    fn release(&mut self, id: NodeId) -> K {
        self.nodes
            .remove(id)
            .expect("Released a node that was already freed")
            .key
    }

    /// Points whichever child link of `parent` referenced `old` at `new` instead. With no parent,
    /// `old` was the root.
    fn replace_child(&mut self, parent: Link, old: NodeId, new: Link) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let parent = self.node_mut(parent);
                if parent.left == Some(old) {
                    parent.left = new;
                } else {
                    parent.right = new;
                }
            }
        }
    }

    /// Adds a new leaf holding `key`. Keys equal to an existing key go to its right.
    pub(crate) fn insert(&mut self, key: K) -> NodeId
    where
        K: Ord,
    {
        let Some(mut current) = self.root else {
            let id = self.nodes.insert(Node::new(key, None));
            self.root = Some(id);
            return id;
        };

        let goes_left = loop {
            let node = self.node(current);
            let goes_left = key.cmp(&node.key) == Ordering::Less;
            match if goes_left { node.left } else { node.right } {
                Some(child) => current = child,
                None => break goes_left,
            }
        };

        let id = self.nodes.insert(Node::new(key, Some(current)));
        let parent = self.node_mut(current);
        if goes_left {
            parent.left = Some(id);
        } else {
            parent.right = Some(id);
        }

        if cfg!(debug_assertions) {
            let parent = self.node(current);
            let child = self.node(id);
            assert_eq!(child.parent, Some(current));
            if parent.left == Some(id) {
                assert!(child.key < parent.key);
            } else {
                assert_eq!(parent.right, Some(id));
                assert!(child.key >= parent.key);
            }
        }

        id
    }

    /// Finds a node whose key equals `key`. With duplicates this is the one closest to the root,
    /// which is also the first of them in sorted order.
    pub(crate) fn find<Q>(&self, key: &Q) -> Link
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut link = self.root;
        while let Some(id) = link {
            let node = self.node(id);
            link = match key.cmp(node.key.borrow()) {
                Ordering::Less => node.left,
                Ordering::Equal => return Some(id),
                Ordering::Greater => node.right,
            };
        }
        None
    }

    /// Finds the first node in sorted order whose key is not less than `key`.
    pub(crate) fn lower_bound<Q>(&self, key: &Q) -> Link
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut link = self.root;
        let mut candidate = None;
        while let Some(id) = link {
            let node = self.node(id);
            let node_key: &Q = node.key.borrow();
            if node_key < key {
                link = node.right;
            } else {
                candidate = Some(id);
                link = node.left;
            }
        }
        candidate
    }

    /// Deletes a node holding `key` and returns the key it held. Does nothing if no node matches.
    pub(crate) fn delete<Q>(&mut self, key: &Q) -> Option<K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let id = self.find(key)?;
        Some(self.remove(id))
    }

    /// Unlinks the node `id` from the tree and returns its key.
    ///
    /// With two children the node isn't unlinked at all: it takes over the key of its in-order
    /// successor and the successor (which has no left child) is removed instead. So after this
    /// returns `id` either is stale or holds the next key in sorted order.
    pub(crate) fn remove(&mut self, id: NodeId) -> K {
        let node = self.node(id);
        let (left, right, parent) = (node.left, node.right, node.parent);

        match (left, right) {
            (None, None) => {
                self.replace_child(parent, id, None);
                self.release(id)
            }
            (Some(child), None) | (None, Some(child)) => {
                self.node_mut(child).parent = parent;
                self.replace_child(parent, id, Some(child));
                self.release(id)
            }
            (Some(_), Some(right)) => {
                let successor = self.minimum(right);
                let successor_key = self.remove(successor);
                mem::replace(&mut self.node_mut(id).key, successor_key)
            }
        }
    }

    /// Removes `id` and returns the node that now holds the next key in sorted order.
    pub(crate) fn remove_and_advance(&mut self, id: NodeId) -> (K, Link) {
        let node = self.node(id);
        if node.left.is_some() && node.right.is_some() {
            // The successor's key moves into `id`, so the walk resumes in place.
            (self.remove(id), Some(id))
        } else {
            let next = self.successor(id);
            (self.remove(id), next)
        }
    }

    /// The leftmost node of the subtree rooted at `id`.
    pub(crate) fn minimum(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.node(id).left {
            id = left;
        }
        id
    }

    /// The rightmost node of the subtree rooted at `id`.
    pub(crate) fn maximum(&self, mut id: NodeId) -> NodeId {
        while let Some(right) = self.node(id).right {
            id = right;
        }
        id
    }

    /// Like [`Tree::minimum`] but stops before stepping onto `excluded`.
    pub(crate) fn minimum_excluding(&self, mut id: NodeId, excluded: NodeId) -> NodeId {
        while let Some(left) = self.node(id).left.filter(|&left| left != excluded) {
            id = left;
        }
        id
    }

    /// Like [`Tree::maximum`] but stops before stepping onto `excluded`.
    pub(crate) fn maximum_excluding(&self, mut id: NodeId, excluded: NodeId) -> NodeId {
        while let Some(right) = self.node(id).right.filter(|&right| right != excluded) {
            id = right;
        }
        id
    }

    /// Frees every node in the subtree rooted at `link` and detaches it from its parent. Returns
    /// how many nodes were freed.
    pub(crate) fn destroy(&mut self, link: Link) -> usize {
        let Some(top) = link else {
            return 0;
        };
        let parent = self.node(top).parent;
        self.replace_child(parent, top, None);

        let mut pending = vec![top];
        let mut destroyed = 0;
        while let Some(id) = pending.pop() {
            let node = self.node(id);
            pending.extend(node.left);
            pending.extend(node.right);
            self.release(id);
            destroyed += 1;
        }
        destroyed
    }

    /// Frees every node.
    pub(crate) fn clear(&mut self) -> usize {
        self.destroy(self.root)
    }

    /// Keys in pre-order. Re-inserting them in this order rebuilds a tree of the same shape.
    pub(crate) fn preorder(&self) -> impl Iterator<Item = &K> + '_ {
        let mut pending: Vec<NodeId> = self.root.into_iter().collect();
        std::iter::from_fn(move || {
            let node = self.node(pending.pop()?);
            pending.extend(node.right);
            pending.extend(node.left);
            Some(&node.key)
        })
    }
}

#[cfg(test)]
impl<K: Ord> Tree<K> {
    /// Asserts the ordering invariant, that every parent link matches the child link pointing at
    /// it, and that no freed node is still reachable or live node unreachable.
    pub(crate) fn assert_invariants(&self) {
        let mut reachable = 0;
        if let Some(root) = self.root {
            assert_eq!(self.node(root).parent, None);
            reachable = self.assert_subtree(root, None, None);
        }
        assert_eq!(reachable, self.nodes.len());
    }

    fn assert_subtree(&self, id: NodeId, lower: Option<&K>, upper: Option<&K>) -> usize {
        let node = self.node(id);
        if let Some(lower) = lower {
            assert!(lower <= &node.key);
        }
        if let Some(upper) = upper {
            assert!(&node.key < upper);
        }

        let mut count = 1;
        if let Some(left) = node.left {
            assert_eq!(self.node(left).parent, Some(id));
            count += self.assert_subtree(left, lower, Some(&node.key));
        }
        if let Some(right) = node.right {
            assert_eq!(self.node(right).parent, Some(id));
            count += self.assert_subtree(right, Some(&node.key), upper);
        }
        count
    }

    fn keys(&self) -> Vec<&K> {
        let mut keys: Vec<_> = self.preorder().collect();
        keys.sort();
        keys
    }
}
