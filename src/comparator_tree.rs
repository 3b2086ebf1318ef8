//! A plain, unbalanced binary search tree ordered by a caller-supplied
//! comparison function.
//!
//! Unlike [`AvlTreeMap`](crate::AvlTreeMap), which orders keys by their
//! [`Ord`] implementation and keeps itself height-balanced, a
//! [`ComparatorTree`] takes its ordering as a value at construction time and
//! never restructures: each key is attached where its descent ends. Inserting
//! already-sorted keys therefore degrades it into a list.
//!
//! Nodes live in an arena and refer to each other by handle, so walking and
//! dropping even a fully degenerate tree needs neither recursion nor
//! per-node deallocation.

use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;
use core::iter::FusedIterator;

use crate::raw::{Arena, Handle};

mod capacity;

#[derive(Clone)]
struct TreeNode<K, V> {
    key: K,
    value: V,
    left: Option<Handle>,
    right: Option<Handle>,
}

/// An unbalanced binary search tree ordered by the comparator `C`.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use hbal_tree::ComparatorTree;
///
/// // Order strings by length, then alphabetically.
/// let mut tree = ComparatorTree::new(|a: &&str, b: &&str| a.len().cmp(&b.len()).then(a.cmp(b)));
/// tree.insert("pear", 3);
/// tree.insert("fig", 1);
/// tree.insert("banana", 2);
///
/// assert!(tree.contains(&"fig"));
/// assert_eq!(tree.get(&"pear"), Some(&3));
///
/// let mut seen = Vec::new();
/// tree.traverse(|key, _| seen.push(*key));
/// assert_eq!(seen, ["fig", "pear", "banana"]);
/// ```
pub struct ComparatorTree<K, V, C> {
    nodes: Arena<TreeNode<K, V>>,
    root: Option<Handle>,
    compare: C,
}

/// An in-order iterator over a [`ComparatorTree`].
///
/// This `struct` is created by the [`iter`](ComparatorTree::iter) method.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V> {
    nodes: &'a Arena<TreeNode<K, V>>,
    current: Option<Handle>,
    path: Vec<Handle>,
    remaining: usize,
}

impl<K, V, C> ComparatorTree<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    /// Makes a new, empty tree ordered by `compare`.
    ///
    /// `compare(a, b)` must define a total order: `Less` when `a` sorts
    /// before `b`, `Equal` when they denote the same key.
    #[must_use]
    pub fn new(compare: C) -> Self {
        ComparatorTree {
            nodes: Arena::new(),
            root: None,
            compare,
        }
    }

    /// Returns the handle of the node whose key compares equal to `key`.
    fn find_node(&self, key: &K) -> Option<Handle> {
        let mut link = self.root;
        while let Some(handle) = link {
            let node = self.nodes.get(handle);
            link = match (self.compare)(key, &node.key) {
                Ordering::Equal => return Some(handle),
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }
        None
    }

    /// Inserts `value` under `key`.
    ///
    /// If an equal key is already present its value is replaced and the old
    /// value returned; the stored key is kept.
    ///
    /// # Panics
    ///
    /// Panics if the tree already holds the maximum number of nodes a handle
    /// can address.
    ///
    /// # Complexity
    ///
    /// O(depth), which is O(n) in the worst case.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let mut parent: Option<(Handle, Ordering)> = None;
        let mut link = self.root;
        while let Some(handle) = link {
            let node = self.nodes.get_mut(handle);
            let order = (self.compare)(&key, &node.key);
            link = match order {
                Ordering::Equal => return Some(core::mem::replace(&mut node.value, value)),
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
            parent = Some((handle, order));
        }

        let handle = self.nodes.alloc(TreeNode {
            key,
            value,
            left: None,
            right: None,
        });
        match parent {
            None => self.root = Some(handle),
            Some((parent, Ordering::Less)) => self.nodes.get_mut(parent).left = Some(handle),
            Some((parent, _)) => self.nodes.get_mut(parent).right = Some(handle),
        }
        None
    }

    /// Returns the value stored under a key equal to `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.find_node(key).map(|handle| &self.nodes.get(handle).value)
    }

    /// Returns a mutable reference to the value stored under `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.find_node(key).map(|handle| &mut self.nodes.get_mut(handle).value)
    }

    /// Returns `true` if a key comparing equal to `key` is present.
    pub fn contains(&self, key: &K) -> bool {
        self.find_node(key).is_some()
    }
}

impl<K, V, C> ComparatorTree<K, V, C> {
    /// Returns the number of entries in the tree.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree holds no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.nodes.len() == 0
    }

    /// Removes every entry, keeping the comparator and the allocated capacity.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// Calls `f` on every entry in comparator order.
    ///
    /// State that must persist between calls lives in whatever `f` captures.
    pub fn traverse<F>(&self, mut f: F)
    where
        F: FnMut(&K, &V),
    {
        for (key, value) in self {
            f(key, value);
        }
    }

    /// Gets an iterator over the entries in comparator order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        let mut iter = Iter {
            nodes: &self.nodes,
            current: self.root,
            path: Vec::new(),
            remaining: self.len(),
        };
        iter.advance();
        iter
    }
}

impl<K: Clone, V: Clone, C: Clone> Clone for ComparatorTree<K, V, C> {
    fn clone(&self) -> Self {
        ComparatorTree {
            nodes: self.nodes.clone(),
            root: self.root,
            compare: self.compare.clone(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for ComparatorTree<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, V, C> IntoIterator for &'a ComparatorTree<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<K, V> Iter<'_, K, V> {
    fn advance(&mut self) {
        while let Some(handle) = self.current {
            self.path.push(handle);
            self.current = self.nodes.get(handle).left;
        }
        self.current = self.path.pop();
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.get(self.current?);
        self.current = node.right;
        self.advance();
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter").field("remaining", &self.remaining).finish()
    }
}
