use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;
use core::mem;
use core::ops::Index;

use smallvec::SmallVec;

use crate::raw::{Link, Node, Trail};

mod cursor;

pub use cursor::Cursor;
use cursor::PATH_INLINE;

/// An ordered map based on an [AVL tree].
///
/// Keys are ordered by their [`Ord`] implementation; no comparator is
/// injected. Every node owns its two subtrees, and after each insertion or
/// removal the height of every node's right subtree differs from the height
/// of its left subtree by at most one, which bounds the tree height by
/// roughly 1.44 log<sub>2</sub>(n).
///
/// Iteration is driven by a [`Cursor`], an explicit stack-based walk that
/// needs no recursion and no parent pointers. Cursors and iterators borrow
/// the map, so the map cannot be mutated while one is alive.
///
/// It is a logic error for a key to be modified in such a way that the key's ordering relative to
/// any other key, as determined by the [`Ord`] trait, changes while it is in the map. The behavior
/// resulting from such a logic error is not specified, but will be encapsulated to the
/// `AvlTreeMap` that observed it and not result in undefined behavior.
///
/// # Examples
///
/// ```
/// use hbal_tree::AvlTreeMap;
///
/// let mut stock: AvlTreeMap<&str, i32> = AvlTreeMap::new();
///
/// // `get_or_insert_default` finds an entry or creates it on the spot.
/// *stock.get_or_insert_default("apples") += 3;
/// *stock.get_or_insert_default("pears") += 1;
/// *stock.get_or_insert_default("apples") += 2;
///
/// assert_eq!(stock[&"apples"], 5);
/// assert!(stock.contains_key(&"pears"));
///
/// stock.remove(&"pears");
/// assert!(!stock.contains_key(&"pears"));
///
/// for (fruit, count) in &stock {
///     println!("{fruit}: {count}");
/// }
/// ```
///
/// [AVL tree]: https://en.wikipedia.org/wiki/AVL_tree
pub struct AvlTreeMap<K, V> {
    root: Link<K, V>,
    len: usize,
}

/// An iterator over the entries of an `AvlTreeMap`, in ascending key order.
///
/// This `struct` is created by the [`iter`] method on [`AvlTreeMap`]. Each
/// step is one `visit` followed by one `advance` of the underlying
/// [`Cursor`].
///
/// # Examples
///
/// ```
/// use hbal_tree::AvlTreeMap;
///
/// let map = AvlTreeMap::from([(2, "b"), (1, "a")]);
/// let mut iter = map.iter();
/// assert_eq!(iter.next(), Some((&1, &"a")));
/// assert_eq!(iter.next(), Some((&2, &"b")));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`iter`]: AvlTreeMap::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V> {
    cursor: Cursor<'a, K, V>,
    remaining: usize,
}

/// A mutable iterator over the entries of an `AvlTreeMap`.
///
/// This `struct` is created by the [`iter_mut`] method on [`AvlTreeMap`].
///
/// [`iter_mut`]: AvlTreeMap::iter_mut
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IterMut<'a, K, V> {
    path: SmallVec<[Pending<'a, K, V>; PATH_INLINE]>,
    remaining: usize,
}

// A node whose left subtree is being walked, split into disjoint borrows.
struct Pending<'a, K, V> {
    key: &'a K,
    value: &'a mut V,
    right: Option<&'a mut Node<K, V>>,
}

/// An owning iterator over the entries of an `AvlTreeMap`, sorted by key.
///
/// This `struct` is created by the [`into_iter`] method on [`AvlTreeMap`]
/// (provided by the [`IntoIterator`] trait). Nodes are dismantled as the walk
/// passes them.
///
/// [`into_iter`]: IntoIterator::into_iter
pub struct IntoIter<K, V> {
    path: Vec<(K, V, Link<K, V>)>,
    remaining: usize,
}

/// An iterator over the keys of an `AvlTreeMap`.
///
/// This `struct` is created by the [`keys`] method on [`AvlTreeMap`].
///
/// [`keys`]: AvlTreeMap::keys
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// An iterator over the values of an `AvlTreeMap`.
///
/// This `struct` is created by the [`values`] method on [`AvlTreeMap`].
///
/// [`values`]: AvlTreeMap::values
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// A mutable iterator over the values of an `AvlTreeMap`.
///
/// This `struct` is created by the [`values_mut`] method on [`AvlTreeMap`].
///
/// [`values_mut`]: AvlTreeMap::values_mut
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct ValuesMut<'a, K, V> {
    inner: IterMut<'a, K, V>,
}

impl<K, V> AvlTreeMap<K, V> {
    /// Makes a new, empty `AvlTreeMap`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use hbal_tree::AvlTreeMap;
    ///
    /// let mut map = AvlTreeMap::new();
    /// map.insert(1, "a");
    /// ```
    #[must_use]
    pub const fn new() -> AvlTreeMap<K, V> {
        AvlTreeMap {
            root: None,
            len: 0,
        }
    }

    /// Clears the map, removing all elements.
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use hbal_tree::AvlTreeMap;
    ///
    /// let mut a = AvlTreeMap::new();
    /// assert_eq!(a.len(), 0);
    /// a.insert(1, "a");
    /// assert_eq!(a.len(), 1);
    /// ```
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the map contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the height of the tree: 0 when empty, 1 for a single entry.
    ///
    /// This is an extension and is not part of the standard `BTreeMap` API.
    ///
    /// # Examples
    ///
    /// ```
    /// use hbal_tree::AvlTreeMap;
    ///
    /// let mut map = AvlTreeMap::new();
    /// assert_eq!(map.height(), 0);
    /// map.insert(1, ());
    /// map.insert(2, ());
    /// map.insert(3, ());
    /// assert_eq!(map.height(), 2);
    /// ```
    #[must_use]
    pub fn height(&self) -> usize {
        Node::link_height(&self.root)
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the map's key type, but the ordering
    /// on the borrowed form *must* match the ordering on the key type.
    ///
    /// # Examples
    ///
    /// ```
    /// use hbal_tree::AvlTreeMap;
    ///
    /// let mut map = AvlTreeMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        Node::search(self.root.as_deref(), key).map(|node| &node.value)
    }

    /// Returns the key-value pair corresponding to the supplied key.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        Node::search(self.root.as_deref(), key).map(|node| (&node.key, &node.value))
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use hbal_tree::AvlTreeMap;
    ///
    /// let mut map = AvlTreeMap::new();
    /// map.insert(1, "a");
    /// if let Some(x) = map.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(map[&1], "b");
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        Node::search_mut(self.root.as_deref_mut(), key).map(|node| &mut node.value)
    }

    /// Returns `true` if the map contains a value for the specified key.
    ///
    /// # Examples
    ///
    /// ```
    /// use hbal_tree::AvlTreeMap;
    ///
    /// let mut map = AvlTreeMap::new();
    /// map.insert(1, "a");
    /// assert!(map.contains_key(&1));
    /// assert!(!map.contains_key(&2));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        Node::search(self.root.as_deref(), key).is_some()
    }

    /// Returns a mutable reference to the value stored under `key`, first
    /// inserting `make()` if the key is absent.
    ///
    /// Every node on the search path is rebalanced on the way back up, so the
    /// tree is height-balanced again by the time the reference is returned.
    ///
    /// This is an extension and is not part of the standard `BTreeMap` API.
    ///
    /// # Examples
    ///
    /// ```
    /// use hbal_tree::AvlTreeMap;
    ///
    /// let mut map = AvlTreeMap::new();
    /// map.get_or_insert_with("poneyland", Vec::new).push(3);
    /// map.get_or_insert_with("poneyland", || unreachable!()).push(4);
    /// assert_eq!(map[&"poneyland"], [3, 4]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn get_or_insert_with<F>(&mut self, key: K, make: F) -> &mut V
    where
        K: Ord,
        F: FnOnce() -> V,
    {
        let mut trail = Trail::new();
        let (root, inserted) = Node::find_or_insert(self.root.take(), key, make, &mut trail);
        if inserted {
            self.len += 1;
        }
        &mut self.root.insert(root).follow_mut(&trail).value
    }

    /// Returns a mutable reference to the value stored under `key`, first
    /// inserting `V::default()` if the key is absent.
    ///
    /// Looking up an existing key never creates a second entry for it.
    ///
    /// # Examples
    ///
    /// ```
    /// use hbal_tree::AvlTreeMap;
    ///
    /// let mut words: AvlTreeMap<&str, usize> = AvlTreeMap::new();
    /// for word in "the quick the lazy the end".split(' ') {
    ///     *words.get_or_insert_default(word) += 1;
    /// }
    /// assert_eq!(words[&"the"], 3);
    /// assert_eq!(words.len(), 4);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        K: Ord,
        V: Default,
    {
        self.get_or_insert_with(key, V::default)
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map did not have this key present, `None` is returned.
    ///
    /// If the map did have this key present, the value is updated, and the old
    /// value is returned. The key is not updated.
    ///
    /// # Examples
    ///
    /// ```
    /// use hbal_tree::AvlTreeMap;
    ///
    /// let mut map = AvlTreeMap::new();
    /// assert_eq!(map.insert(37, "a"), None);
    /// assert_eq!(map.insert(37, "b"), Some("a"));
    /// assert_eq!(map[&37], "b");
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert(&mut self, key: K, value: V) -> Option<V>
    where
        K: Ord,
    {
        if let Some(slot) = self.get_mut(&key) {
            return Some(mem::replace(slot, value));
        }
        self.get_or_insert_with(key, || value);
        None
    }

    /// Removes a key from the map, returning the value at the key if the key
    /// was previously in the map. Removing an absent key is a no-op.
    ///
    /// # Examples
    ///
    /// ```
    /// use hbal_tree::AvlTreeMap;
    ///
    /// let mut map = AvlTreeMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes a key from the map, returning the stored key and value if the
    /// key was previously in the map.
    ///
    /// A node with two children is replaced by its in-order predecessor.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let root = self.root.take()?;
        let (root, removed) = root.remove(key);
        self.root = root;
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    /// Returns the first key-value pair in the map, the one with the minimum key.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.root.as_deref().map(Node::first).map(|node| (&node.key, &node.value))
    }

    /// Returns the last key-value pair in the map, the one with the maximum key.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.root.as_deref().map(Node::last).map(|node| (&node.key, &node.value))
    }

    /// Starts an explicit in-order walk over the map.
    ///
    /// The cursor is positioned on the smallest entry. See [`Cursor`] for the
    /// `visit`/`advance` protocol.
    ///
    /// # Complexity
    ///
    /// O(log n) to create the cursor.
    #[must_use]
    pub fn cursor(&self) -> Cursor<'_, K, V> {
        Cursor::new(self.root.as_deref())
    }

    /// Gets an iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use hbal_tree::AvlTreeMap;
    ///
    /// let map = AvlTreeMap::from([(5, ()), (3, ()), (8, ()), (1, ()), (4, ()), (7, ()), (9, ())]);
    /// let keys: Vec<_> = map.iter().map(|(k, _)| *k).collect();
    /// assert_eq!(keys, [1, 3, 4, 5, 7, 8, 9]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) to create the iterator; O(1) amortized per step.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            cursor: self.cursor(),
            remaining: self.len,
        }
    }

    /// Gets a mutable iterator over the entries of the map, sorted by key.
    ///
    /// Values may be changed in place; keys and the tree shape may not.
    ///
    /// # Examples
    ///
    /// ```
    /// use hbal_tree::AvlTreeMap;
    ///
    /// let mut map = AvlTreeMap::from([("a", 1), ("b", 2), ("c", 3)]);
    /// for (key, value) in map.iter_mut() {
    ///     if key != &"a" {
    ///         *value += 10;
    ///     }
    /// }
    /// assert_eq!(map.values().copied().collect::<Vec<_>>(), [1, 12, 13]);
    /// ```
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        let mut iter = IterMut {
            path: SmallVec::new(),
            remaining: self.len,
        };
        iter.descend(self.root.as_deref_mut());
        iter
    }

    /// Gets an iterator over the keys of the map, in sorted order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys {
            inner: self.iter(),
        }
    }

    /// Gets an iterator over the values of the map, in order by key.
    pub fn values(&self) -> Values<'_, K, V> {
        Values {
            inner: self.iter(),
        }
    }

    /// Gets a mutable iterator over the values of the map, in order by key.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.iter_mut(),
        }
    }
}

impl<K: Clone, V: Clone> Clone for AvlTreeMap<K, V> {
    fn clone(&self) -> Self {
        AvlTreeMap {
            root: self.root.clone(),
            len: self.len,
        }
    }
}

impl<K: Hash, V: Hash> Hash for AvlTreeMap<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for (k, v) in self {
            k.hash(state);
            v.hash(state);
        }
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for AvlTreeMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<K: Eq, V: Eq> Eq for AvlTreeMap<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for AvlTreeMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Default for AvlTreeMap<K, V> {
    fn default() -> Self {
        AvlTreeMap::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for AvlTreeMap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = AvlTreeMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V> Extend<(K, V)> for AvlTreeMap<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for AvlTreeMap<K, V> {
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<K, Q, V> Index<&Q> for AvlTreeMap<K, V>
where
    K: Borrow<Q>,
    Q: ?Sized + Ord,
{
    type Output = V;

    /// # Panics
    ///
    /// Panics if the key is not present in the map.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<'a, K, V> IntoIterator for &'a AvlTreeMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<'a, K, V> IntoIterator for &'a mut AvlTreeMap<K, V> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> IterMut<'a, K, V> {
        self.iter_mut()
    }
}

impl<K, V> IntoIterator for AvlTreeMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Gets an owning iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use hbal_tree::AvlTreeMap;
    ///
    /// let map = AvlTreeMap::from([(2, "b"), (1, "a")]);
    /// assert_eq!(map.into_iter().collect::<Vec<_>>(), [(1, "a"), (2, "b")]);
    /// ```
    fn into_iter(mut self) -> IntoIter<K, V> {
        let mut iter = IntoIter {
            path: Vec::new(),
            remaining: self.len,
        };
        iter.descend(self.root.take());
        iter
    }
}

impl<'a, K: 'a, V: 'a> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if !self.cursor.has_more() {
            return None;
        }
        let entry = self.cursor.visit()?;
        self.cursor.advance();
        self.remaining -= 1;
        Some(entry)
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

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            cursor: self.cursor.clone(),
            remaining: self.remaining,
        }
    }
}

impl<K, V> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter").field("remaining", &self.remaining).finish()
    }
}

impl<K, V> Default for Iter<'_, K, V> {
    /// Creates an empty `avl_tree_map::Iter`.
    ///
    /// ```
    /// # use hbal_tree::avl_tree_map;
    /// let iter: avl_tree_map::Iter<'_, u8, u8> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        Iter {
            cursor: Cursor::new(None),
            remaining: 0,
        }
    }
}

impl<'a, K, V> IterMut<'a, K, V> {
    fn descend(&mut self, mut link: Option<&'a mut Node<K, V>>) {
        while let Some(node) = link {
            let Node {
                key,
                value,
                left,
                right,
                ..
            } = node;
            self.path.push(Pending {
                key,
                value,
                right: right.as_deref_mut(),
            });
            link = left.as_deref_mut();
        }
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        let Pending {
            key,
            value,
            right,
        } = self.path.pop()?;
        self.descend(right);
        self.remaining -= 1;
        Some((key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for IterMut<'_, K, V> {}

impl<K, V> fmt::Debug for IterMut<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterMut").field("remaining", &self.remaining).finish()
    }
}

impl<K, V> IntoIter<K, V> {
    fn descend(&mut self, mut link: Link<K, V>) {
        while let Some(node) = link {
            let Node {
                key,
                value,
                left,
                right,
                ..
            } = *node;
            self.path.push((key, value, right));
            link = left;
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        let (key, value, right) = self.path.pop()?;
        self.descend(right);
        self.remaining -= 1;
        Some((key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K, V> fmt::Debug for IntoIter<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter").field("remaining", &self.remaining).finish()
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V> fmt::Debug for Keys<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keys").field("remaining", &self.inner.len()).finish()
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Values {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V> fmt::Debug for Values<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Values").field("remaining", &self.inner.len()).finish()
    }
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<&'a mut V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for ValuesMut<'_, K, V> {}

impl<K, V> fmt::Debug for ValuesMut<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValuesMut").field("remaining", &self.inner.len()).finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn get_or_insert_returns_live_reference_after_rotation() {
        let mut map = AvlTreeMap::new();
        // Each of these inserts triggers a rotation that moves the new node.
        *map.get_or_insert_default(1) += 1;
        *map.get_or_insert_default(2) += 2;
        *map.get_or_insert_default(3) += 3;
        *map.get_or_insert_with(0, || 100) += 1;
        assert_eq!(map.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>(), vec![(0, 101), (1, 1), (2, 2), (3, 3)]);
        assert_eq!(map.height(), 3);
    }

    #[test]
    fn double_rotation_insert_hits_new_root() {
        let mut map = AvlTreeMap::new();
        map.insert(10, 'a');
        map.insert(30, 'b');
        // 20 ends up at the root after a right-left rotation.
        *map.get_or_insert_with(20, || 'x') = 'c';
        assert_eq!(map.root.as_ref().map(|n| n.key), Some(20));
        assert_eq!(map[&20], 'c');
    }

    #[test]
    fn len_tracks_inserts_and_removes() {
        let mut map = AvlTreeMap::new();
        for k in 0..50 {
            map.insert(k, k);
            map.insert(k, k + 1);
        }
        assert_eq!(map.len(), 50);
        for k in (0..50).step_by(2) {
            assert_eq!(map.remove(&k), Some(k + 1));
            assert_eq!(map.remove(&k), None);
        }
        assert_eq!(map.len(), 25);
        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.height(), 0);
    }

    #[test]
    fn iter_mut_path_spills() {
        let mut map: AvlTreeMap<u32, u32> = (0..300).map(|k| (k, 0)).collect();
        for (k, v) in map.iter_mut() {
            *v = k * 2;
        }
        assert!(map.iter().all(|(k, v)| *v == k * 2));
    }
}
