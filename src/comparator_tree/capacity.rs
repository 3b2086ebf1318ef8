use super::ComparatorTree;
use crate::raw::Arena;

impl<K, V, C> ComparatorTree<K, V, C> {
    /// Creates an empty tree ordered by `compare`, with room for at least
    /// `capacity` entries before reallocating.
    ///
    /// # Examples
    ///
    /// ```
    /// use hbal_tree::ComparatorTree;
    ///
    /// let tree: ComparatorTree<u8, (), _> = ComparatorTree::with_capacity(32, |a: &u8, b: &u8| b.cmp(a));
    /// assert!(tree.is_empty());
    /// assert!(tree.capacity() >= 32);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize, compare: C) -> Self {
        ComparatorTree {
            nodes: Arena::with_capacity(capacity),
            root: None,
            compare,
        }
    }

    /// Returns how many entries the tree can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }
}
