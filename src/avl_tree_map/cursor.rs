use core::fmt;

use smallvec::SmallVec;

use crate::raw::Node;

#[cfg(test)]
pub(super) const PATH_INLINE: usize = 4;
#[cfg(not(test))]
pub(super) const PATH_INLINE: usize = 32;

/// A resumable in-order walk over an [`AvlTreeMap`](super::AvlTreeMap).
///
/// The cursor is an explicit two-step state machine rather than an
/// [`Iterator`]: [`visit`](Cursor::visit) yields the entry under the cursor
/// and commits the move into its right subtree, and
/// [`advance`](Cursor::advance) descends that subtree's left spine to the
/// next smallest pending entry. A walk is therefore
/// `while has_more() { visit(); advance(); }`, which is exactly what
/// [`Iter`](super::Iter) does.
///
/// Calling `visit` twice without an `advance` in between produces entries out
/// of order; it never touches freed memory, because the cursor borrows the
/// map and the map cannot be mutated while the cursor is alive.
///
/// This `struct` is created by the [`cursor`] method on [`AvlTreeMap`].
///
/// # Examples
///
/// ```
/// use hbal_tree::AvlTreeMap;
///
/// let map = AvlTreeMap::from([(5, 'e'), (3, 'c'), (8, 'h')]);
/// let mut cursor = map.cursor();
/// let mut keys = Vec::new();
/// while cursor.has_more() {
///     let (key, _) = cursor.visit().unwrap();
///     keys.push(*key);
///     cursor.advance();
/// }
/// assert_eq!(keys, [3, 5, 8]);
/// ```
///
/// [`AvlTreeMap`]: super::AvlTreeMap
/// [`cursor`]: super::AvlTreeMap::cursor
pub struct Cursor<'a, K, V> {
    current: Option<&'a Node<K, V>>,
    path: SmallVec<[&'a Node<K, V>; PATH_INLINE]>,
}

impl<'a, K, V> Cursor<'a, K, V> {
    /// Starts a walk at `root`, already positioned on the smallest entry.
    pub(crate) fn new(root: Option<&'a Node<K, V>>) -> Self {
        let mut cursor = Cursor {
            current: root,
            path: SmallVec::new(),
        };
        cursor.advance();
        cursor
    }

    /// Pushes the left spine below the current node and pops the deepest
    /// pending node into `current`.
    ///
    /// # Complexity
    ///
    /// O(log n) worst case, O(1) amortized over a full walk.
    pub fn advance(&mut self) {
        while let Some(node) = self.current {
            self.path.push(node);
            self.current = node.left.as_deref();
        }
        self.current = self.path.pop();
    }

    /// Returns the entry under the cursor and moves the cursor to that
    /// entry's right subtree. Returns `None` when no node is under the cursor.
    ///
    /// Must be followed by exactly one [`advance`](Cursor::advance) before the
    /// next `visit`.
    pub fn visit(&mut self) -> Option<(&'a K, &'a V)> {
        let node = self.current?;
        self.current = node.right.as_deref();
        Some((&node.key, &node.value))
    }

    /// Returns `true` unless the walk is exhausted.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.current.is_some() || !self.path.is_empty()
    }
}

impl<K, V> Clone for Cursor<'_, K, V> {
    fn clone(&self) -> Self {
        Cursor {
            current: self.current,
            path: self.path.clone(),
        }
    }
}

impl<K: fmt::Debug, V> fmt::Debug for Cursor<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("current", &self.current.map(|node| &node.key))
            .field("pending", &self.path.len())
            .finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use crate::AvlTreeMap;
    use alloc::vec::Vec;

    #[test]
    fn empty_cursor_is_exhausted() {
        let map: AvlTreeMap<i32, i32> = AvlTreeMap::new();
        let mut cursor = map.cursor();
        assert!(!cursor.has_more());
        assert_eq!(cursor.visit(), None);
    }

    #[test]
    fn walk_spills_path_to_heap() {
        // Deeper than the inline path capacity used under test.
        let map: AvlTreeMap<i32, ()> = (0..512).map(|k| (k, ())).collect();
        let mut cursor = map.cursor();
        let mut keys = Vec::new();
        while cursor.has_more() {
            keys.push(*cursor.visit().unwrap().0);
            cursor.advance();
        }
        assert_eq!(keys, (0..512).collect::<Vec<_>>());
        assert!(!cursor.has_more());
    }

    #[test]
    fn visit_commits_move_to_right_subtree() {
        let map = AvlTreeMap::from([(2, 'b'), (1, 'a'), (3, 'c')]);
        let mut cursor = map.cursor();
        assert_eq!(cursor.visit(), Some((&1, &'a')));
        // Node 1 has no right child: nothing under the cursor until advanced.
        assert_eq!(cursor.visit(), None);
        assert!(cursor.has_more());
        cursor.advance();
        assert_eq!(cursor.visit(), Some((&2, &'b')));
        // The right subtree of 2 is now current.
        assert_eq!(cursor.visit(), Some((&3, &'c')));
    }

    #[test]
    fn cloned_cursor_resumes_independently() {
        let map: AvlTreeMap<i32, i32> = (0..10).map(|k| (k, k)).collect();
        let mut cursor = map.cursor();
        cursor.visit();
        cursor.advance();
        let mut fork = cursor.clone();
        assert_eq!(fork.visit(), Some((&1, &1)));
        fork.advance();
        assert_eq!(fork.visit(), Some((&2, &2)));
        assert_eq!(cursor.visit(), Some((&1, &1)));
    }
}
