use alloc::boxed::Box;
use core::borrow::Borrow;
use core::cmp::Ordering;

use super::height::Height;
use super::trail::{Step, Trail};

/// An owned, possibly empty subtree.
pub(crate) type Link<K, V> = Option<Box<Node<K, V>>>;

/// A single AVL node. Every node exclusively owns its children.
#[derive(Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) left: Link<K, V>,
    pub(crate) right: Link<K, V>,
    height: Height,
}

/// The restructuring performed by [`Node::rebalance`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Rotation {
    None,
    Left,
    Right,
    /// Right child rotated right, then this node rotated left.
    RightLeft,
    /// Left child rotated left, then this node rotated right.
    LeftRight,
}

impl<K, V> Node<K, V> {
    pub(crate) fn new(key: K, value: V) -> Box<Self> {
        Box::new(Self {
            key,
            value,
            left: None,
            right: None,
            height: Height::LEAF,
        })
    }

    #[inline]
    pub(crate) fn height(&self) -> usize {
        self.height.to_usize()
    }

    /// Height of a link; an empty subtree has height 0.
    #[inline]
    pub(crate) fn link_height(link: &Link<K, V>) -> usize {
        link.as_ref().map_or(0, |node| node.height())
    }

    pub(crate) fn update_height(&mut self) {
        let height = 1 + Self::link_height(&self.left).max(Self::link_height(&self.right));
        self.height = Height::from_usize(height);
    }

    /// Right height minus left height.
    #[allow(clippy::cast_possible_wrap)]
    pub(crate) fn balance_factor(&self) -> isize {
        Self::link_height(&self.right) as isize - Self::link_height(&self.left) as isize
    }

    /// Promotes the right child. A node without a right child is returned as is.
    pub(crate) fn rotate_left(mut self: Box<Self>) -> Box<Self> {
        let Some(mut top) = self.right.take() else {
            return self;
        };
        self.right = top.left.take();
        self.update_height();
        top.left = Some(self);
        top.update_height();
        top
    }

    /// Promotes the left child. A node without a left child is returned as is.
    pub(crate) fn rotate_right(mut self: Box<Self>) -> Box<Self> {
        let Some(mut top) = self.left.take() else {
            return self;
        };
        self.left = top.right.take();
        self.update_height();
        top.right = Some(self);
        top.update_height();
        top
    }

    /// Refreshes this node's height and restores `|balance| <= 1` with at
    /// most two rotations, returning the new subtree root.
    pub(crate) fn rebalance(mut self: Box<Self>) -> (Box<Self>, Rotation) {
        self.update_height();
        match self.balance_factor() {
            2 => {
                let mut rotation = Rotation::Left;
                if let Some(right) = self.right.take() {
                    self.right = Some(if right.balance_factor() < 0 {
                        rotation = Rotation::RightLeft;
                        right.rotate_right()
                    } else {
                        right
                    });
                }
                (self.rotate_left(), rotation)
            }
            -2 => {
                let mut rotation = Rotation::Right;
                if let Some(left) = self.left.take() {
                    self.left = Some(if left.balance_factor() > 0 {
                        rotation = Rotation::LeftRight;
                        left.rotate_left()
                    } else {
                        left
                    });
                }
                (self.rotate_right(), rotation)
            }
            _ => (self, Rotation::None),
        }
    }

    /// Finds `key` below `link`, creating it with `make()` when absent.
    ///
    /// Returns the rebalanced subtree root and whether a node was created. On
    /// return `trail` leads from that root to the node holding `key`.
    pub(crate) fn find_or_insert<F>(link: Link<K, V>, key: K, make: F, trail: &mut Trail) -> (Box<Self>, bool)
    where
        K: Ord,
        F: FnOnce() -> V,
    {
        let Some(mut node) = link else {
            return (Self::new(key, make()), true);
        };

        let inserted = match key.cmp(&node.key) {
            Ordering::Equal => false,
            Ordering::Less => {
                let (child, inserted) = Self::find_or_insert(node.left.take(), key, make, trail);
                node.left = Some(child);
                trail.push_front(Step::Left);
                inserted
            }
            Ordering::Greater => {
                let (child, inserted) = Self::find_or_insert(node.right.take(), key, make, trail);
                node.right = Some(child);
                trail.push_front(Step::Right);
                inserted
            }
        };

        let (node, rotation) = node.rebalance();
        trail.apply(rotation);
        (node, inserted)
    }

    /// Removes `key` from the subtree rooted here.
    ///
    /// Returns the replacement subtree root (possibly empty) and the removed
    /// entry, if the key was present.
    pub(crate) fn remove<Q>(mut self: Box<Self>, key: &Q) -> (Link<K, V>, Option<(K, V)>)
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let removed = match key.cmp(self.key.borrow()) {
            Ordering::Less => match self.left.take() {
                Some(left) => {
                    let (left, removed) = left.remove(key);
                    self.left = left;
                    removed
                }
                None => None,
            },
            Ordering::Greater => match self.right.take() {
                Some(right) => {
                    let (right, removed) = right.remove(key);
                    self.right = right;
                    removed
                }
                None => None,
            },
            Ordering::Equal => return self.unlink(),
        };
        (Some(self.rebalance().0), removed)
    }

    /// Removes this node from its subtree and returns its replacement.
    fn unlink(self: Box<Self>) -> (Link<K, V>, Option<(K, V)>) {
        let Node {
            key,
            value,
            left,
            right,
            ..
        } = *self;

        let replacement = match (left, right) {
            (None, right) => right,
            (left, None) => left,
            (Some(mut left), Some(right)) if left.right.is_none() => {
                // The left child is the predecessor: it adopts the right subtree.
                left.right = Some(right);
                Some(left.rebalance().0)
            }
            (Some(left), Some(right)) => {
                let (rest, mut predecessor) = left.take_max();
                predecessor.left = rest;
                predecessor.right = Some(right);
                Some(predecessor.rebalance().0)
            }
        };
        (replacement, Some((key, value)))
    }

    /// Detaches the rightmost node of this subtree, splicing its left child
    /// into its place and rebalancing every node on the right spine.
    fn take_max(mut self: Box<Self>) -> (Link<K, V>, Box<Self>) {
        match self.right.take() {
            None => {
                let rest = self.left.take();
                (rest, self)
            }
            Some(right) => {
                let (rest, max) = right.take_max();
                self.right = rest;
                (Some(self.rebalance().0), max)
            }
        }
    }

    /// Non-recursive lookup below `link`.
    pub(crate) fn search<'a, Q>(mut link: Option<&'a Self>, key: &Q) -> Option<&'a Self>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        while let Some(node) = link {
            link = match key.cmp(node.key.borrow()) {
                Ordering::Equal => return Some(node),
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
            };
        }
        None
    }

    pub(crate) fn search_mut<'a, Q>(mut link: Option<&'a mut Self>, key: &Q) -> Option<&'a mut Self>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        while let Some(node) = link {
            link = match key.cmp(node.key.borrow()) {
                Ordering::Equal => return Some(node),
                Ordering::Less => node.left.as_deref_mut(),
                Ordering::Greater => node.right.as_deref_mut(),
            };
        }
        None
    }

    /// Follows `trail` from this node.
    ///
    /// # Panics
    ///
    /// Panics if the trail leaves the tree, which would mean it was not
    /// produced by [`Node::find_or_insert`] for this subtree.
    pub(crate) fn follow_mut(&mut self, trail: &Trail) -> &mut Self {
        let mut node = self;
        for step in trail.iter() {
            let next = match step {
                Step::Left => node.left.as_deref_mut(),
                Step::Right => node.right.as_deref_mut(),
            };
            node = next.expect("`Node::follow_mut()` - `trail` leaves the tree!");
        }
        node
    }

    pub(crate) fn first(&self) -> &Self {
        let mut node = self;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        node
    }

    pub(crate) fn last(&self) -> &Self {
        let mut node = self;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        node
    }
}
