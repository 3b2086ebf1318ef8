use core::num::NonZero;

/// Cached height of a non-empty subtree. A leaf has height 1; an absent
/// subtree has height 0 and is represented by `None` at the link level.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
#[repr(transparent)]
pub(crate) struct Height(NonZero<u8>);

impl Height {
    // An AVL tree of height h holds at least fib(h + 2) - 1 nodes, so u8 is
    // far beyond anything addressable.
    pub(crate) const MAX: usize = u8::MAX as usize;
    pub(crate) const LEAF: Self = Self::from_usize(1);

    #[inline]
    pub(crate) const fn from_usize(height: usize) -> Self {
        assert!(height != 0 && height <= Self::MAX, "`Height::from_usize()` - `height` out of range!");
        #[allow(clippy::cast_possible_truncation)]
        Self(NonZero::new(height as u8).unwrap())
    }

    #[inline]
    pub(crate) const fn to_usize(self) -> usize {
        self.0.get() as usize
    }
}
