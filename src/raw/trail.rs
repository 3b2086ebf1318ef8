use smallvec::SmallVec;

use super::node::Rotation;

#[cfg(test)]
const INLINE_STEPS: usize = 4;
#[cfg(not(test))]
const INLINE_STEPS: usize = 32;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Step {
    Left,
    Right,
}

/// The route from a subtree root down to one node of that subtree.
///
/// Steps are stored bottom-up: the last element is the first step taken from
/// the root. Recursive insertion builds the trail while unwinding, pushing the
/// step each frame took, and rewrites the head of the trail whenever that
/// frame rotates so the trail keeps pointing at the same node.
#[derive(Debug, Default)]
pub(crate) struct Trail {
    steps: SmallVec<[Step; INLINE_STEPS]>,
}

impl Trail {
    pub(crate) fn new() -> Self {
        Self {
            steps: SmallVec::new(),
        }
    }

    /// Prepends the step taken from a parent into the subtree this trail starts at.
    #[inline]
    pub(crate) fn push_front(&mut self, step: Step) {
        self.steps.push(step);
    }

    /// Steps from the root downwards.
    pub(crate) fn iter(&self) -> impl Iterator<Item = Step> + '_ {
        self.steps.iter().rev().copied()
    }

    /// Rewrites the trail for a rotation performed at its root.
    pub(crate) fn apply(&mut self, rotation: Rotation) {
        match rotation {
            Rotation::None => {}
            Rotation::Left => self.rotate_left(),
            Rotation::Right => self.rotate_right(),
            Rotation::RightLeft => {
                // The inner rotation happened at the right child.
                if self.steps.last() == Some(&Step::Right) {
                    self.steps.pop();
                    self.rotate_right();
                    self.steps.push(Step::Right);
                }
                self.rotate_left();
            }
            Rotation::LeftRight => {
                if self.steps.last() == Some(&Step::Left) {
                    self.steps.pop();
                    self.rotate_left();
                    self.steps.push(Step::Left);
                }
                self.rotate_right();
            }
        }
    }

    // The right child `t` becomes the root, the old root becomes `t.left`, and
    // `t.left` moves to the old root's right.
    fn rotate_left(&mut self) {
        match self.steps.pop() {
            None => self.steps.push(Step::Left),
            Some(Step::Left) => {
                self.steps.push(Step::Left);
                self.steps.push(Step::Left);
            }
            Some(Step::Right) => match self.steps.pop() {
                None => {}
                Some(Step::Left) => {
                    self.steps.push(Step::Right);
                    self.steps.push(Step::Left);
                }
                Some(Step::Right) => self.steps.push(Step::Right),
            },
        }
    }

    fn rotate_right(&mut self) {
        match self.steps.pop() {
            None => self.steps.push(Step::Right),
            Some(Step::Right) => {
                self.steps.push(Step::Right);
                self.steps.push(Step::Right);
            }
            Some(Step::Left) => match self.steps.pop() {
                None => {}
                Some(Step::Right) => {
                    self.steps.push(Step::Left);
                    self.steps.push(Step::Right);
                }
                Some(Step::Left) => self.steps.push(Step::Left),
            },
        }
    }
}
