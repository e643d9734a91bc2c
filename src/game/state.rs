use std::fmt::{Debug, Display, Error, Formatter};
use std::ops::Deref;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::Value;

/// Sequences up to this length live inline.
const INLINE_VALUES: usize = 8;

/// An ordered sequence of distinct positive values.
///
/// States are never mutated once built. Moves produce fresh successors, so a
/// state can be shared between the visited set, the frontier and a returned
/// path without copies going stale.
#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Hash, Default, Serialize, Deserialize)]
pub struct PuzzleState(SmallVec<[Value; INLINE_VALUES]>);

impl PuzzleState {
    pub fn new(values: &[Value]) -> PuzzleState {
        PuzzleState(SmallVec::from_slice(values))
    }
    pub fn values(&self) -> &[Value] {
        &self.0
    }
    pub fn reversed(&self) -> PuzzleState {
        PuzzleState(self.0.iter().rev().copied().collect())
    }
    pub fn contains_value(&self, value: Value) -> bool {
        self.0.contains(&value)
    }
    /// True when no value occurs twice.
    pub fn all_distinct(&self) -> bool {
        for i in 0..self.0.len() {
            for j in (i + 1)..self.0.len() {
                if self.0[i] == self.0[j] {
                    return false;
                }
            }
        }
        return true;
    }
    fn spliced(&self, position: usize, removed: usize, inserted: &[Value]) -> PuzzleState {
        let mut values = SmallVec::with_capacity(self.0.len() + inserted.len() - removed);
        values.extend_from_slice(&self.0[..position]);
        values.extend_from_slice(inserted);
        values.extend_from_slice(&self.0[position + removed..]);
        return PuzzleState(values);
    }
}

impl Deref for PuzzleState {
    type Target = [Value];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Value>> for PuzzleState {
    fn from(values: Vec<Value>) -> Self {
        PuzzleState(SmallVec::from_vec(values))
    }
}

impl From<&[Value]> for PuzzleState {
    fn from(values: &[Value]) -> Self {
        PuzzleState::new(values)
    }
}

impl<const N: usize> From<[Value; N]> for PuzzleState {
    fn from(values: [Value; N]) -> Self {
        PuzzleState::new(&values)
    }
}

impl Display for PuzzleState {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "[")?;
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, "]")
    }
}

impl Debug for PuzzleState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

/// A single legal step between two states.
#[derive(Eq, PartialEq, Copy, Clone, Hash, Debug, Serialize, Deserialize)]
pub enum Move {
    /// Replace the value at `position` with `left` followed by `right`.
    Split {
        position: usize,
        left: Value,
        right: Value,
    },
    /// Replace the values at `position` and `position + 1` with their sum.
    Merge { position: usize },
}

impl Move {
    pub fn position(&self) -> usize {
        match *self {
            Move::Split { position, .. } | Move::Merge { position } => position,
        }
    }
    pub fn is_split(&self) -> bool {
        matches!(self, Move::Split { .. })
    }
    /// Builds the successor of `state`, or `None` when the move does not fit
    /// it: a position out of range, split parts that do not add up to the
    /// value, or a merge whose sum overflows. Distinctness and the value bound
    /// are left to [`Puzzle::successors`](super::Puzzle::successors).
    pub fn apply(&self, state: &PuzzleState) -> Option<PuzzleState> {
        match *self {
            Move::Split {
                position,
                left,
                right,
            } => {
                let value = *state.get(position)?;
                if left.checked_add(right) != Some(value) {
                    return None;
                }
                Some(state.spliced(position, 1, &[left, right]))
            }
            Move::Merge { position } => {
                let merged = state.get(position)?.checked_add(*state.get(position.checked_add(1)?)?)?;
                Some(state.spliced(position, 2, &[merged]))
            }
        }
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            Move::Split {
                position,
                left,
                right,
            } => write!(f, "split@{} -> {} + {}", position, left, right),
            Move::Merge { position } => write!(f, "merge@{}", position),
        }
    }
}
