use crate::game::{Puzzle, PuzzleState};

/// Number of positions where `state` and `goal` hold different values.
///
/// Only the overlapping prefix is compared; a length difference adds nothing.
/// This is not admissible, so searches guided by it make no optimality claim.
pub fn positional_mismatch(state: &[u32], goal: &[u32]) -> usize {
    state.iter().zip(goal).filter(|(a, b)| a != b).count()
}

/// Priority of a child reached in `steps` moves: `g + h`.
pub fn cost(puzzle: &Puzzle, state: &PuzzleState, steps: usize) -> usize {
    steps + positional_mismatch(state, puzzle.goal())
}

/// A caller-supplied estimate of how far a state is from the goal, lower
/// being closer.
pub trait DistanceEstimator: Send + Sync {
    fn estimate(&self, puzzle: &Puzzle, state: &PuzzleState) -> f64;
}

/// [`positional_mismatch`] as a [`DistanceEstimator`].
#[derive(Clone, Copy, Debug, Default)]
pub struct PositionalMismatch;

impl DistanceEstimator for PositionalMismatch {
    fn estimate(&self, puzzle: &Puzzle, state: &PuzzleState) -> f64 {
        positional_mismatch(state, puzzle.goal()) as f64
    }
}

impl<F> DistanceEstimator for F
where
    F: Fn(&Puzzle, &PuzzleState) -> f64 + Send + Sync,
{
    fn estimate(&self, puzzle: &Puzzle, state: &PuzzleState) -> f64 {
        self(puzzle, state)
    }
}
