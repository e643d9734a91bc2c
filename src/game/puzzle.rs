use std::collections::HashSet;
use std::fmt::{Display, Error, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::state::{Move, PuzzleState};
use super::Value;
use crate::errors::InvalidInputError;

/// One puzzle instance: reach `goal` (the initial sequence reversed) by splits
/// and merges without ever repeating a value or exceeding `max_value`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    initial: PuzzleState,
    goal: PuzzleState,
    max_value: Value,
}

impl Puzzle {
    /// Validates `values` and derives the value bound from their maximum.
    ///
    /// Any value that fits a `u32` is accepted, but a value `v` has up to
    /// `v / 2` splits and [`Puzzle::successors`] builds all of them at once.
    /// Deadlines are checked between expansions, so a single expansion of a
    /// state holding values in the millions can outlast a short deadline.
    pub fn new(values: &[i64]) -> Result<Puzzle, InvalidInputError> {
        if values.is_empty() {
            return Err(InvalidInputError::Empty);
        }
        let mut seen = HashSet::with_capacity(values.len());
        let mut checked = Vec::with_capacity(values.len());
        for &value in values {
            if value <= 0 {
                return Err(InvalidInputError::NonPositive(value));
            }
            let value_u = Value::try_from(value).map_err(|_| InvalidInputError::TooLarge(value))?;
            if !seen.insert(value_u) {
                return Err(InvalidInputError::Duplicate(value));
            }
            checked.push(value_u);
        }
        let initial = PuzzleState::from(checked);
        let max_value = initial.iter().copied().max().unwrap_or_default();
        return Ok(Puzzle {
            goal: initial.reversed(),
            initial,
            max_value,
        });
    }

    pub fn initial(&self) -> &PuzzleState {
        &self.initial
    }
    pub fn goal(&self) -> &PuzzleState {
        &self.goal
    }
    pub fn max_value(&self) -> Value {
        self.max_value
    }

    /// A single value is its own reverse; there is nothing to solve.
    pub fn is_degenerate(&self) -> bool {
        self.initial.len() < 2
    }

    pub fn is_goal(&self, state: &PuzzleState) -> bool {
        state.values() == self.goal.values()
    }

    /// Every legal move from `state` with the state it leads to. Splits come
    /// first (by position, then by smaller part), merges after (by position).
    /// Takes time linear in the sum of `state`.
    pub fn successors(&self, state: &PuzzleState) -> Vec<(Move, PuzzleState)> {
        let mut result = Vec::new();
        for (position, &value) in state.iter().enumerate() {
            for left in 1..=value / 2 {
                let right = value - left;
                if left == right
                    || right > self.max_value
                    || state.contains_value(left)
                    || state.contains_value(right)
                {
                    continue;
                }
                let split = Move::Split {
                    position,
                    left,
                    right,
                };
                self.push_checked(&mut result, split, state);
            }
        }
        for position in 0..state.len().saturating_sub(1) {
            match state[position].checked_add(state[position + 1]) {
                Some(merged) if merged <= self.max_value && !state.contains_value(merged) => {
                    self.push_checked(&mut result, Move::Merge { position }, state);
                }
                _ => {}
            }
        }
        return result;
    }

    fn push_checked(&self, result: &mut Vec<(Move, PuzzleState)>, step: Move, state: &PuzzleState) {
        if let Some(next) = step.apply(state).filter(PuzzleState::all_distinct) {
            result.push((step, next));
        }
    }

    /// The legal move leading from `from` to `to`, if there is one.
    pub fn move_between(&self, from: &PuzzleState, to: &PuzzleState) -> Option<Move> {
        self.successors(from)
            .into_iter()
            .find(|(_, next)| next == to)
            .map(|(step, _)| step)
    }

    /// Checks that `path` starts at the initial state, ends at the goal and
    /// that every consecutive pair is one legal move apart.
    pub fn validate_path(&self, path: &[PuzzleState]) -> bool {
        match (path.first(), path.last()) {
            (Some(first), Some(last)) => {
                first == &self.initial
                    && self.is_goal(last)
                    && path
                        .windows(2)
                        .all(|pair| self.move_between(&pair[0], &pair[1]).is_some())
            }
            _ => false,
        }
    }

    /// True when `state` respects the global invariants of this instance.
    pub fn admits(&self, state: &PuzzleState) -> bool {
        state.iter().all(|&v| v > 0 && v <= self.max_value) && state.all_distinct()
    }
}

impl FromStr for Puzzle {
    type Err = InvalidInputError;

    /// Parses integers separated by whitespace and/or commas, with optional
    /// surrounding brackets, e.g. `"5 3 9"` or `"[8, 5, 1]"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('[').trim_end_matches(']');
        let values = trimmed
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .map(|token| {
                token
                    .parse::<i64>()
                    .map_err(|_| InvalidInputError::NotAnInteger(token.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Puzzle::new(&values)
    }
}

impl Display for Puzzle {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(
            f,
            "{} -> {} (max {})",
            self.initial, self.goal, self.max_value
        )
    }
}
