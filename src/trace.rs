//! Step-indexed solution traces.
//!
//! A trace is the text a [`Path`](crate::solver::Path) displays as: one
//! `"{step}: [a, b, c]"` line per state. Several runs may be concatenated;
//! each new run starts at step zero. Text after a state's closing bracket is
//! ignored, as are lines that do not look like a step, so the listing printed
//! by `reversal solve` can be fed back in directly.

use std::collections::BTreeMap;
use std::fmt::{Display, Error, Formatter};

use crate::errors::SolverError;
use crate::game::{PuzzleState, Value};

/// Step index to state, for one run.
pub type Run = BTreeMap<usize, PuzzleState>;

/// What an edge between two consecutive trace states did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveKind {
    Split,
    Combine,
}

impl MoveKind {
    /// Splits lengthen the sequence; anything else is read as a combine.
    pub fn infer(previous: &PuzzleState, next: &PuzzleState) -> MoveKind {
        if next.len() > previous.len() {
            MoveKind::Split
        } else {
            MoveKind::Combine
        }
    }
}

impl Display for MoveKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            MoveKind::Split => write!(f, "split"),
            MoveKind::Combine => write!(f, "combine"),
        }
    }
}

pub fn parse_runs(text: &str) -> Result<Vec<Run>, SolverError> {
    let mut runs = vec![];
    let mut current = Run::new();
    for (number, line) in text.lines().enumerate() {
        let Some((step, state)) = parse_line(line.trim(), number + 1)? else {
            continue;
        };
        if step == 0 && !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
        current.insert(step, state);
    }
    if !current.is_empty() {
        runs.push(current);
    }
    return Ok(runs);
}

/// `Ok(None)` for lines that are not steps at all; an error for step lines
/// whose state cannot be read.
fn parse_line(line: &str, number: usize) -> Result<Option<(usize, PuzzleState)>, SolverError> {
    let Some((step, rest)) = line.split_once(": ") else {
        return Ok(None);
    };
    let Ok(step) = step.parse::<usize>() else {
        return Ok(None);
    };
    let rest = rest.trim();
    if !rest.starts_with('[') {
        return Ok(None);
    }
    // anything after the closing bracket, such as a move label, is ignored
    let end = rest
        .rfind(']')
        .ok_or_else(|| bad_line(number, "unterminated state"))?;
    let body = &rest[1..end];
    let values = body
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<Value>()
                .map_err(|_| bad_line(number, format!("{:?} is not a value", token)))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Some((step, PuzzleState::from(values))))
}

fn bad_line(line: usize, reason: impl Into<String>) -> SolverError {
    SolverError::Trace {
        line,
        reason: reason.into(),
    }
}

/// One line of a solve listing: the step, the state, then a note such as the
/// move that led there. [`parse_runs`] reads these lines back.
pub fn step_line(step: usize, state: &PuzzleState, note: impl Display) -> String {
    format!("{}: {}  {}", step, state, note)
}

/// Consecutive states of a run with the move kind linking them.
pub fn edges(run: &Run) -> Vec<(&PuzzleState, &PuzzleState, MoveKind)> {
    let states: Vec<&PuzzleState> = run.values().collect();
    states
        .windows(2)
        .map(|pair| (pair[0], pair[1], MoveKind::infer(pair[0], pair[1])))
        .collect()
}
