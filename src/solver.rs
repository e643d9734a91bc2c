use std::fmt::{Display, Error, Formatter};
use std::ops::Deref;
use std::time::{Duration, Instant};

use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::game::{Puzzle, PuzzleState};

pub mod astar;
pub mod beam;
pub mod bfs;
pub mod config;
pub mod heuristic;
pub mod hybrid;
pub(crate) mod trail;

pub use astar::{AStar, RandomizedAStar};
pub use beam::ProbabilisticBeam;
pub use bfs::BreadthFirst;
pub use config::{SolverConfig, Strategy};
pub use heuristic::{DistanceEstimator, PositionalMismatch};
pub use hybrid::{RandomWalkAStar, TimeBoxedBeam};


/// States from the initial state to a goal, one legal move apart.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path(Vec<PuzzleState>);

impl Path {
    pub fn new(states: Vec<PuzzleState>) -> Path {
        Path(states)
    }
    pub fn moves(&self) -> usize {
        self.0.len().saturating_sub(1)
    }
    pub fn states(&self) -> &[PuzzleState] {
        &self.0
    }
    pub fn into_states(self) -> Vec<PuzzleState> {
        self.0
    }
}

impl Deref for Path {
    type Target = [PuzzleState];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Writes the step-indexed trace, one `"{step}: {state}"` line per state.
impl Display for Path {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        for (step, state) in self.0.iter().enumerate() {
            writeln!(f, "{}: {}", step, state)?;
        }
        Ok(())
    }
}

/// How a search ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Solved(Path),
    /// The whole reachable space was explored without meeting the goal.
    NoSolutionFound,
    /// An incomplete strategy ran out of candidates. Says nothing about
    /// reachability.
    Stalled,
    DeadlineExceeded,
}

impl Outcome {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Outcome::Solved(path) => Some(path),
            _ => None,
        }
    }
    pub fn is_solved(&self) -> bool {
        matches!(self, Outcome::Solved(_))
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            Outcome::Solved(path) => write!(f, "solved in {} moves", path.moves()),
            Outcome::NoSolutionFound => write!(f, "no solution exists"),
            Outcome::Stalled => write!(f, "search stalled"),
            Outcome::DeadlineExceeded => write!(f, "deadline exceeded"),
        }
    }
}

/// Counters a strategy fills in while it runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// States whose successors were generated.
    pub expanded: usize,
    /// Successor states produced, duplicates included.
    pub generated: usize,
    /// Rounds of the time-boxed beam that fell back to visited states.
    pub fallbacks: usize,
    /// Rounds of the time-boxed beam that restarted from the initial state.
    pub restarts: usize,
}

/// The result of one solve call.
#[derive(Clone, Debug)]
pub struct Report {
    pub strategy: &'static str,
    pub outcome: Outcome,
    pub elapsed: Duration,
    pub stats: SearchStats,
    /// Only set by strategies that prove their solution uses the fewest moves.
    pub proven_minimal: bool,
}

impl Report {
    pub fn path(&self) -> Option<&Path> {
        self.outcome.path()
    }
    pub fn moves(&self) -> Option<usize> {
        self.path().map(Path::moves)
    }
}

/// An optional wall-clock instant after which searches give up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Deadline(Option<Instant>);

impl Deadline {
    pub fn none() -> Deadline {
        Deadline(None)
    }
    pub fn at(instant: Instant) -> Deadline {
        Deadline(Some(instant))
    }
    pub fn after(budget: Duration) -> Deadline {
        Deadline(Instant::now().checked_add(budget))
    }
    pub fn instant(&self) -> Option<Instant> {
        self.0
    }
    pub fn expired(&self) -> bool {
        match self.0 {
            Some(instant) => Instant::now() >= instant,
            None => false,
        }
    }
    /// The earlier of the two deadlines.
    pub fn min(self, other: Deadline) -> Deadline {
        match (self.0, other.0) {
            (Some(a), Some(b)) => Deadline(Some(a.min(b))),
            (a, b) => Deadline(a.or(b)),
        }
    }
}

/// One search strategy over the split/merge state graph.
///
/// Implementors provide [`Solver::explore`]; callers use [`Solver::solve`],
/// which handles degenerate puzzles, timing and logging. All randomness comes
/// from `rng`, so a seeded generator makes a run reproducible.
pub trait Solver {
    fn name(&self) -> &'static str;

    /// Whether a solution from this strategy is guaranteed to use the fewest
    /// moves.
    fn proves_minimal(&self) -> bool {
        false
    }

    fn explore(
        &self,
        puzzle: &Puzzle,
        rng: &mut dyn RngCore,
        deadline: Deadline,
        stats: &mut SearchStats,
    ) -> Outcome;

    fn solve(&self, puzzle: &Puzzle, rng: &mut dyn RngCore, deadline: Deadline) -> Report {
        let now = Instant::now();
        let mut stats = SearchStats::default();
        debug!(strategy = self.name(), %puzzle, "starting search");
        let outcome = if puzzle.is_degenerate() {
            Outcome::NoSolutionFound
        } else {
            self.explore(puzzle, rng, deadline, &mut stats)
        };
        let elapsed = now.elapsed();
        info!(
            strategy = self.name(),
            %outcome,
            expanded = stats.expanded,
            elapsed_ms = elapsed.as_millis() as u64,
            "search finished"
        );
        let proven_minimal = outcome.is_solved() && self.proves_minimal();
        return Report {
            strategy: self.name(),
            outcome,
            elapsed,
            stats,
            proven_minimal,
        };
    }
}

impl<S: Solver + ?Sized> Solver for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }
    fn proves_minimal(&self) -> bool {
        (**self).proves_minimal()
    }
    fn explore(
        &self,
        puzzle: &Puzzle,
        rng: &mut dyn RngCore,
        deadline: Deadline,
        stats: &mut SearchStats,
    ) -> Outcome {
        (**self).explore(puzzle, rng, deadline, stats)
    }
}
