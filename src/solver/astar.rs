use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use rand::{Rng, RngCore};

use super::heuristic::cost;
use super::trail::{Link, Trail};
use super::{Deadline, Outcome, SearchStats, Solver};
use crate::game::{Puzzle, PuzzleState};

/// Best-first search on `g + h` with the positional mismatch heuristic.
#[derive(Clone, Copy, Debug, Default)]
pub struct AStar;

impl AStar {
    /// Searches from an arbitrary `start`; the returned path begins there.
    pub fn search_from(
        &self,
        puzzle: &Puzzle,
        start: &PuzzleState,
        deadline: Deadline,
        stats: &mut SearchStats,
    ) -> Outcome {
        informed(puzzle, start, &mut || 0.0, deadline, stats)
    }
}

impl Solver for AStar {
    fn name(&self) -> &'static str {
        "a-star"
    }

    fn explore(
        &self,
        puzzle: &Puzzle,
        _rng: &mut dyn RngCore,
        deadline: Deadline,
        stats: &mut SearchStats,
    ) -> Outcome {
        self.search_from(puzzle, puzzle.initial(), deadline, stats)
    }
}

/// A* with a uniform offset in `[0, randomness)` added to every pushed
/// priority. The offset only reorders the frontier; the search stays complete.
#[derive(Clone, Copy, Debug)]
pub struct RandomizedAStar {
    pub randomness: f64,
}

impl Solver for RandomizedAStar {
    fn name(&self) -> &'static str {
        "randomized-a-star"
    }

    fn explore(
        &self,
        puzzle: &Puzzle,
        rng: &mut dyn RngCore,
        deadline: Deadline,
        stats: &mut SearchStats,
    ) -> Outcome {
        let randomness = self.randomness;
        let mut jitter = || {
            if randomness > 0.0 {
                rng.gen_range(0.0..randomness)
            } else {
                0.0
            }
        };
        informed(puzzle, puzzle.initial(), &mut jitter, deadline, stats)
    }
}

#[derive(Debug)]
struct Candidate {
    priority: f64,
    steps: usize,
    link: Link,
}

// BinaryHeap is a max-heap: the greatest candidate has the lowest priority,
// then the fewest steps, then the earliest push.
impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.steps.cmp(&self.steps))
            .then_with(|| other.link.cmp(&self.link))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

/// Shared A* loop. States are closed when popped, not when pushed, so a state
/// may sit in the frontier several times; only its first pop is expanded.
fn informed(
    puzzle: &Puzzle,
    start: &PuzzleState,
    jitter: &mut dyn FnMut() -> f64,
    deadline: Deadline,
    stats: &mut SearchStats,
) -> Outcome {
    let mut trail = Trail::new();
    let mut closed = HashSet::new();
    let mut frontier = BinaryHeap::new();
    frontier.push(Candidate {
        priority: 0.0,
        steps: 0,
        link: trail.root(start.clone()),
    });
    while let Some(Candidate { steps, link, .. }) = frontier.pop() {
        if deadline.expired() {
            return Outcome::DeadlineExceeded;
        }
        let state = trail.state(link);
        if puzzle.is_goal(state) {
            return Outcome::Solved(trail.path_to(link));
        }
        if !closed.insert(state.clone()) {
            continue;
        }
        let successors = puzzle.successors(state);
        stats.expanded += 1;
        stats.generated += successors.len();
        for (_, next) in successors {
            if closed.contains(&next) {
                continue;
            }
            let priority = cost(puzzle, &next, steps + 1) as f64 + jitter();
            frontier.push(Candidate {
                priority,
                steps: steps + 1,
                link: trail.push(next, Some(link)),
            });
        }
    }
    return Outcome::NoSolutionFound;
}
