use std::collections::{HashSet, VecDeque};

use rand::RngCore;

use super::trail::Trail;
use super::{Deadline, Outcome, SearchStats, Solver};
use crate::game::Puzzle;

/// Breadth-first search. Every edge costs one move, so the first goal
/// dequeued lies on a shortest path.
#[derive(Clone, Copy, Debug, Default)]
pub struct BreadthFirst;

impl Solver for BreadthFirst {
    fn name(&self) -> &'static str {
        "breadth-first"
    }

    fn proves_minimal(&self) -> bool {
        true
    }

    fn explore(
        &self,
        puzzle: &Puzzle,
        _rng: &mut dyn RngCore,
        deadline: Deadline,
        stats: &mut SearchStats,
    ) -> Outcome {
        let mut trail = Trail::new();
        let mut visited = HashSet::new();
        let mut frontier = VecDeque::new();
        visited.insert(puzzle.initial().clone());
        frontier.push_back(trail.root(puzzle.initial().clone()));
        while let Some(link) = frontier.pop_front() {
            if deadline.expired() {
                return Outcome::DeadlineExceeded;
            }
            let state = trail.state(link);
            if puzzle.is_goal(state) {
                return Outcome::Solved(trail.path_to(link));
            }
            let successors = puzzle.successors(state);
            stats.expanded += 1;
            stats.generated += successors.len();
            for (_, next) in successors {
                // marked on enqueue so no state is queued twice
                if visited.insert(next.clone()) {
                    frontier.push_back(trail.push(next, Some(link)));
                }
            }
        }
        return Outcome::NoSolutionFound;
    }
}
