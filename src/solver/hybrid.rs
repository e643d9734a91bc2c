use std::collections::HashSet;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use std::time::Duration;

use rand::seq::{index, SliceRandom};
use rand::{Rng, RngCore};
use tracing::{debug, trace};

use super::astar::AStar;
use super::heuristic::DistanceEstimator;
use super::trail::{Link, Trail};
use super::{Deadline, Outcome, Path, SearchStats, Solver};
use crate::constants::FALLBACK_SEEDS;
use crate::game::{Puzzle, PuzzleState};

/// Walks `steps` uniformly chosen legal moves from the initial state. The walk
/// stops early at a state without successors. The returned states start with
/// the initial state and end with the vantage state.
pub fn random_walk(
    puzzle: &Puzzle,
    steps: usize,
    rng: &mut dyn RngCore,
    stats: &mut SearchStats,
) -> Vec<PuzzleState> {
    let mut walk = vec![puzzle.initial().clone()];
    for _ in 0..steps {
        let current = &walk[walk.len() - 1];
        let successors = puzzle.successors(current);
        stats.expanded += 1;
        stats.generated += successors.len();
        match successors.choose(rng) {
            Some((_, next)) => walk.push(next.clone()),
            None => break,
        }
    }
    return walk;
}

/// Runs `attempts` random walks and finishes each one with A* from where the
/// walk ended, keeping the shortest combined path.
#[derive(Clone, Copy, Debug)]
pub struct RandomWalkAStar {
    pub random_steps: usize,
    pub attempts: usize,
}

impl Solver for RandomWalkAStar {
    fn name(&self) -> &'static str {
        "random-walk-a-star"
    }

    fn explore(
        &self,
        puzzle: &Puzzle,
        rng: &mut dyn RngCore,
        deadline: Deadline,
        stats: &mut SearchStats,
    ) -> Outcome {
        let mut best: Option<Path> = None;
        let mut timed_out = false;
        for attempt in 0..self.attempts {
            if deadline.expired() {
                timed_out = true;
                break;
            }
            let mut walk = random_walk(puzzle, self.random_steps, rng, stats);
            if let Some(hit) = walk.iter().position(|state| puzzle.is_goal(state)) {
                walk.truncate(hit + 1);
                return Outcome::Solved(Path::new(walk));
            }
            let vantage = walk[walk.len() - 1].clone();
            match AStar.search_from(puzzle, &vantage, deadline, stats) {
                Outcome::Solved(tail) => {
                    walk.extend(tail.into_states().into_iter().skip(1));
                    let candidate = Path::new(walk);
                    debug!(attempt, %vantage, moves = candidate.moves(), "attempt solved");
                    if best.as_ref().map_or(true, |b| candidate.moves() < b.moves()) {
                        best = Some(candidate);
                    }
                }
                Outcome::DeadlineExceeded => {
                    timed_out = true;
                    break;
                }
                _ => debug!(attempt, %vantage, "attempt failed"),
            }
        }
        match best {
            Some(path) => Outcome::Solved(path),
            None if timed_out => Outcome::DeadlineExceeded,
            // splits only ever put the smaller part first, so moves are not
            // always reversible and a failed vantage state proves nothing about
            // the initial state
            None => Outcome::Stalled,
        }
    }
}

/// Beam search that never gives up before its time budget runs out.
///
/// Each round ranks the frontier, keeps the best `beam_width` entries and
/// expands them. A round that produces nothing falls back to expanding up to
/// five random visited states; if that produces nothing too, the frontier
/// restarts from the initial state.
#[derive(Clone)]
pub struct TimeBoxedBeam {
    pub beam_width: usize,
    pub max_time: Duration,
    estimator: Option<Arc<dyn DistanceEstimator>>,
}

impl TimeBoxedBeam {
    pub fn new(beam_width: usize, max_time: Duration) -> TimeBoxedBeam {
        TimeBoxedBeam {
            beam_width,
            max_time,
            estimator: None,
        }
    }

    /// Ranks frontier states with `estimator` instead of length plus a random
    /// tie-break.
    pub fn with_estimator(mut self, estimator: Arc<dyn DistanceEstimator>) -> TimeBoxedBeam {
        self.estimator = Some(estimator);
        self
    }

    fn rank(&self, puzzle: &Puzzle, state: &PuzzleState, rng: &mut dyn RngCore) -> f64 {
        match &self.estimator {
            Some(estimator) => estimator.estimate(puzzle, state),
            None => state.len() as f64 + rng.gen::<f64>(),
        }
    }
}

impl Debug for TimeBoxedBeam {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimeBoxedBeam")
            .field("beam_width", &self.beam_width)
            .field("max_time", &self.max_time)
            .field("estimator", &self.estimator.is_some())
            .finish()
    }
}

/// Pushes the unvisited successors of `link`, in random order, onto `out`.
fn expand(
    puzzle: &Puzzle,
    link: Link,
    trail: &mut Trail,
    visited: &mut HashSet<PuzzleState>,
    rng: &mut dyn RngCore,
    stats: &mut SearchStats,
    out: &mut Vec<Link>,
) {
    let mut successors = puzzle.successors(trail.state(link));
    successors.shuffle(rng);
    stats.expanded += 1;
    stats.generated += successors.len();
    for (_, next) in successors {
        if visited.insert(next.clone()) {
            out.push(trail.push(next, Some(link)));
        }
    }
}

impl Solver for TimeBoxedBeam {
    fn name(&self) -> &'static str {
        "time-boxed-beam"
    }

    fn explore(
        &self,
        puzzle: &Puzzle,
        rng: &mut dyn RngCore,
        deadline: Deadline,
        stats: &mut SearchStats,
    ) -> Outcome {
        let deadline = deadline.min(Deadline::after(self.max_time));
        let mut trail = Trail::new();
        let mut visited = HashSet::new();
        visited.insert(puzzle.initial().clone());
        let root = trail.root(puzzle.initial().clone());
        let mut frontier = vec![root];
        let mut round: usize = 0;
        while !deadline.expired() {
            round += 1;
            let mut ranked: Vec<(f64, Link)> = frontier
                .iter()
                .map(|&link| (self.rank(puzzle, trail.state(link), rng), link))
                .collect();
            ranked.sort_by(|a, b| a.0.total_cmp(&b.0));
            ranked.truncate(self.beam_width);

            let mut next = Vec::new();
            for &(_, link) in ranked.iter() {
                expand(puzzle, link, &mut trail, &mut visited, rng, stats, &mut next);
            }
            trace!(round, kept = ranked.len(), produced = next.len(), "beam round");

            if next.is_empty() {
                stats.fallbacks += 1;
                let seeds = index::sample(rng, trail.len(), FALLBACK_SEEDS.min(trail.len()));
                for seed in seeds.into_iter() {
                    expand(puzzle, seed, &mut trail, &mut visited, rng, stats, &mut next);
                }
                if next.is_empty() {
                    stats.restarts += 1;
                    debug!(round, "stagnant, restarting from the initial state");
                    frontier = vec![root];
                    continue;
                }
                debug!(round, produced = next.len(), "stagnant, expanded visited states");
            }
            // checked before truncation, a visited goal is never produced again
            if let Some(&goal) = next.iter().find(|&&link| puzzle.is_goal(trail.state(link))) {
                return Outcome::Solved(trail.path_to(goal));
            }
            frontier = next;
        }
        return Outcome::DeadlineExceeded;
    }
}
