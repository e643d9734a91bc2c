use std::collections::HashSet;

use rand::seq::{index, SliceRandom};
use rand::RngCore;
use tracing::trace;

use super::heuristic::cost;
use super::trail::{Link, Trail};
use super::{Deadline, Outcome, SearchStats, Solver};
use crate::game::{Puzzle, PuzzleState};

/// Beam search that samples its next beam from a softmax over child costs
/// instead of keeping the best children.
///
/// The beam prunes most of the space, so running out of candidates ends the
/// search with [`Outcome::Stalled`] rather than a proof of unreachability.
#[derive(Clone, Copy, Debug)]
pub struct ProbabilisticBeam {
    pub beam_width: usize,
    pub temperature: f64,
}

struct Child {
    cost: usize,
    steps: usize,
    state: PuzzleState,
    parent: Link,
}

impl Solver for ProbabilisticBeam {
    fn name(&self) -> &'static str {
        "probabilistic-beam"
    }

    fn explore(
        &self,
        puzzle: &Puzzle,
        rng: &mut dyn RngCore,
        deadline: Deadline,
        stats: &mut SearchStats,
    ) -> Outcome {
        let mut trail = Trail::new();
        let mut visited = HashSet::new();
        let mut beam = vec![(0, trail.root(puzzle.initial().clone()))];
        let mut round = 0;
        loop {
            if deadline.expired() {
                return Outcome::DeadlineExceeded;
            }
            let mut children = Vec::new();
            for &(steps, link) in beam.iter() {
                let state = trail.state(link);
                if puzzle.is_goal(state) {
                    return Outcome::Solved(trail.path_to(link));
                }
                if !visited.insert(state.clone()) {
                    continue;
                }
                let successors = puzzle.successors(state);
                stats.expanded += 1;
                stats.generated += successors.len();
                for (_, next) in successors {
                    if visited.contains(&next) {
                        continue;
                    }
                    children.push(Child {
                        cost: cost(puzzle, &next, steps + 1),
                        steps: steps + 1,
                        state: next,
                        parent: link,
                    });
                }
            }
            if children.is_empty() {
                return Outcome::Stalled;
            }
            let costs: Vec<f64> = children.iter().map(|child| child.cost as f64).collect();
            let probabilities = softmax(&costs, self.temperature);
            let picks = sample_without_replacement(&probabilities, self.beam_width, rng);
            trace!(round, candidates = children.len(), kept = picks.len(), "beam round");

            let mut slots: Vec<Option<Child>> = children.into_iter().map(Some).collect();
            beam = picks
                .into_iter()
                .filter_map(|index| slots[index].take())
                .map(|child| (child.steps, trail.push(child.state, Some(child.parent))))
                .collect();
            round += 1;
        }
    }
}

/// `p_i = exp(-cost_i / temperature) / Σ exp(-cost_j / temperature)`.
///
/// The lowest cost is subtracted first, which leaves the distribution
/// unchanged and keeps at least one weight at exactly one.
pub fn softmax(costs: &[f64], temperature: f64) -> Vec<f64> {
    let lowest = costs.iter().copied().fold(f64::INFINITY, f64::min);
    let weights: Vec<f64> = costs
        .iter()
        .map(|cost| (-(cost - lowest) / temperature).exp())
        .collect();
    let total: f64 = weights.iter().sum();
    weights.into_iter().map(|weight| weight / total).collect()
}

/// Draws `min(amount, probabilities.len())` distinct indices, each draw
/// weighted by the probabilities of the indices not yet drawn. The order of the
/// returned indices carries no meaning.
pub fn sample_without_replacement(
    probabilities: &[f64],
    amount: usize,
    rng: &mut dyn RngCore,
) -> Vec<usize> {
    let indices: Vec<usize> = (0..probabilities.len()).collect();
    match indices.choose_multiple_weighted(&mut *rng, amount, |&i| probabilities[i]) {
        Ok(picks) => picks.copied().collect(),
        // negative or NaN weights are rejected
        Err(_) => index::sample(rng, indices.len(), amount.min(indices.len())).into_vec(),
    }
}
