use std::fmt::{Display, Error, Formatter};
use std::fs;
use std::path::Path;
use std::time::Duration;

use clap::ValueEnum;
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;
use serde::{Deserialize, Serialize};

use super::{
    AStar, BreadthFirst, Deadline, ProbabilisticBeam, RandomWalkAStar, RandomizedAStar, Report,
    Solver, TimeBoxedBeam,
};
use crate::constants::*;
use crate::errors::SolverError;
use crate::game::Puzzle;

/// The available strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    BreadthFirst,
    AStar,
    RandomizedAStar,
    ProbabilisticBeam,
    RandomWalk,
    TimeBoxedBeam,
}

impl Strategy {
    pub const ALL: [Strategy; 6] = [
        Strategy::BreadthFirst,
        Strategy::AStar,
        Strategy::RandomizedAStar,
        Strategy::ProbabilisticBeam,
        Strategy::RandomWalk,
        Strategy::TimeBoxedBeam,
    ];
}

impl Display for Strategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        let name = match self {
            Strategy::BreadthFirst => "breadth-first",
            Strategy::AStar => "a-star",
            Strategy::RandomizedAStar => "randomized-a-star",
            Strategy::ProbabilisticBeam => "probabilistic-beam",
            Strategy::RandomWalk => "random-walk",
            Strategy::TimeBoxedBeam => "time-boxed-beam",
        };
        write!(f, "{}", name)
    }
}

/// Parameters for every strategy. Each strategy reads only its own fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Beam size of the probabilistic beam search.
    pub beam_width: usize,
    /// Softmax temperature of the probabilistic beam search.
    pub temperature: f64,
    /// Upper bound of the priority offset in randomized A*.
    pub randomness: f64,
    /// Length of each random walk.
    pub random_steps: usize,
    /// Number of random walks.
    pub attempts: usize,
    /// Beam size of the time-boxed beam search.
    pub time_boxed_beam_width: usize,
    /// Time budget of the time-boxed beam search.
    pub max_time_seconds: f64,
    /// Optional wall-clock limit applied to every strategy.
    pub deadline_seconds: Option<f64>,
    pub seed: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            beam_width: DEFAULT_BEAM_WIDTH,
            temperature: DEFAULT_TEMPERATURE,
            randomness: DEFAULT_RANDOMNESS,
            random_steps: DEFAULT_RANDOM_STEPS,
            attempts: DEFAULT_ATTEMPTS,
            time_boxed_beam_width: DEFAULT_TIME_BOXED_BEAM_WIDTH,
            max_time_seconds: DEFAULT_MAX_TIME.as_secs_f64(),
            deadline_seconds: None,
            seed: DEFAULT_SEED,
        }
    }
}

impl SolverConfig {
    pub fn from_json(json: &str) -> Result<SolverConfig, SolverError> {
        let config: SolverConfig = serde_json::from_str(json)?;
        config.validate()?;
        return Ok(config);
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<SolverConfig, SolverError> {
        let json = fs::read_to_string(path)?;
        SolverConfig::from_json(&json)
    }

    /// Checks every parameter range, whichever strategy will read it.
    pub fn validate(&self) -> Result<(), SolverError> {
        if self.beam_width < 1 {
            return Err(SolverError::config("beam_width", "must be at least 1"));
        }
        if self.time_boxed_beam_width < 1 {
            return Err(SolverError::config(
                "time_boxed_beam_width",
                "must be at least 1",
            ));
        }
        if !(self.temperature > 0.0 && self.temperature.is_finite()) {
            return Err(SolverError::config(
                "temperature",
                format!("must be a positive number, got {}", self.temperature),
            ));
        }
        if !(self.randomness >= 0.0 && self.randomness.is_finite()) {
            return Err(SolverError::config(
                "randomness",
                format!("must be zero or more, got {}", self.randomness),
            ));
        }
        if self.attempts < 1 {
            return Err(SolverError::config("attempts", "must be at least 1"));
        }
        seconds("max_time_seconds", self.max_time_seconds)?;
        if let Some(limit) = self.deadline_seconds {
            seconds("deadline_seconds", limit)?;
        }
        Ok(())
    }

    pub fn max_time(&self) -> Duration {
        Duration::try_from_secs_f64(self.max_time_seconds).unwrap_or(Duration::MAX)
    }

    /// A deadline starting now, if a global limit is configured.
    pub fn deadline(&self) -> Deadline {
        match self.deadline_seconds {
            Some(limit) => Deadline::after(
                Duration::try_from_secs_f64(limit).unwrap_or(Duration::MAX),
            ),
            None => Deadline::none(),
        }
    }

    pub fn solver(&self, strategy: Strategy) -> Box<dyn Solver + Send + Sync> {
        match strategy {
            Strategy::BreadthFirst => Box::new(BreadthFirst),
            Strategy::AStar => Box::new(AStar),
            Strategy::RandomizedAStar => Box::new(RandomizedAStar {
                randomness: self.randomness,
            }),
            Strategy::ProbabilisticBeam => Box::new(ProbabilisticBeam {
                beam_width: self.beam_width,
                temperature: self.temperature,
            }),
            Strategy::RandomWalk => Box::new(RandomWalkAStar {
                random_steps: self.random_steps,
                attempts: self.attempts,
            }),
            Strategy::TimeBoxedBeam => {
                Box::new(TimeBoxedBeam::new(self.time_boxed_beam_width, self.max_time()))
            }
        }
    }

    /// Validates the parameters, then solves `puzzle` with `strategy` using a
    /// generator seeded from `seed`.
    pub fn run(&self, strategy: Strategy, puzzle: &Puzzle) -> Result<Report, SolverError> {
        self.validate()?;
        let mut rng = Pcg64Mcg::seed_from_u64(self.seed);
        let solver = self.solver(strategy);
        Ok(solver.solve(puzzle, &mut rng, self.deadline()))
    }
}

fn seconds(field: &'static str, value: f64) -> Result<(), SolverError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(SolverError::config(
            field,
            format!("must be a positive number of seconds, got {}", value),
        ))
    }
}
