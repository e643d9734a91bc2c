use std::time::Duration;

// defaults for the strategy parameters
pub const DEFAULT_BEAM_WIDTH: usize = 5;
pub const DEFAULT_TEMPERATURE: f64 = 1.0;
pub const DEFAULT_RANDOMNESS: f64 = 0.1;
pub const DEFAULT_RANDOM_STEPS: usize = 3;
pub const DEFAULT_ATTEMPTS: usize = 5;
pub const DEFAULT_TIME_BOXED_BEAM_WIDTH: usize = 10;
pub const DEFAULT_MAX_TIME: Duration = Duration::from_secs(30);
pub const DEFAULT_SEED: u64 = 1337;

/// Visited states sampled for fallback expansions when the time-boxed beam stalls.
pub const FALLBACK_SEEDS: usize = 5;

// reference instances
pub const PUZZLE_539: [i64; 3] = [5, 3, 9];
pub const PUZZLE_539_OPTIMUM: usize = 4;
pub const PUZZLE_851: [i64; 3] = [8, 5, 1];
pub const PUZZLE_851_GOAL: [u32; 3] = [1, 5, 8];
pub const PUZZLE_495: [i64; 3] = [4, 9, 5];
pub const PUZZLE_31279: [i64; 4] = [3, 12, 7, 9];
/// `[2, 1, 3, 4]`, one split away, has no successor that was not already one
/// move from the start.
pub const PUZZLE_217: [i64; 3] = [2, 1, 7];
/// No split or merge is legal from `[1, 2]`.
pub const PUZZLE_STUCK: [i64; 2] = [1, 2];
