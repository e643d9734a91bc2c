pub mod constants;
pub mod errors;
pub mod game;
pub mod solver;
pub mod trace;

pub use errors::{InvalidInputError, SolverError};
pub use game::{Move, Puzzle, PuzzleState};
pub use solver::{Deadline, Outcome, Path, Report, Solver, SolverConfig, Strategy};
