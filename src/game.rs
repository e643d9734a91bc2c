pub mod puzzle;
pub mod state;

pub use puzzle::Puzzle;
pub use state::{Move, PuzzleState};

/// Element type of puzzle sequences.
pub type Value = u32;

#[cfg(test)]
mod tests;
