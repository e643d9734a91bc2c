use thiserror::Error;

/// Rejections raised while building a puzzle, before any search runs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidInputError {
    #[error("the initial sequence is empty")]
    Empty,
    #[error("{0} is not a positive integer")]
    NonPositive(i64),
    #[error("{0:?} is not an integer")]
    NotAnInteger(String),
    #[error("{0} appears more than once")]
    Duplicate(i64),
    #[error("{0} does not fit in a puzzle value")]
    TooLarge(i64),
}

#[derive(Error, Debug)]
pub enum SolverError {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),
    #[error("invalid {field}: {reason}")]
    InvalidConfig { field: &'static str, reason: String },
    #[error("unable to read config: {0}")]
    IOError(#[from] std::io::Error),
    #[error("unable to parse config: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("bad trace line {line}: {reason}")]
    Trace { line: usize, reason: String },
}

impl SolverError {
    pub(crate) fn config(field: &'static str, reason: impl Into<String>) -> Self {
        SolverError::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}
