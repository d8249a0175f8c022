use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranqError {
    #[error("Invalid pattern spec `{pattern}` for segment `{segment}`: {reason}")]
    InvalidPattern {
        segment: String,
        pattern: String,
        reason: String,
    },

    #[error("Architecture has {order} segment types but {patterns} patterns")]
    ArchitectureMismatch { order: usize, patterns: usize },

    #[error("Architecture must contain at least one segment")]
    EmptyArchitecture,

    #[error("Invalid length range: min ({0}) is greater than max ({1})")]
    InvalidLengthRange(usize, usize),

    #[error("Can't complement base `{0}`")]
    InvalidBase(char),

    #[error("Error parsing reference file {path}: {reason}")]
    ReferenceParseError { path: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TranqError>;
