use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// `line` is 1-based.
    #[error("cannot parse line {line}: {reason}")]
    Parse { line: usize, reason: String },

    /// A standalone token that failed to parse outside any input line.
    #[error("{0}")]
    InvalidToken(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("invalid orbit map: {0}")]
    InvariantViolation(String),

    #[error("memory sum does not fit in 64 bits")]
    SumOverflow,

    #[error("no puzzle for day {day} part {part}")]
    UnknownPuzzle { day: u8, part: u8 },
}

impl Error {
    pub(crate) fn parse(line: usize, reason: impl Into<String>) -> Self {
        Error::Parse { line, reason: reason.into() }
    }

    /// Anchors a token error onto the input line the token came from.
    pub(crate) fn at_line(self, line: usize) -> Self {
        match self {
            Error::InvalidToken(reason) => Error::Parse { line, reason },
            other => other,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
