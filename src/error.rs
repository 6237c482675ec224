//! Crate-level error type

use crate::decode::DecodeError;
use crate::matchers::MatchError;

/// Errors surfaced by decoding and matching
#[derive(Debug)]
pub enum Error {
    /// The stream could not be decoded
    Decode(DecodeError),
    /// A matcher could not decode its input
    Match(MatchError),
    /// A matcher decoded its input but the predicate failed
    Mismatch {
        matcher: &'static str,
        message: String,
    },
}

/// Result alias using the crate error type
pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Decode(e) => write!(f, "{}", e),
            Error::Match(e) => write!(f, "{}", e),
            Error::Mismatch { matcher, message } => write!(f, "{} failed:\n{}", matcher, message),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Decode(e) => Some(e),
            Error::Match(e) => Some(e),
            Error::Mismatch { .. } => None,
        }
    }
}

impl From<DecodeError> for Error {
    fn from(e: DecodeError) -> Self {
        Error::Decode(e)
    }
}

impl From<MatchError> for Error {
    fn from(e: MatchError) -> Self {
        Error::Match(e)
    }
}
