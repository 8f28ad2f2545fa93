//! Error types for symbol parsing.

use thiserror::Error;

/// Errors from parsing stem/branch/pair symbols.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum BaseError {
    /// The character is not one of the 10 stems.
    #[error("unknown stem symbol: {0}")]
    UnknownStem(String),
    /// The character is not one of the 12 branches.
    #[error("unknown branch symbol: {0}")]
    UnknownBranch(String),
    /// Stem and branch differ in polarity, so the pair never occurs in the cycle.
    #[error("stem {stem} and branch {branch} do not form a sexagenary pair")]
    InvalidPair { stem: char, branch: char },
}
