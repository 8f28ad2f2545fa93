//! Error types for birth-time handling.

use thiserror::Error;

/// Errors from parsing or shifting civil timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TimeError {
    /// The literal is not `YYYY-MM-DD HH:MM:SS` or names an impossible date.
    #[error("invalid date literal {literal:?}: expected YYYY-MM-DD HH:MM:SS")]
    InvalidDateFormat { literal: String },
    /// A shift moved the timestamp outside the representable range.
    #[error("timestamp out of range after applying offset")]
    OutOfRange,
}
