//! Error types for the calendar primitive.

use bazi_time::TimeError;
use thiserror::Error;

/// Errors from calendar conversion and pillar lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum AlmanacError {
    /// The lunisolar date does not exist (month, leap flag or day out of range).
    #[error("lunar date {year}-{prefix}{month}-{day} does not exist", prefix = leap_prefix(.leap))]
    InvalidLunarDate {
        year: i32,
        month: u8,
        leap: bool,
        day: u8,
    },
    /// Year outside the range the solar and lunar series are evaluated over.
    #[error("year {0} outside supported range {min}..={max}", min = crate::MIN_YEAR, max = crate::MAX_YEAR)]
    YearOutOfRange(i32),
    /// A root search failed to bracket or converge.
    #[error("search did not converge: {0}")]
    NoConvergence(&'static str),
    #[error(transparent)]
    Time(#[from] TimeError),
}

fn leap_prefix(leap: &bool) -> &'static str {
    if *leap { "闰" } else { "" }
}
