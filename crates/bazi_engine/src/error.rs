//! Error types for chart arrangement and engine configuration.

use std::path::PathBuf;

use bazi_almanac::AlmanacError;
use bazi_time::TimeError;
use thiserror::Error;

/// Errors surfaced by [`Engine::arrange`](crate::Engine::arrange).
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum EngineError {
    /// The birth literal is not `YYYY-MM-DD HH:MM:SS`.
    #[error("invalid birth literal {literal:?}: expected YYYY-MM-DD HH:MM:SS")]
    InvalidDateFormat { literal: String },
    /// A fixed table has no entry for a key the primitive handed back.
    #[error("no {table} entry for {key}")]
    MissingLookupEntry { table: &'static str, key: String },
    /// Explicit coordinates are not finite or out of range.
    #[error("invalid coordinates: longitude {longitude}, latitude {latitude}")]
    InvalidCoordinates { longitude: f64, latitude: f64 },
    /// An expansion range runs backwards.
    #[error("invalid year range {from}..={to}")]
    InvalidYearRange { from: i32, to: i32 },
    /// A timestamp left the representable range during correction.
    #[error("time correction failed: {0}")]
    Time(TimeError),
    #[error(transparent)]
    Almanac(#[from] AlmanacError),
}

impl From<TimeError> for EngineError {
    fn from(err: TimeError) -> Self {
        match err {
            TimeError::InvalidDateFormat { literal } => Self::InvalidDateFormat { literal },
            other => Self::Time(other),
        }
    }
}

/// Errors loading an [`EngineConfig`](crate::EngineConfig).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_format_error_maps_to_invalid_date_format() {
        let err: EngineError = TimeError::InvalidDateFormat {
            literal: "x".into(),
        }
        .into();
        assert_eq!(
            err,
            EngineError::InvalidDateFormat {
                literal: "x".into()
            }
        );
        let err: EngineError = TimeError::OutOfRange.into();
        assert!(matches!(err, EngineError::Time(TimeError::OutOfRange)));
    }
}
