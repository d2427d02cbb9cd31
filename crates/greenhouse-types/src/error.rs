//! Error types for data parsing in greenhouse-types.

use thiserror::Error;

/// Errors that can occur when interpreting sensor data.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    /// A timestamp string is not a valid RFC 3339 / ISO-8601 instant.
    #[error("Invalid timestamp '{value}': {reason}")]
    InvalidTimestamp {
        /// The offending input.
        value: String,
        /// Why parsing failed.
        reason: String,
    },

    /// A reading carries values that cannot be displayed or aggregated.
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Result type alias using greenhouse-types' ParseError type.
pub type ParseResult<T> = std::result::Result<T, ParseError>;
