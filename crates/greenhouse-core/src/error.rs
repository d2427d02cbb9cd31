//! Error types for greenhouse-core.
//!
//! Very little in the pipeline can fail. Bad input from the feed is logged
//! and discarded by the store (see [`crate::store::AppendOutcome`]), an
//! out-of-range page request is ignored, and an unparseable timestamp only
//! affects sort position. The variants below cover configuration mistakes and
//! explicit decoding requests.
//!
//! | Error | Raised by |
//! |-------|-----------|
//! | [`Error::InvalidConfig`] | `FeedOptions::validate`, `ControllerOptions::validate` |
//! | [`Error::Parse`] | Reading validation and timestamp parsing |
//! | [`Error::Json`] | [`crate::store::decode_batch`] |
//! | [`Error::Cancelled`] | Operations on a cancelled feed |

use thiserror::Error;

use greenhouse_types::ParseError;

/// Errors that can occur in the dashboard pipeline.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Configuration values are out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A reading or timestamp could not be interpreted.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A raw batch was not valid JSON or not an array of readings.
    #[error("Malformed batch: {0}")]
    Json(#[from] serde_json::Error),

    /// The feed was cancelled.
    #[error("Feed was cancelled")]
    Cancelled,
}

/// Result type alias using greenhouse-core's Error type.
pub type Result<T> = std::result::Result<T, Error>;
