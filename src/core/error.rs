//! Cueforge Error Definitions
//!
//! Defines error types used at the engine's boundaries.
//!
//! The editing engine itself favors silent normalization over errors:
//! out-of-range values are clamped, invalid colors and fonts fall back to
//! defaults, and malformed split/merge requests are no-ops. The only
//! fallible surface is the project document boundary, where a persisted
//! document that does not match the expected shape must be rejected.

use thiserror::Error;

/// Engine error types
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Project document corrupted: {0}")]
    DocumentCorrupted(String),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Engine result type
pub type EngineResult<T> = Result<T, EngineError>;
