//! Cueforge Core Type Definitions
//!
//! Defines fundamental types used throughout the engine.

// =============================================================================
// ID Types
// =============================================================================

/// Cue unique identifier (ULID)
pub type CueId = String;

/// Template unique identifier
pub type TemplateId = String;

/// Operation unique identifier (ULID)
pub type OpId = String;

// =============================================================================
// Time Types
// =============================================================================

/// Time in seconds (floating point)
pub type TimeSec = f64;

/// Minimum duration of a cue in seconds.
///
/// Every cue must satisfy `end_time >= start_time + MIN_CUE_DURATION`.
pub const MIN_CUE_DURATION: TimeSec = 0.1;

/// Maximum length of a cue's text, in characters.
pub const MAX_CUE_TEXT_LEN: usize = 500;

/// Returns true if the value is usable as a timeline position.
pub fn is_valid_time_sec(value: TimeSec) -> bool {
    value.is_finite() && value >= 0.0
}
