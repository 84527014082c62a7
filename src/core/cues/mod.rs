//! Subtitle Cue System
//!
//! Data models for time-aligned subtitle cues and the stateless engine
//! that edits them.
//!
//! # Overview
//!
//! Cues in Cueforge support:
//! - Optional word-level timing for per-word animation
//! - Start-inclusive / end-exclusive visibility queries
//! - Split, merge, shift, overlap and gap algorithms
//!
//! All engine operations are copy-on-write: the input slice is never
//! mutated and callers may keep references to prior cue collections.

mod engine;
mod models;

pub use engine::{cues_from_words, sanitize_cue_text, CueGap, IdGenerator, SubtitleEngine, UlidGenerator};
pub use models::{AnimationStyle, CueInit, CuePatch, SubtitleCue, SubtitleWord};

pub(crate) use models::{double_opt, lenient_opt};
