//! Cue Data Models
//!
//! Defines data structures for subtitle cues and word-level timing.

use serde::{Deserialize, Serialize};

use crate::core::{CueId, TimeSec};

// =============================================================================
// Serde Helpers
// =============================================================================

/// Deserializes an optional enum field leniently: any value outside the
/// fixed set becomes `None` instead of failing the whole document load.
pub(crate) fn lenient_opt<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Deserializes a clearable field into its double-`Option` form.
///
/// Serde only runs this when the key is present, so a missing key stays
/// the outer `None` (untouched), an explicit `null` becomes `Some(None)`
/// (clear), and a value becomes `Some(Some(value))`.
pub(crate) fn double_opt<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// =============================================================================
// Word Timing
// =============================================================================

/// A single word with its time range inside a cue's timeline
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtitleWord {
    /// Word text
    pub text: String,
    /// Start time in seconds
    pub start_time: TimeSec,
    /// End time in seconds
    pub end_time: TimeSec,
}

impl SubtitleWord {
    /// Creates a new word with the given text and timing
    pub fn new(text: &str, start_time: TimeSec, end_time: TimeSec) -> Self {
        Self {
            text: text.to_string(),
            start_time,
            end_time,
        }
    }

    /// Returns true if the word is active at the given time
    pub fn is_active_at(&self, time_sec: TimeSec) -> bool {
        time_sec >= self.start_time && time_sec < self.end_time
    }
}

// =============================================================================
// Animation Styles
// =============================================================================

/// Per-word animation style for a cue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum AnimationStyle {
    /// Static text, no per-word animation
    #[default]
    None,
    /// Active word enlarged and tinted with the highlight color
    WordHighlight,
    /// Only the currently active word is shown
    WordByWord,
    /// Left-to-right per-word fill between highlight and upcoming colors
    Karaoke,
    /// Words pop in with an ease-out-bounce curve at their start time
    Bounce,
    /// Words appear in order, fading in at their start time
    Typewriter,
}

// =============================================================================
// Subtitle Cue
// =============================================================================

/// A single subtitle cue with a time range and text
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtitleCue {
    /// Unique identifier, assigned at creation and immutable
    pub id: CueId,
    /// Start time in seconds
    pub start_time: TimeSec,
    /// End time in seconds (always >= start_time + MIN_CUE_DURATION)
    pub end_time: TimeSec,
    /// Cue text (sanitized, <= 500 chars, may contain line breaks)
    pub text: String,
    /// Optional word-level timing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub words: Option<Vec<SubtitleWord>>,
    /// Optional per-word animation style
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_opt"
    )]
    pub animation_style: Option<AnimationStyle>,
}

impl SubtitleCue {
    /// Creates a new cue with the given id, timing, and text
    pub fn new(id: &str, start_time: TimeSec, end_time: TimeSec, text: &str) -> Self {
        Self {
            id: id.to_string(),
            start_time,
            end_time,
            text: text.to_string(),
            words: None,
            animation_style: None,
        }
    }

    /// Creates a cue with an auto-generated ULID
    pub fn create(start_time: TimeSec, end_time: TimeSec, text: &str) -> Self {
        Self::new(&ulid::Ulid::new().to_string(), start_time, end_time, text)
    }

    /// Returns the duration of this cue in seconds
    pub fn duration(&self) -> TimeSec {
        self.end_time - self.start_time
    }

    /// Returns true if the cue is visible at the given time.
    ///
    /// Start-inclusive, end-exclusive.
    pub fn is_visible_at(&self, time_sec: TimeSec) -> bool {
        time_sec >= self.start_time && time_sec < self.end_time
    }

    /// Returns true if this cue's time range overlaps another's.
    ///
    /// Touching cues (one's end equals the other's start) do not overlap.
    pub fn overlaps(&self, other: &SubtitleCue) -> bool {
        self.start_time < other.end_time && self.end_time > other.start_time
    }

    /// Attaches word-level timing
    pub fn with_words(mut self, words: Vec<SubtitleWord>) -> Self {
        self.words = Some(words);
        self
    }

    /// Sets the animation style
    pub fn with_animation(mut self, style: AnimationStyle) -> Self {
        self.animation_style = Some(style);
        self
    }
}

// =============================================================================
// Cue Construction & Patching
// =============================================================================

/// Initial field values for a new cue; the engine clamps and sanitizes
/// them and assigns the id.
#[derive(Clone, Debug, Default)]
pub struct CueInit {
    pub start_time: TimeSec,
    pub end_time: TimeSec,
    pub text: String,
    pub words: Option<Vec<SubtitleWord>>,
    pub animation_style: Option<AnimationStyle>,
}

impl CueInit {
    /// Creates an init record with timing and text
    pub fn new(start_time: TimeSec, end_time: TimeSec, text: &str) -> Self {
        Self {
            start_time,
            end_time,
            text: text.to_string(),
            words: None,
            animation_style: None,
        }
    }

    pub fn with_words(mut self, words: Vec<SubtitleWord>) -> Self {
        self.words = Some(words);
        self
    }

    pub fn with_animation(mut self, style: AnimationStyle) -> Self {
        self.animation_style = Some(style);
        self
    }
}

/// Partial update for an existing cue.
///
/// `words` and `animation_style` are double-optional: the outer `Option`
/// distinguishes "leave untouched" from "set to this value", and the inner
/// one allows clearing the field. Exact-inverse patches need that
/// distinction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CuePatch {
    pub start_time: Option<TimeSec>,
    pub end_time: Option<TimeSec>,
    pub text: Option<String>,
    pub words: Option<Option<Vec<SubtitleWord>>>,
    pub animation_style: Option<Option<AnimationStyle>>,
}

impl CuePatch {
    /// Returns true if the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.start_time.is_none()
            && self.end_time.is_none()
            && self.text.is_none()
            && self.words.is_none()
            && self.animation_style.is_none()
    }

    pub fn with_time_range(mut self, start_time: Option<TimeSec>, end_time: Option<TimeSec>) -> Self {
        self.start_time = start_time;
        self.end_time = end_time;
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_words(mut self, words: Option<Vec<SubtitleWord>>) -> Self {
        self.words = Some(words);
        self
    }

    pub fn with_animation(mut self, style: Option<AnimationStyle>) -> Self {
        self.animation_style = Some(style);
        self
    }
}

// =============================================================================
// Tests
// =============================================================================
