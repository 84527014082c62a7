//! Per-Word Caption Rendering
//!
//! Turns a cue and a playback time into a list of word segments with
//! per-word opacity, scale, vertical offset, and color. Cues without
//! word timings (or without an animation style) degrade to a single
//! static segment.

use serde::{Deserialize, Serialize};

use crate::core::{
    cues::{AnimationStyle, SubtitleCue, SubtitleWord},
    style::SubtitleStyle,
    TimeSec,
};

use super::easing::ease_out_bounce;

/// Bounce-in ramp length in seconds
const BOUNCE_WINDOW: TimeSec = 0.3;
/// Typewriter fade-in length in seconds
const TYPEWRITER_FADE: TimeSec = 0.1;
/// Scale applied to the active word under `word-highlight`
const HIGHLIGHT_SCALE: f64 = 1.15;
/// Vertical travel of the bounce entrance in pixels
const BOUNCE_RISE: f64 = 20.0;

// =============================================================================
// Frame Types
// =============================================================================

/// Where a word sits relative to the playhead
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordState {
    /// Not yet reached
    Normal,
    /// Currently being spoken
    Active,
    /// Already spoken
    Highlighted,
}

/// One rendered word (or the whole cue text for static rendering)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordSegment {
    pub text: String,
    pub opacity: f64,
    pub scale: f64,
    pub offset_y: f64,
    /// Solid hex color, or a CSS `linear-gradient(...)` for karaoke fill
    pub color: String,
    pub state: WordState,
}

impl WordSegment {
    fn still(text: &str, color: &str, state: WordState) -> Self {
        Self {
            text: text.to_string(),
            opacity: 1.0,
            scale: 1.0,
            offset_y: 0.0,
            color: color.to_string(),
            state,
        }
    }
}

/// The rendered output for one cue at one playback time
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimatedCaptionFrame {
    /// False outside the cue's `[startTime, endTime)` lifetime
    pub visible: bool,
    pub segments: Vec<WordSegment>,
}

impl AnimatedCaptionFrame {
    fn hidden() -> Self {
        Self {
            visible: false,
            segments: Vec::new(),
        }
    }
}

/// The color trio the animations draw from
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationColors {
    /// Base text color
    pub text: String,
    /// Active/completed word color
    pub highlight: String,
    /// Not-yet-reached word color
    pub upcoming: String,
}

impl Default for AnimationColors {
    fn default() -> Self {
        Self {
            text: "#FFFFFF".to_string(),
            highlight: "#FFD700".to_string(),
            upcoming: "#999999".to_string(),
        }
    }
}

impl AnimationColors {
    /// Derives the trio from a resolved style, falling back to the
    /// defaults for colors the style leaves unset
    pub fn from_style(style: &SubtitleStyle) -> Self {
        let defaults = Self::default();
        Self {
            text: style.font_color.clone(),
            highlight: style
                .highlight_color
                .clone()
                .unwrap_or(defaults.highlight),
            upcoming: style.upcoming_color.clone().unwrap_or(defaults.upcoming),
        }
    }
}

// =============================================================================
// Renderer
// =============================================================================

/// Renders `cue` at `time` with the default color trio
pub fn render_frame(cue: &SubtitleCue, time: TimeSec) -> AnimatedCaptionFrame {
    render_frame_with(cue, time, &AnimationColors::default())
}

/// Renders `cue` at `time`.
///
/// Outside the cue's `[startTime, endTime)` lifetime the frame is
/// invisible and empty. Inside it, cues without word timings or with no
/// animation style render as one static segment of the full cue text.
pub fn render_frame_with(
    cue: &SubtitleCue,
    time: TimeSec,
    colors: &AnimationColors,
) -> AnimatedCaptionFrame {
    if !cue.is_visible_at(time) {
        return AnimatedCaptionFrame::hidden();
    }

    let style = cue.animation_style.unwrap_or_default();
    let words = cue.words.as_deref().filter(|words| !words.is_empty());

    let segments = match (style, words) {
        (AnimationStyle::None, _) | (_, None) => {
            vec![WordSegment::still(&cue.text, &colors.text, WordState::Normal)]
        }
        (AnimationStyle::WordHighlight, Some(words)) => word_highlight(words, time, colors),
        (AnimationStyle::WordByWord, Some(words)) => word_by_word(words, time, colors),
        (AnimationStyle::Karaoke, Some(words)) => karaoke(words, time, colors),
        (AnimationStyle::Bounce, Some(words)) => bounce(words, time, colors),
        (AnimationStyle::Typewriter, Some(words)) => typewriter(words, time, colors),
    };

    AnimatedCaptionFrame {
        visible: true,
        segments,
    }
}

fn word_highlight(words: &[SubtitleWord], time: TimeSec, colors: &AnimationColors) -> Vec<WordSegment> {
    words
        .iter()
        .map(|word| {
            if word.is_active_at(time) {
                WordSegment {
                    scale: HIGHLIGHT_SCALE,
                    ..WordSegment::still(&word.text, &colors.highlight, WordState::Active)
                }
            } else if time >= word.end_time {
                WordSegment::still(&word.text, &colors.text, WordState::Highlighted)
            } else {
                WordSegment::still(&word.text, &colors.upcoming, WordState::Normal)
            }
        })
        .collect()
}

/// Shows only the most recently started word. After the last word's end
/// the last word stays on screen rather than going blank.
fn word_by_word(words: &[SubtitleWord], time: TimeSec, colors: &AnimationColors) -> Vec<WordSegment> {
    words
        .iter()
        .rev()
        .find(|word| word.start_time <= time)
        .map(|word| vec![WordSegment::still(&word.text, &colors.highlight, WordState::Active)])
        .unwrap_or_default()
}

fn karaoke(words: &[SubtitleWord], time: TimeSec, colors: &AnimationColors) -> Vec<WordSegment> {
    words
        .iter()
        .map(|word| {
            if time < word.start_time {
                WordSegment::still(&word.text, &colors.upcoming, WordState::Normal)
            } else if time >= word.end_time {
                WordSegment::still(&word.text, &colors.highlight, WordState::Highlighted)
            } else {
                let duration = word.end_time - word.start_time;
                let progress = if duration > 0.0 {
                    ((time - word.start_time) / duration).clamp(0.0, 1.0)
                } else {
                    1.0
                };
                let percent = progress * 100.0;
                let fill = format!(
                    "linear-gradient(90deg, {} {percent:.1}%, {} {percent:.1}%)",
                    colors.highlight, colors.upcoming
                );
                WordSegment::still(&word.text, &fill, WordState::Active)
            }
        })
        .collect()
}

fn bounce(words: &[SubtitleWord], time: TimeSec, colors: &AnimationColors) -> Vec<WordSegment> {
    words
        .iter()
        .map(|word| {
            if time < word.start_time {
                // Hidden until the word starts, not statically visible
                WordSegment {
                    opacity: 0.0,
                    scale: 0.0,
                    offset_y: BOUNCE_RISE,
                    ..WordSegment::still(&word.text, &colors.upcoming, WordState::Normal)
                }
            } else {
                let eased = ease_out_bounce((time - word.start_time) / BOUNCE_WINDOW);
                let state = if word.is_active_at(time) {
                    WordState::Active
                } else {
                    WordState::Highlighted
                };
                let color = match state {
                    WordState::Active => &colors.highlight,
                    _ => &colors.text,
                };
                WordSegment {
                    opacity: eased,
                    scale: eased,
                    offset_y: (1.0 - eased) * BOUNCE_RISE,
                    ..WordSegment::still(&word.text, color, state)
                }
            }
        })
        .collect()
}

/// Started words only; the most recent one fades in over a fixed window
fn typewriter(words: &[SubtitleWord], time: TimeSec, colors: &AnimationColors) -> Vec<WordSegment> {
    let started: Vec<&SubtitleWord> = words.iter().filter(|w| w.start_time <= time).collect();
    let last = started.len().saturating_sub(1);
    started
        .iter()
        .enumerate()
        .map(|(i, word)| {
            let (opacity, state) = if i == last {
                let fade = ((time - word.start_time) / TYPEWRITER_FADE).clamp(0.0, 1.0);
                (fade, WordState::Active)
            } else {
                (1.0, WordState::Normal)
            };
            WordSegment {
                opacity,
                ..WordSegment::still(&word.text, &colors.text, state)
            }
        })
        .collect()
}

// =============================================================================
// Tests
// =============================================================================
