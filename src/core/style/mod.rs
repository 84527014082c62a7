//! Subtitle Style System
//!
//! The style record applied to every cue, and the sanitizer that
//! validates, clamps, and defaults it. The sanitizer never rejects:
//! out-of-range numbers are clamped, unknown fonts and enum values fall
//! back to defaults, and colors that fail the hex grammar or match a
//! CSS-injection pattern are replaced with the documented default.

mod models;
mod sanitizer;

pub use models::{FontStyle, FontWeight, StylePatch, SubtitleStyle, TextAlignment, ALLOWED_FONTS};
pub use sanitizer::{apply_style_patch, is_safe_color, sanitize_style};
