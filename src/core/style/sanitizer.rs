//! Style Sanitizer
//!
//! Validate-and-clamp-or-default, never throw. Every field of the
//! resulting [`SubtitleStyle`] is guaranteed in range, so the function is
//! idempotent: sanitizing an already-sanitized style is the identity.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::style::{StylePatch, SubtitleStyle, ALLOWED_FONTS};

// =============================================================================
// Color Validation
// =============================================================================

static HEX_COLOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$").expect("valid regex")
});

/// Substrings that mark a value as a CSS-injection attempt.
const INJECTION_PATTERNS: &[&str] = &[
    "expression(",
    "url(",
    "@import",
    "-moz-binding",
    "behavior:",
    "javascript:",
    "\\u",
];

/// Returns true if the value is a plain hex color (`#RGB`, `#RRGGBB`, or
/// `#RRGGBBAA`) free of CSS-injection markers.
pub fn is_safe_color(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    if INJECTION_PATTERNS.iter().any(|p| lower.contains(p)) {
        return false;
    }
    if lower.contains(';') || lower.contains('{') || lower.contains('}') {
        return false;
    }
    HEX_COLOR_RE.is_match(value)
}

// =============================================================================
// Field Sanitizers
// =============================================================================

fn sanitize_number(value: Option<f64>, min: f64, max: f64, default: f64) -> f64 {
    match value {
        Some(v) if v.is_finite() => v.clamp(min, max),
        _ => default,
    }
}

fn sanitize_color(value: &Option<String>, default: &str) -> String {
    match value {
        Some(v) if is_safe_color(v) => v.clone(),
        _ => default.to_string(),
    }
}

fn sanitize_optional_color(value: &Option<Option<String>>) -> Option<String> {
    match value.clone().flatten() {
        Some(v) if is_safe_color(&v) => Some(v),
        _ => None,
    }
}

fn sanitize_font(value: &Option<String>, default: &str) -> String {
    match value {
        Some(v) => ALLOWED_FONTS
            .iter()
            .find(|f| f.eq_ignore_ascii_case(v))
            .map(|f| f.to_string())
            .unwrap_or_else(|| default.to_string()),
        None => default.to_string(),
    }
}

// =============================================================================
// Sanitizer
// =============================================================================

/// Builds a fully resolved style from a partial record.
///
/// Absent or invalid fields fall back to the documented defaults; numeric
/// fields are clamped into range rather than rejected.
pub fn sanitize_style(patch: &StylePatch) -> SubtitleStyle {
    let defaults = SubtitleStyle::default();
    SubtitleStyle {
        font_family: sanitize_font(&patch.font_family, &defaults.font_family),
        font_size: sanitize_number(patch.font_size, 8.0, 120.0, defaults.font_size),
        font_weight: patch.font_weight.unwrap_or(defaults.font_weight),
        font_style: patch.font_style.unwrap_or(defaults.font_style),
        font_color: sanitize_color(&patch.font_color, &defaults.font_color),
        background_color: sanitize_color(&patch.background_color, &defaults.background_color),
        background_opacity: sanitize_number(
            patch.background_opacity,
            0.0,
            1.0,
            defaults.background_opacity,
        ),
        outline_color: sanitize_color(&patch.outline_color, &defaults.outline_color),
        outline_width: sanitize_number(patch.outline_width, 0.0, 20.0, defaults.outline_width),
        shadow_color: sanitize_color(&patch.shadow_color, &defaults.shadow_color),
        shadow_blur: sanitize_number(patch.shadow_blur, 0.0, 50.0, defaults.shadow_blur),
        position: sanitize_number(patch.position, 0.0, 100.0, defaults.position),
        alignment: patch.alignment.unwrap_or(defaults.alignment),
        line_height: sanitize_number(patch.line_height, 0.8, 3.0, defaults.line_height),
        padding: sanitize_number(patch.padding, 0.0, 50.0, defaults.padding),
        highlight_color: sanitize_optional_color(&patch.highlight_color),
        upcoming_color: sanitize_optional_color(&patch.upcoming_color),
    }
}

/// Overlays a patch on an existing style and sanitizes the result.
///
/// Keys absent from the patch keep their current values.
pub fn apply_style_patch(style: &SubtitleStyle, patch: &StylePatch) -> SubtitleStyle {
    let current = StylePatch::from_style(style);
    let merged = StylePatch {
        font_family: patch.font_family.clone().or(current.font_family),
        font_size: patch.font_size.or(current.font_size),
        font_weight: patch.font_weight.or(current.font_weight),
        font_style: patch.font_style.or(current.font_style),
        font_color: patch.font_color.clone().or(current.font_color),
        background_color: patch.background_color.clone().or(current.background_color),
        background_opacity: patch.background_opacity.or(current.background_opacity),
        outline_color: patch.outline_color.clone().or(current.outline_color),
        outline_width: patch.outline_width.or(current.outline_width),
        shadow_color: patch.shadow_color.clone().or(current.shadow_color),
        shadow_blur: patch.shadow_blur.or(current.shadow_blur),
        position: patch.position.or(current.position),
        alignment: patch.alignment.or(current.alignment),
        line_height: patch.line_height.or(current.line_height),
        padding: patch.padding.or(current.padding),
        highlight_color: patch.highlight_color.clone().or(current.highlight_color),
        upcoming_color: patch.upcoming_color.clone().or(current.upcoming_color),
    };
    sanitize_style(&merged)
}

// =============================================================================
// Tests
// =============================================================================
