//! Style Data Models
//!
//! Defines the subtitle style record and its partial-update companion.

use serde::{Deserialize, Serialize};

use crate::core::cues::{double_opt, lenient_opt};

// =============================================================================
// Font Allow-List
// =============================================================================

/// Fonts a style may name. Anything else falls back to the default.
pub const ALLOWED_FONTS: &[&str] = &[
    "Arial",
    "Helvetica",
    "Verdana",
    "Georgia",
    "Times New Roman",
    "Courier New",
    "Impact",
    "Trebuchet MS",
    "Comic Sans MS",
    "Montserrat",
    "Roboto",
    "Open Sans",
    "Oswald",
    "Bebas Neue",
];

// =============================================================================
// Enums
// =============================================================================

/// Font weight
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
    Light,
}

/// Font slant
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

/// Horizontal alignment of subtitle text
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TextAlignment {
    Left,
    #[default]
    Center,
    Right,
}

// =============================================================================
// Subtitle Style
// =============================================================================

/// Fully resolved subtitle style.
///
/// Only ever produced by the sanitizer, so every field is in range.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtitleStyle {
    /// Font family name, from [`ALLOWED_FONTS`]
    pub font_family: String,
    /// Font size in points (8-120)
    pub font_size: f64,
    /// Font weight
    pub font_weight: FontWeight,
    /// Font slant
    pub font_style: FontStyle,
    /// Text color (hex)
    pub font_color: String,
    /// Background box color (hex)
    pub background_color: String,
    /// Background box opacity (0-1)
    pub background_opacity: f64,
    /// Outline color (hex)
    pub outline_color: String,
    /// Outline width in pixels (0-20)
    pub outline_width: f64,
    /// Shadow color (hex)
    pub shadow_color: String,
    /// Shadow blur radius in pixels (0-50)
    pub shadow_blur: f64,
    /// Vertical position as a percentage from the top (0-100)
    pub position: f64,
    /// Horizontal alignment
    pub alignment: TextAlignment,
    /// Line height multiplier (0.8-3)
    pub line_height: f64,
    /// Padding around the text in pixels (0-50)
    pub padding: f64,
    /// Highlight color for animated styles (hex)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight_color: Option<String>,
    /// Upcoming-word color for animated styles (hex)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upcoming_color: Option<String>,
}

impl Default for SubtitleStyle {
    fn default() -> Self {
        Self {
            font_family: "Arial".to_string(),
            font_size: 32.0,
            font_weight: FontWeight::Normal,
            font_style: FontStyle::Normal,
            font_color: "#FFFFFF".to_string(),
            background_color: "#000000".to_string(),
            background_opacity: 0.5,
            outline_color: "#000000".to_string(),
            outline_width: 2.0,
            shadow_color: "#000000".to_string(),
            shadow_blur: 0.0,
            position: 90.0,
            alignment: TextAlignment::Center,
            line_height: 1.2,
            padding: 10.0,
            highlight_color: None,
            upcoming_color: None,
        }
    }
}

// =============================================================================
// Style Patch
// =============================================================================

/// Partial style record: the sanitizer's input, the `UpdateStyle` action
/// payload, and the shape templates carry.
///
/// Enum-valued fields deserialize leniently: a value outside the fixed
/// set becomes `None` (and then falls back to the default) instead of
/// failing the document load. The optional highlight/upcoming colors are
/// double-optional so a patch can clear them (`null` on the wire).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StylePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_opt"
    )]
    pub font_weight: Option<FontWeight>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_opt"
    )]
    pub font_style: Option<FontStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow_blur: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<f64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_opt"
    )]
    pub alignment: Option<TextAlignment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<f64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "double_opt"
    )]
    pub highlight_color: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "double_opt"
    )]
    pub upcoming_color: Option<Option<String>>,
}

impl StylePatch {
    /// Returns the full patch equivalent of a resolved style
    pub fn from_style(style: &SubtitleStyle) -> Self {
        Self {
            font_family: Some(style.font_family.clone()),
            font_size: Some(style.font_size),
            font_weight: Some(style.font_weight),
            font_style: Some(style.font_style),
            font_color: Some(style.font_color.clone()),
            background_color: Some(style.background_color.clone()),
            background_opacity: Some(style.background_opacity),
            outline_color: Some(style.outline_color.clone()),
            outline_width: Some(style.outline_width),
            shadow_color: Some(style.shadow_color.clone()),
            shadow_blur: Some(style.shadow_blur),
            position: Some(style.position),
            alignment: Some(style.alignment),
            line_height: Some(style.line_height),
            padding: Some(style.padding),
            highlight_color: Some(style.highlight_color.clone()),
            upcoming_color: Some(style.upcoming_color.clone()),
        }
    }

    /// Returns a patch holding, for every key set in `self`, the value
    /// that `style` currently has. This is the exact-inverse capture for
    /// the `UpdateStyle` action.
    pub fn previous_from(&self, style: &SubtitleStyle) -> Self {
        Self {
            font_family: self.font_family.as_ref().map(|_| style.font_family.clone()),
            font_size: self.font_size.map(|_| style.font_size),
            font_weight: self.font_weight.map(|_| style.font_weight),
            font_style: self.font_style.map(|_| style.font_style),
            font_color: self.font_color.as_ref().map(|_| style.font_color.clone()),
            background_color: self
                .background_color
                .as_ref()
                .map(|_| style.background_color.clone()),
            background_opacity: self.background_opacity.map(|_| style.background_opacity),
            outline_color: self
                .outline_color
                .as_ref()
                .map(|_| style.outline_color.clone()),
            outline_width: self.outline_width.map(|_| style.outline_width),
            shadow_color: self
                .shadow_color
                .as_ref()
                .map(|_| style.shadow_color.clone()),
            shadow_blur: self.shadow_blur.map(|_| style.shadow_blur),
            position: self.position.map(|_| style.position),
            alignment: self.alignment.map(|_| style.alignment),
            line_height: self.line_height.map(|_| style.line_height),
            padding: self.padding.map(|_| style.padding),
            highlight_color: self
                .highlight_color
                .as_ref()
                .map(|_| style.highlight_color.clone()),
            upcoming_color: self
                .upcoming_color
                .as_ref()
                .map(|_| style.upcoming_color.clone()),
        }
    }

    /// Names of the keys this patch sets, in camelCase for UI labels.
    pub fn changed_keys(&self) -> Vec<&'static str> {
        let mut keys = Vec::new();
        if self.font_family.is_some() {
            keys.push("fontFamily");
        }
        if self.font_size.is_some() {
            keys.push("fontSize");
        }
        if self.font_weight.is_some() {
            keys.push("fontWeight");
        }
        if self.font_style.is_some() {
            keys.push("fontStyle");
        }
        if self.font_color.is_some() {
            keys.push("fontColor");
        }
        if self.background_color.is_some() {
            keys.push("backgroundColor");
        }
        if self.background_opacity.is_some() {
            keys.push("backgroundOpacity");
        }
        if self.outline_color.is_some() {
            keys.push("outlineColor");
        }
        if self.outline_width.is_some() {
            keys.push("outlineWidth");
        }
        if self.shadow_color.is_some() {
            keys.push("shadowColor");
        }
        if self.shadow_blur.is_some() {
            keys.push("shadowBlur");
        }
        if self.position.is_some() {
            keys.push("position");
        }
        if self.alignment.is_some() {
            keys.push("alignment");
        }
        if self.line_height.is_some() {
            keys.push("lineHeight");
        }
        if self.padding.is_some() {
            keys.push("padding");
        }
        if self.highlight_color.is_some() {
            keys.push("highlightColor");
        }
        if self.upcoming_color.is_some() {
            keys.push("upcomingColor");
        }
        keys
    }

    /// Returns true if the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.changed_keys().is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style_fields() {
        let style = SubtitleStyle::default();
        assert_eq!(style.font_family, "Arial");
        assert_eq!(style.font_size, 32.0);
        assert_eq!(style.alignment, TextAlignment::Center);
        assert!(style.highlight_color.is_none());
    }

    #[test]
    fn test_style_serialization_shape() {
        let style = SubtitleStyle::default();
        let json = serde_json::to_string(&style).unwrap();
        assert!(json.contains("\"fontFamily\":\"Arial\""));
        assert!(json.contains("\"backgroundOpacity\":0.5"));

        let parsed: SubtitleStyle = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, style);
    }

    #[test]
    fn test_patch_changed_keys() {
        let patch = StylePatch {
            font_size: Some(40.0),
            font_color: Some("#FF0000".to_string()),
            ..Default::default()
        };
        assert_eq!(patch.changed_keys(), vec!["fontSize", "fontColor"]);
        assert!(!patch.is_empty());
        assert!(StylePatch::default().is_empty());
    }

    #[test]
    fn test_previous_from_covers_only_patched_keys() {
        let style = SubtitleStyle::default();
        let patch = StylePatch {
            font_size: Some(64.0),
            ..Default::default()
        };
        let previous = patch.previous_from(&style);

        assert_eq!(previous.font_size, Some(32.0));
        assert!(previous.font_color.is_none());
        assert!(previous.alignment.is_none());
    }

    #[test]
    fn test_lenient_enum_deserialization() {
        let json = r#"{"fontWeight":"heavy","alignment":"left"}"#;
        let patch: StylePatch = serde_json::from_str(json).unwrap();
        assert!(patch.font_weight.is_none());
        assert_eq!(patch.alignment, Some(TextAlignment::Left));
    }

    #[test]
    fn test_double_option_highlight_color() {
        // null clears, missing leaves untouched
        let patch: StylePatch = serde_json::from_str(r#"{"highlightColor":null}"#).unwrap();
        assert_eq!(patch.highlight_color, Some(None));

        let patch: StylePatch = serde_json::from_str(r#"{}"#).unwrap();
        assert!(patch.highlight_color.is_none());

        let patch: StylePatch = serde_json::from_str(r##"{"highlightColor":"#FFD700"}"##).unwrap();
        assert_eq!(patch.highlight_color, Some(Some("#FFD700".to_string())));
    }
}
