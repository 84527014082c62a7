//! Caption Templates Module
//!
//! Named, reusable caption looks. A template is a complete style patch
//! that gets sanitized over the defaults when applied, so every template
//! defines a full look rather than a delta on the current style.

use serde::{Deserialize, Serialize};

use crate::core::{
    cues::AnimationStyle,
    style::{FontWeight, StylePatch},
    TemplateId,
};

/// A named caption look applied through the `ApplyTemplate` action
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionTemplate {
    pub id: TemplateId,
    pub name: String,
    pub style: StylePatch,
    /// Animation the template suggests for new cues
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation_style: Option<AnimationStyle>,
}

/// The built-in template collection
#[derive(Debug)]
pub struct TemplateLibrary {
    templates: Vec<CaptionTemplate>,
}

impl TemplateLibrary {
    /// Creates the library with the built-in templates
    pub fn new() -> Self {
        Self {
            templates: builtin_templates(),
        }
    }

    /// Looks up a template by id
    pub fn get(&self, id: &str) -> Option<&CaptionTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// All templates, in display order
    pub fn all(&self) -> &[CaptionTemplate] {
        &self.templates
    }
}

impl Default for TemplateLibrary {
    fn default() -> Self {
        Self::new()
    }
}

fn builtin_templates() -> Vec<CaptionTemplate> {
    vec![
        CaptionTemplate {
            id: "classic".to_string(),
            name: "Classic".to_string(),
            style: StylePatch {
                font_family: Some("Arial".to_string()),
                font_size: Some(32.0),
                font_color: Some("#FFFFFF".to_string()),
                outline_color: Some("#000000".to_string()),
                outline_width: Some(2.0),
                background_opacity: Some(0.5),
                ..Default::default()
            },
            animation_style: None,
        },
        CaptionTemplate {
            id: "bold-pop".to_string(),
            name: "Bold Pop".to_string(),
            style: StylePatch {
                font_family: Some("Impact".to_string()),
                font_size: Some(56.0),
                font_weight: Some(FontWeight::Bold),
                font_color: Some("#FFFFFF".to_string()),
                outline_color: Some("#000000".to_string()),
                outline_width: Some(4.0),
                background_opacity: Some(0.0),
                highlight_color: Some(Some("#FFD700".to_string())),
                ..Default::default()
            },
            animation_style: Some(AnimationStyle::Bounce),
        },
        CaptionTemplate {
            id: "karaoke-party".to_string(),
            name: "Karaoke Party".to_string(),
            style: StylePatch {
                font_family: Some("Montserrat".to_string()),
                font_size: Some(44.0),
                font_weight: Some(FontWeight::Bold),
                font_color: Some("#FFFFFF".to_string()),
                highlight_color: Some(Some("#FF4081".to_string())),
                upcoming_color: Some(Some("#999999".to_string())),
                outline_width: Some(3.0),
                ..Default::default()
            },
            animation_style: Some(AnimationStyle::Karaoke),
        },
        CaptionTemplate {
            id: "minimal".to_string(),
            name: "Minimal".to_string(),
            style: StylePatch {
                font_family: Some("Helvetica".to_string()),
                font_size: Some(28.0),
                font_weight: Some(FontWeight::Light),
                font_color: Some("#FFFFFF".to_string()),
                outline_width: Some(0.0),
                background_opacity: Some(0.0),
                shadow_blur: Some(0.0),
                ..Default::default()
            },
            animation_style: None,
        },
    ]
}

// =============================================================================
// Tests
// =============================================================================
