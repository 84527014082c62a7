//! Project State Module
//!
//! The editing session's state value and the JSON document boundary the
//! persistence collaborator talks to.
//!
//! `ProjectState` is owned exclusively by the editing session. Actions
//! never mutate it in place; every edit produces a new value, so callers
//! may retain prior snapshots (for comparison or external persistence)
//! without risk of later mutation. Undo/redo history is session-local
//! and is not part of the document.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{
    cues::{sanitize_cue_text, SubtitleCue},
    is_valid_time_sec,
    style::{sanitize_style, StylePatch, SubtitleStyle},
    EngineError, EngineResult, TemplateId, MIN_CUE_DURATION,
};

// =============================================================================
// Project State
// =============================================================================

/// The complete editable state of a subtitle project
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectState {
    /// All cues, in insertion order
    pub cues: Vec<SubtitleCue>,
    /// The project-wide subtitle style
    pub style: SubtitleStyle,
    /// Id of the template the style came from, if any
    pub active_template_id: Option<TemplateId>,
}

impl ProjectState {
    /// Creates an empty project with the default style
    pub fn new() -> Self {
        Self {
            cues: Vec::new(),
            style: SubtitleStyle::default(),
            active_template_id: None,
        }
    }

    /// Creates a project from pre-built cues (e.g. transcription intake)
    pub fn with_cues(cues: Vec<SubtitleCue>) -> Self {
        Self {
            cues,
            ..Self::new()
        }
    }

    /// Looks up a cue by id
    pub fn get_cue(&self, id: &str) -> Option<&SubtitleCue> {
        self.cues.iter().find(|c| c.id == id)
    }
}

impl Default for ProjectState {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Document Boundary
// =============================================================================

/// Wire shape of a persisted project document.
///
/// `cues` is structurally required; the style travels as a partial record
/// and is re-sanitized on load, so a document can never smuggle an
/// out-of-range or unsafe style value into the session.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectDocument {
    cues: Vec<SubtitleCue>,
    #[serde(default)]
    style: StylePatch,
    #[serde(default)]
    active_template_id: Option<TemplateId>,
}

impl ProjectState {
    /// Rebuilds a project state from a persisted document value.
    ///
    /// This is the engine's only thrown failure: a document that does not
    /// match the expected shape is rejected with
    /// [`EngineError::DocumentCorrupted`]. Values inside a well-shaped
    /// document are normalized, never rejected: cue times are clamped,
    /// text is re-sanitized, and the style goes through the sanitizer.
    pub fn from_document(document: serde_json::Value) -> EngineResult<Self> {
        let doc: ProjectDocument = serde_json::from_value(document)
            .map_err(|e| EngineError::DocumentCorrupted(e.to_string()))?;

        let cues = doc.cues.into_iter().map(normalize_cue).collect::<Vec<_>>();
        debug!(cue_count = cues.len(), "Loaded project document");

        Ok(Self {
            cues,
            style: sanitize_style(&doc.style),
            active_template_id: doc.active_template_id,
        })
    }

    /// Parses and rebuilds a project state from JSON text
    pub fn from_json_str(json: &str) -> EngineResult<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_document(value)
    }

    /// Serializes the state into its document value
    pub fn to_document(&self) -> EngineResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Loads a project document from a file
    pub fn load_from_path(path: &Path) -> EngineResult<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let value: serde_json::Value = serde_json::from_reader(reader)?;
        Self::from_document(value)
    }

    /// Saves the project document to a file
    pub fn save_to_path(&self, path: &Path) -> EngineResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        debug!(path = %path.display(), cue_count = self.cues.len(), "Saved project document");
        Ok(())
    }
}

/// Re-applies the engine's cue invariants to a loaded cue.
fn normalize_cue(cue: SubtitleCue) -> SubtitleCue {
    let start_time = if is_valid_time_sec(cue.start_time) {
        cue.start_time
    } else {
        0.0
    };
    let end_time = if cue.end_time.is_finite() {
        cue.end_time.max(start_time + MIN_CUE_DURATION)
    } else {
        start_time + MIN_CUE_DURATION
    };
    SubtitleCue {
        start_time,
        end_time,
        text: sanitize_cue_text(&cue.text),
        ..cue
    }
}

// =============================================================================
// Tests
// =============================================================================
