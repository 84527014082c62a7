//! Subtitle Edit Actions
//!
//! The concrete tagged union of undoable edits over [`ProjectState`].
//!
//! Each variant wraps one engine or sanitizer operation plus the captured
//! prior values it overwrote, so `inverse()` builds an exact reverse
//! action without recomputing a diff. The `Restore*` variants exist only
//! as inverses of destructive edits; they re-insert captured values at
//! their original positions so undo reproduces the prior state
//! bit-exactly.

use tracing::debug;

use crate::core::{
    actions::Action,
    cues::{CueInit, CuePatch, SubtitleCue, SubtitleEngine},
    project::ProjectState,
    style::{apply_style_patch, sanitize_style, StylePatch, SubtitleStyle},
    CueId, TemplateId, TimeSec,
};

/// Captured result of a merge, for exact restoration on undo
#[derive(Clone, Debug)]
pub struct MergeCapture {
    /// Id the merged cue kept
    kept_id: CueId,
    /// The pre-merge cues with their original vector positions
    originals: Vec<(usize, SubtitleCue)>,
}

/// An undoable edit over the project state
#[derive(Clone, Debug)]
pub enum EditAction {
    /// Adds a new cue; the created cue is captured so redo keeps its id
    AddCue {
        init: CueInit,
        created: Option<SubtitleCue>,
    },
    /// Removes a cue, capturing it and its position for undo
    RemoveCue {
        id: CueId,
        removed: Option<(usize, SubtitleCue)>,
    },
    /// Re-inserts a captured cue at its original position
    RestoreCue { index: usize, cue: SubtitleCue },
    /// Patches a cue, capturing the prior values of the touched fields
    UpdateCue {
        id: CueId,
        patch: CuePatch,
        previous: Option<CuePatch>,
    },
    /// Splits a cue in two; the second half's id is captured so redo
    /// reproduces it, and the original cue so undo restores it exactly
    /// (a merge of the halves cannot, since it re-joins their texts)
    SplitCue {
        id: CueId,
        at_time: TimeSec,
        second_id: Option<CueId>,
        original: Option<(usize, SubtitleCue)>,
    },
    /// Merges the named cues, capturing the originals for undo
    MergeCues {
        ids: Vec<CueId>,
        merged: Option<MergeCapture>,
    },
    /// Replaces the named cues with captured originals at their recorded
    /// positions. Inverse of both `SplitCue` and `MergeCues`.
    RestoreCues {
        replaced_ids: Vec<CueId>,
        originals: Vec<(usize, SubtitleCue)>,
        replaced: Option<Vec<(usize, SubtitleCue)>>,
    },
    /// Patches the project style, capturing prior values of the keys
    UpdateStyle {
        patch: StylePatch,
        previous: Option<StylePatch>,
    },
    /// Applies a template's style, capturing the previous style and
    /// active template id
    ApplyTemplate {
        template_id: TemplateId,
        style: StylePatch,
        #[allow(clippy::type_complexity)]
        previous: Option<(SubtitleStyle, Option<TemplateId>)>,
    },
    /// Reinstates a captured style and active template id
    RestoreStyle {
        style: SubtitleStyle,
        template_id: Option<TemplateId>,
        #[allow(clippy::type_complexity)]
        previous: Option<(SubtitleStyle, Option<TemplateId>)>,
    },
}

impl EditAction {
    /// Adds a cue built from `init`
    pub fn add_cue(init: CueInit) -> Self {
        Self::AddCue {
            init,
            created: None,
        }
    }

    /// Removes the cue with the given id
    pub fn remove_cue(id: &str) -> Self {
        Self::RemoveCue {
            id: id.to_string(),
            removed: None,
        }
    }

    /// Patches the cue with the given id
    pub fn update_cue(id: &str, patch: CuePatch) -> Self {
        Self::UpdateCue {
            id: id.to_string(),
            patch,
            previous: None,
        }
    }

    /// Splits the cue with the given id at `at_time`
    pub fn split_cue(id: &str, at_time: TimeSec) -> Self {
        Self::SplitCue {
            id: id.to_string(),
            at_time,
            second_id: None,
            original: None,
        }
    }

    /// Merges the named cues into the first listed one
    pub fn merge_cues(ids: Vec<CueId>) -> Self {
        Self::MergeCues { ids, merged: None }
    }

    /// Patches the project style
    pub fn update_style(patch: StylePatch) -> Self {
        Self::UpdateStyle {
            patch,
            previous: None,
        }
    }

    /// Applies a template's style and records it as active
    pub fn apply_template(template_id: &str, style: StylePatch) -> Self {
        Self::ApplyTemplate {
            template_id: template_id.to_string(),
            style,
            previous: None,
        }
    }
}

impl Action<ProjectState> for EditAction {
    fn execute(&mut self, state: &ProjectState) -> ProjectState {
        let engine = SubtitleEngine::new();
        match self {
            EditAction::AddCue { init, created } => {
                let cues = match created {
                    // Redo path: re-insert the captured cue so its id survives
                    Some(cue) => {
                        let mut cues = state.cues.clone();
                        cues.push(cue.clone());
                        cues
                    }
                    None => {
                        let cues = engine.add_cue(&state.cues, init.clone());
                        *created = cues.last().cloned();
                        debug!(cue_id = ?created.as_ref().map(|c| &c.id), "Added cue");
                        cues
                    }
                };
                ProjectState { cues, ..state.clone() }
            }

            EditAction::RemoveCue { id, removed } => {
                *removed = state
                    .cues
                    .iter()
                    .position(|c| &c.id == id)
                    .map(|index| (index, state.cues[index].clone()));
                let cues = engine.remove_cue(&state.cues, id);
                ProjectState { cues, ..state.clone() }
            }

            EditAction::RestoreCue { index, cue } => {
                let mut cues = state.cues.clone();
                let at = (*index).min(cues.len());
                cues.insert(at, cue.clone());
                ProjectState { cues, ..state.clone() }
            }

            EditAction::UpdateCue { id, patch, previous } => {
                *previous = state.cues.iter().find(|c| &c.id == id).map(|cue| CuePatch {
                    // A start-time change re-clamps the end, so a patch
                    // touching either bound must capture both.
                    start_time: (patch.start_time.is_some() || patch.end_time.is_some())
                        .then_some(cue.start_time),
                    end_time: (patch.start_time.is_some() || patch.end_time.is_some())
                        .then_some(cue.end_time),
                    text: patch.text.as_ref().map(|_| cue.text.clone()),
                    words: patch.words.as_ref().map(|_| cue.words.clone()),
                    animation_style: patch.animation_style.map(|_| cue.animation_style),
                });
                debug!(cue_id = %id, "Updating cue");
                let cues = engine.update_cue(&state.cues, id, patch);
                ProjectState { cues, ..state.clone() }
            }

            EditAction::SplitCue { id, at_time, second_id, original } => {
                *original = state
                    .cues
                    .iter()
                    .position(|c| &c.id == id)
                    .map(|index| (index, state.cues[index].clone()));
                let mut cues = engine.split_cue(&state.cues, id, *at_time);
                let index = cues.iter().position(|c| &c.id == id);
                let split_happened = cues.len() == state.cues.len() + 1;
                if let (Some(index), true) = (index, split_happened) {
                    match second_id {
                        // Redo path: keep the previously assigned id
                        Some(existing) => cues[index + 1].id = existing.clone(),
                        None => *second_id = Some(cues[index + 1].id.clone()),
                    }
                    debug!(cue_id = %id, at_time = *at_time, "Split cue");
                } else {
                    *original = None;
                }
                ProjectState { cues, ..state.clone() }
            }

            EditAction::MergeCues { ids, merged } => {
                let originals: Vec<(usize, SubtitleCue)> = state
                    .cues
                    .iter()
                    .enumerate()
                    .filter(|(_, c)| ids.contains(&c.id))
                    .map(|(i, c)| (i, c.clone()))
                    .collect();
                let cues = engine.merge_cues(&state.cues, ids);

                *merged = if cues.len() < state.cues.len() {
                    let kept_id = ids
                        .iter()
                        .find(|id| originals.iter().any(|(_, c)| &&c.id == id))
                        .cloned()
                        .unwrap_or_default();
                    debug!(kept_id = %kept_id, merged_count = originals.len(), "Merged cues");
                    Some(MergeCapture { kept_id, originals })
                } else {
                    None
                };
                ProjectState { cues, ..state.clone() }
            }

            EditAction::RestoreCues { replaced_ids, originals, replaced } => {
                *replaced = Some(
                    state
                        .cues
                        .iter()
                        .enumerate()
                        .filter(|(_, c)| replaced_ids.contains(&c.id))
                        .map(|(i, c)| (i, c.clone()))
                        .collect(),
                );
                let mut cues: Vec<SubtitleCue> = state
                    .cues
                    .iter()
                    .filter(|c| !replaced_ids.contains(&c.id))
                    .cloned()
                    .collect();
                // Ascending re-insert reconstructs the recorded order
                let mut sorted = originals.clone();
                sorted.sort_by_key(|(index, _)| *index);
                for (index, cue) in sorted {
                    cues.insert(index.min(cues.len()), cue);
                }
                ProjectState { cues, ..state.clone() }
            }

            EditAction::UpdateStyle { patch, previous } => {
                *previous = Some(patch.previous_from(&state.style));
                let style = apply_style_patch(&state.style, patch);
                ProjectState { style, ..state.clone() }
            }

            EditAction::ApplyTemplate { template_id, style, previous } => {
                *previous = Some((state.style.clone(), state.active_template_id.clone()));
                debug!(template_id = %template_id, "Applying template");
                ProjectState {
                    style: sanitize_style(style),
                    active_template_id: Some(template_id.clone()),
                    ..state.clone()
                }
            }

            EditAction::RestoreStyle { style, template_id, previous } => {
                *previous = Some((state.style.clone(), state.active_template_id.clone()));
                ProjectState {
                    style: style.clone(),
                    active_template_id: template_id.clone(),
                    ..state.clone()
                }
            }
        }
    }

    fn inverse(&self) -> Self {
        match self {
            EditAction::AddCue { created, .. } => match created {
                Some(cue) => EditAction::remove_cue(&cue.id),
                // Never executed; removing nothing is the safe no-op
                None => EditAction::remove_cue(""),
            },

            EditAction::RemoveCue { id, removed } => match removed {
                Some((index, cue)) => EditAction::RestoreCue {
                    index: *index,
                    cue: cue.clone(),
                },
                None => EditAction::remove_cue(id),
            },

            EditAction::RestoreCue { cue, .. } => EditAction::remove_cue(&cue.id),

            EditAction::UpdateCue { id, previous, .. } => EditAction::UpdateCue {
                id: id.clone(),
                patch: previous.clone().unwrap_or_default(),
                previous: None,
            },

            EditAction::SplitCue { id, second_id, original, .. } => {
                match (second_id, original) {
                    (Some(second), Some(original)) => EditAction::RestoreCues {
                        replaced_ids: vec![id.clone(), second.clone()],
                        originals: vec![original.clone()],
                        replaced: None,
                    },
                    // Split never happened; restoring nothing is a no-op
                    _ => EditAction::RestoreCues {
                        replaced_ids: Vec::new(),
                        originals: Vec::new(),
                        replaced: None,
                    },
                }
            }

            EditAction::MergeCues { ids, merged } => match merged {
                Some(capture) => EditAction::RestoreCues {
                    replaced_ids: vec![capture.kept_id.clone()],
                    originals: capture.originals.clone(),
                    replaced: None,
                },
                None => EditAction::merge_cues(ids.first().cloned().into_iter().collect()),
            },

            EditAction::RestoreCues { originals, replaced, .. } => EditAction::RestoreCues {
                replaced_ids: originals.iter().map(|(_, c)| c.id.clone()).collect(),
                originals: replaced.clone().unwrap_or_default(),
                replaced: None,
            },

            EditAction::UpdateStyle { previous, .. } => EditAction::UpdateStyle {
                patch: previous.clone().unwrap_or_default(),
                previous: None,
            },

            EditAction::ApplyTemplate { previous, .. } | EditAction::RestoreStyle { previous, .. } => {
                match previous {
                    Some((style, template_id)) => EditAction::RestoreStyle {
                        style: style.clone(),
                        template_id: template_id.clone(),
                        previous: None,
                    },
                    None => EditAction::update_style(StylePatch::default()),
                }
            }
        }
    }

    fn description(&self) -> String {
        match self {
            EditAction::AddCue { .. } => "Add cue".to_string(),
            EditAction::RemoveCue { .. } => "Remove cue".to_string(),
            EditAction::RestoreCue { .. } => "Restore cue".to_string(),
            EditAction::UpdateCue { .. } => "Update cue".to_string(),
            EditAction::SplitCue { .. } => "Split cue".to_string(),
            EditAction::MergeCues { ids, .. } => format!("Merge {} cues", ids.len()),
            EditAction::RestoreCues { .. } => "Restore cues".to_string(),
            EditAction::UpdateStyle { patch, .. } => match patch.changed_keys().as_slice() {
                [] => "Update style".to_string(),
                [key] => format!("Update {key}"),
                keys => format!("Update {} style properties", keys.len()),
            },
            EditAction::ApplyTemplate { .. } => "Apply template".to_string(),
            EditAction::RestoreStyle { .. } => "Restore style".to_string(),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            EditAction::AddCue { .. } => "AddCue",
            EditAction::RemoveCue { .. } => "RemoveCue",
            EditAction::RestoreCue { .. } => "RestoreCue",
            EditAction::UpdateCue { .. } => "UpdateCue",
            EditAction::SplitCue { .. } => "SplitCue",
            EditAction::MergeCues { .. } => "MergeCues",
            EditAction::RestoreCues { .. } => "RestoreCues",
            EditAction::UpdateStyle { .. } => "UpdateStyle",
            EditAction::ApplyTemplate { .. } => "ApplyTemplate",
            EditAction::RestoreStyle { .. } => "RestoreStyle",
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
