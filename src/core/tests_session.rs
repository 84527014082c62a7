//! Editing Session Tests
//!
//! Full-stack runs through the action system: mixed edits, the undo
//! inverse law across whole sessions, history bounds, and the document
//! boundary mid-session.

use crate::core::actions::{Action, ActionSystem, EditAction, MAX_HISTORY};
use crate::core::animation::{render_frame_with, AnimationColors, WordState};
use crate::core::cues::{
    cues_from_words, AnimationStyle, CueInit, CuePatch, SubtitleEngine, SubtitleWord,
};
use crate::core::project::ProjectState;
use crate::core::style::StylePatch;
use crate::core::templates::TemplateLibrary;

type Session = ActionSystem<ProjectState, EditAction>;

fn run(sys: &mut Session, state: &ProjectState, action: EditAction) -> ProjectState {
    sys.execute(state, action)
}

#[test]
fn test_mixed_session_undo_walks_back_to_every_snapshot() {
    let mut sys = Session::new();
    let mut snapshots = vec![ProjectState::new()];

    let s1 = run(
        &mut sys,
        snapshots.last().unwrap(),
        EditAction::add_cue(CueInit::new(0.0, 2.0, "first")),
    );
    snapshots.push(s1);

    let s2 = run(
        &mut sys,
        snapshots.last().unwrap(),
        EditAction::add_cue(CueInit::new(2.0, 4.0, "second")),
    );
    snapshots.push(s2);

    let first_id = snapshots[1].cues[0].id.clone();
    let s3 = run(
        &mut sys,
        snapshots.last().unwrap(),
        EditAction::update_cue(&first_id, CuePatch::default().with_text("first edited")),
    );
    snapshots.push(s3);

    let s4 = run(
        &mut sys,
        snapshots.last().unwrap(),
        EditAction::update_style(StylePatch {
            font_size: Some(48.0),
            ..Default::default()
        }),
    );
    snapshots.push(s4);

    let s5 = run(
        &mut sys,
        snapshots.last().unwrap(),
        EditAction::split_cue(&first_id, 1.0),
    );
    snapshots.push(s5);

    // Walk the whole session back; every step must land exactly on the
    // snapshot taken before the corresponding action.
    let mut current = snapshots.last().unwrap().clone();
    for expected in snapshots.iter().rev().skip(1) {
        let undone = sys.undo(&current).expect("undo available");
        assert_eq!(&undone.state, expected);
        current = undone.state;
    }
    assert!(!sys.can_undo());
    assert_eq!(sys.redo_count(), 5);
}

#[test]
fn test_redo_replays_the_session_forward() {
    let mut sys = Session::new();
    let s0 = ProjectState::new();
    let s1 = run(&mut sys, &s0, EditAction::add_cue(CueInit::new(0.0, 2.0, "a")));
    let s2 = run(
        &mut sys,
        &s1,
        EditAction::update_style(StylePatch {
            position: Some(50.0),
            ..Default::default()
        }),
    );

    let u1 = sys.undo(&s2).unwrap();
    let u2 = sys.undo(&u1.state).unwrap();
    assert_eq!(u2.state, s0);

    let r1 = sys.redo(&u2.state).unwrap();
    assert_eq!(r1.state, s1);
    let r2 = sys.redo(&r1.state).unwrap();
    assert_eq!(r2.state, s2);
    assert!(!sys.can_redo());
}

#[test]
fn test_new_edit_clears_redo_branch() {
    let mut sys = Session::new();
    let s0 = ProjectState::new();
    let s1 = run(&mut sys, &s0, EditAction::add_cue(CueInit::new(0.0, 2.0, "a")));
    let undone = sys.undo(&s1).unwrap();
    assert!(sys.can_redo());

    let _s2 = run(
        &mut sys,
        &undone.state,
        EditAction::add_cue(CueInit::new(5.0, 7.0, "b")),
    );
    assert!(!sys.can_redo());
}

#[test]
fn test_history_caps_at_hundred_entries() {
    let mut sys = Session::new();
    let mut state = ProjectState::new();
    for i in 0..110 {
        state = run(
            &mut sys,
            &state,
            EditAction::add_cue(CueInit::new(i as f64 * 2.0, i as f64 * 2.0 + 1.0, "x")),
        );
    }
    assert_eq!(state.cues.len(), 110);
    assert_eq!(sys.undo_count(), MAX_HISTORY);

    let mut current = state;
    let mut steps = 0;
    while let Some(undone) = sys.undo(&current) {
        current = undone.state;
        steps += 1;
    }
    // The ten oldest adds fell off the front and stay applied
    assert_eq!(steps, MAX_HISTORY);
    assert_eq!(current.cues.len(), 10);
}

#[test]
fn test_split_then_merge_through_the_system() {
    let mut sys = Session::new();
    let s0 = ProjectState::new();
    let s1 = run(
        &mut sys,
        &s0,
        EditAction::add_cue(CueInit::new(0.0, 4.0, "hello there world")),
    );
    let id = s1.cues[0].id.clone();

    let s2 = run(&mut sys, &s1, EditAction::split_cue(&id, 2.0));
    assert_eq!(s2.cues.len(), 2);
    let second_id = s2.cues[1].id.clone();

    let s3 = run(
        &mut sys,
        &s2,
        EditAction::merge_cues(vec![id.clone(), second_id]),
    );
    assert_eq!(s3.cues.len(), 1);
    assert_eq!(s3.cues[0].id, id);
    assert_eq!(s3.cues[0].start_time, 0.0);
    assert_eq!(s3.cues[0].end_time, 4.0);

    // Undo the merge, then the split, landing back on the single cue
    let u1 = sys.undo(&s3).unwrap();
    assert_eq!(u1.state, s2);
    let u2 = sys.undo(&u1.state).unwrap();
    assert_eq!(u2.state, s1);
}

#[test]
fn test_descriptions_surface_for_ui() {
    let mut sys = Session::new();
    let s0 = ProjectState::new();
    let s1 = run(&mut sys, &s0, EditAction::add_cue(CueInit::new(0.0, 2.0, "a")));
    assert_eq!(sys.undo_description(), Some("Add cue"));

    let _s2 = run(
        &mut sys,
        &s1,
        EditAction::update_style(StylePatch {
            font_size: Some(40.0),
            ..Default::default()
        }),
    );
    assert_eq!(sys.undo_description(), Some("Update fontSize"));
}

#[test]
fn test_transcription_intake_to_rendered_frame() {
    // Word timings come in, get grouped into cues, styled by an action,
    // and rendered on a playback tick.
    let engine = SubtitleEngine::new();
    let words = vec![
        SubtitleWord::new("Hello", 0.0, 1.0),
        SubtitleWord::new("beautiful", 1.0, 2.0),
        SubtitleWord::new("world", 2.0, 3.0),
    ];
    let cues = cues_from_words(&engine, &words, 8, 1.0);
    assert_eq!(cues.len(), 1);

    let mut sys = Session::new();
    let s0 = ProjectState::with_cues(cues);
    let id = s0.cues[0].id.clone();
    let s1 = run(
        &mut sys,
        &s0,
        EditAction::update_cue(
            &id,
            CuePatch::default().with_animation(Some(AnimationStyle::Karaoke)),
        ),
    );

    let colors = AnimationColors::from_style(&s1.style);
    let frame = render_frame_with(&s1.cues[0], 1.5, &colors);
    assert!(frame.visible);
    assert_eq!(frame.segments.len(), 3);
    assert_eq!(frame.segments[1].state, WordState::Active);
}

#[test]
fn test_library_template_applies_and_undoes() {
    let library = TemplateLibrary::new();
    let template = library.get("karaoke-party").unwrap();

    let mut sys = Session::new();
    let s0 = ProjectState::new();
    let s1 = run(
        &mut sys,
        &s0,
        EditAction::apply_template(&template.id, template.style.clone()),
    );

    assert_eq!(s1.active_template_id.as_deref(), Some("karaoke-party"));
    assert_eq!(s1.style.font_family, "Montserrat");
    assert_eq!(s1.style.highlight_color.as_deref(), Some("#FF4081"));

    let undone = sys.undo(&s1).unwrap();
    assert_eq!(undone.state, s0);
}

#[test]
fn test_saved_document_round_trips_mid_session() {
    let mut sys = Session::new();
    let s0 = ProjectState::new();
    let s1 = run(
        &mut sys,
        &s0,
        EditAction::add_cue(CueInit::new(0.0, 2.0, "persisted")),
    );
    let s2 = run(
        &mut sys,
        &s1,
        EditAction::apply_template(
            "bold-pop",
            StylePatch {
                font_size: Some(56.0),
                ..Default::default()
            },
        ),
    );

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("project.json");
    s2.save_to_path(&path).unwrap();
    let loaded = ProjectState::load_from_path(&path).unwrap();

    assert_eq!(loaded, s2);
    assert_eq!(loaded.active_template_id.as_deref(), Some("bold-pop"));

    // History does not persist; a fresh session starts empty
    let fresh = Session::new();
    assert!(!fresh.can_undo());
    let _ = fresh;
}

#[test]
fn test_inverse_of_inverse_reproduces_the_edit() {
    let mut sys = Session::new();
    let s0 = ProjectState::with_cues(vec![]);
    let s1 = run(&mut sys, &s0, EditAction::add_cue(CueInit::new(0.0, 2.0, "x")));

    // Manually drive the algebra: applying an executed action's inverse,
    // then that inverse's inverse, lands back where the action left us.
    let mut add = EditAction::add_cue(CueInit::new(2.0, 4.0, "y"));
    let s2 = add.execute(&s1);
    let mut back = add.inverse();
    let s3 = back.execute(&s2);
    assert_eq!(s3, s1);
    let mut forward = back.inverse();
    let s4 = forward.execute(&s3);
    assert_eq!(s4.cues.len(), 2);
}
