//! Cueforge Core Library
//!
//! Non-destructive subtitle editing engine.
//! This library contains the cue model and its time-interval algorithms,
//! the style sanitizer, the generic undo/redo action system, and the
//! per-word caption animation renderer.
//!
//! ## Design
//!
//! Every editing operation goes through an invertible [`core::actions::EditAction`]
//! executed by an [`core::actions::ActionSystem`]; actions produce a *new*
//! [`core::project::ProjectState`] value, so prior snapshots stay valid for
//! undo and for external persistence.

pub mod core;
