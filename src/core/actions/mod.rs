//! Action System
//!
//! Undo/redo infrastructure for the editing session.
//!
//! [`ActionSystem`] is a generic LIFO undo/redo executor that knows
//! nothing about subtitles; [`EditAction`] is the concrete tagged union
//! of subtitle edits, each of which captures exactly the prior state it
//! overwrites so it can build its own precise inverse.

mod edit;
mod history;

pub use edit::EditAction;
pub use history::{Action, ActionSystem, HistoryEntry, Undone, MAX_HISTORY};
