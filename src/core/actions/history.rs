//! Undo/Redo History
//!
//! Generic LIFO undo/redo executor. State-shape agnostic: it only relies
//! on the [`Action`] contract, and never touches the state's internals.

use std::collections::VecDeque;
use std::marker::PhantomData;

/// Maximum number of history entries. Fixed, not configurable.
pub const MAX_HISTORY: usize = 100;

// =============================================================================
// Action Contract
// =============================================================================

/// An invertible edit over a state of type `S`.
///
/// `execute` returns a *new* state value and records, inside the action,
/// whatever prior values its inverse needs. `inverse` must therefore only
/// be called after `execute`, and an action must not be executed twice
/// without re-deriving its inverse.
pub trait Action<S> {
    /// Applies the action, returning the new state
    fn execute(&mut self, state: &S) -> S;

    /// Builds the exact reverse of the executed action
    fn inverse(&self) -> Self
    where
        Self: Sized;

    /// Human-readable summary for undo/redo UI labels
    fn description(&self) -> String;

    /// Stable action kind name, for logging
    fn kind(&self) -> &'static str;
}

// =============================================================================
// History Entry
// =============================================================================

/// Entry in the undo/redo history
#[derive(Clone, Debug)]
pub struct HistoryEntry<A> {
    /// The executed action
    pub action: A,
    /// Description captured at execute time
    pub description: String,
    /// Timestamp when the action was executed (RFC 3339)
    pub timestamp: String,
}

impl<A> HistoryEntry<A> {
    fn new(action: A, description: String) -> Self {
        Self {
            action,
            description,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Result of an undo or redo step
#[derive(Clone, Debug)]
pub struct Undone<S> {
    /// The state after the step
    pub state: S,
    /// Description of the action that was undone/redone
    pub description: String,
}

// =============================================================================
// Action System
// =============================================================================

/// Executes actions and manages undo/redo history.
///
/// Owns nothing but its two stacks; all state flows through the
/// executed actions as values.
pub struct ActionSystem<S, A> {
    undo_stack: VecDeque<HistoryEntry<A>>,
    redo_stack: VecDeque<HistoryEntry<A>>,
    _state: PhantomData<fn(S) -> S>,
}

impl<S, A: Action<S>> ActionSystem<S, A> {
    /// Creates an empty action system
    pub fn new() -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            _state: PhantomData,
        }
    }

    /// Executes an action, pushes it onto the undo stack, and clears the
    /// redo stack (a new action invalidates any previously-undone branch).
    ///
    /// The oldest entry is dropped once the stack exceeds [`MAX_HISTORY`].
    pub fn execute(&mut self, state: &S, mut action: A) -> S {
        let new_state = action.execute(state);
        let description = action.description();

        self.redo_stack.clear();
        self.undo_stack.push_back(HistoryEntry::new(action, description));
        while self.undo_stack.len() > MAX_HISTORY {
            self.undo_stack.pop_front();
        }

        new_state
    }

    /// Undoes the last action by applying its inverse.
    ///
    /// Returns `None` if the undo stack is empty.
    pub fn undo(&mut self, state: &S) -> Option<Undone<S>> {
        let entry = self.undo_stack.pop_back()?;

        let mut inverse = entry.action.inverse();
        let new_state = inverse.execute(state);

        let description = entry.description.clone();
        self.redo_stack.push_back(entry);

        Some(Undone {
            state: new_state,
            description,
        })
    }

    /// Redoes the last undone action by re-executing it.
    ///
    /// Returns `None` if the redo stack is empty.
    pub fn redo(&mut self, state: &S) -> Option<Undone<S>> {
        let mut entry = self.redo_stack.pop_back()?;

        let new_state = entry.action.execute(state);

        let description = entry.description.clone();
        self.undo_stack.push_back(HistoryEntry::new(entry.action, entry.description));

        Some(Undone {
            state: new_state,
            description,
        })
    }

    /// Returns true if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns true if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Description of the action undo would revert, without popping
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.back().map(|e| e.description.as_str())
    }

    /// Description of the action redo would re-apply, without popping
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack.back().map(|e| e.description.as_str())
    }

    /// Number of entries in the undo stack
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of entries in the redo stack
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// Clears all history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

impl<S, A: Action<S>> Default for ActionSystem<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
