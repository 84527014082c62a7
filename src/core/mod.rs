//! Cueforge Core Engine
//!
//! Core editing engine module.
//! Handles cues, styles, undoable actions, caption animation, and the
//! project document boundary.

pub mod actions;
pub mod animation;
pub mod cues;
pub mod project;
pub mod style;
pub mod templates;

// Re-export common types
mod types;
pub use types::*;

mod error;
pub use error::*;

#[cfg(test)]
mod tests_session;
