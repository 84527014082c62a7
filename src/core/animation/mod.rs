//! Caption Animation Module
//!
//! Pure per-word animation rendering: `(cue, time) -> frame`. The
//! renderer reads only the cue's word-timing data and never mutates
//! anything, so it is safe to call on every playback tick.

mod easing;
mod renderer;

pub use easing::ease_out_bounce;
pub use renderer::{
    render_frame, render_frame_with, AnimatedCaptionFrame, AnimationColors, WordSegment, WordState,
};
