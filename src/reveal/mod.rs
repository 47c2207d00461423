//! Reveal module: the tick-driven character reveal.
//!
//! This module contains:
//! - [`RevealAnimator`]: steps a cursor through wrapped lines, one grapheme
//!   per step, inside a bounded scroll window
//! - [`Frame`] / [`StepResult`]: what each step hands the display surface
//! - [`choose_side`]: balloon side selection with hysteresis for anchored
//!   surfaces

mod animator;
mod placement;

pub use animator::{Frame, RevealAnimator, RevealState, StepResult};
pub use placement::{choose_side, Placement, Side};
