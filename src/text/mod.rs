//! Text module: width measurement and line wrapping.
//!
//! This module contains:
//! - [`TextMeasure`]: injected width measurement (host font context)
//! - [`MonospaceMeasure`]: built-in terminal-column measurement
//! - [`wrap`]: the measured-width accumulation wrapper
//! - [`Line`] / [`WrappedText`]: the wrapped output, reconstructible

mod measure;
mod wrap;

pub use measure::{MonospaceMeasure, TextMeasure};
pub use wrap::{wrap, Line, WrappedText};
