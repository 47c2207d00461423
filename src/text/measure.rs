//! Width measurement injected into the wrapper.
//!
//! Measurement depends on the host's font and rendering context, so the
//! wrapper never measures anything itself. Hosts hand in whatever maps a
//! candidate string to a width: a Pango layout, a font atlas, or plain
//! terminal columns.

use unicode_width::UnicodeWidthStr;

/// Measures the display width of a candidate string.
///
/// The wrapper calls this with the whole accumulated line plus the next
/// grapheme, so contextual measurers (ligatures, kerning) see the full
/// string rather than isolated characters.
///
/// Any `Fn(&str) -> u32` closure implements this trait.
pub trait TextMeasure {
    /// Width of `text` in the measurer's own units.
    fn width(&self, text: &str) -> u32;
}

impl<F> TextMeasure for F
where
    F: Fn(&str) -> u32,
{
    fn width(&self, text: &str) -> u32 {
        self(text)
    }
}

/// Terminal-column measurement: one unit per column, double-width aware.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonospaceMeasure;

impl TextMeasure for MonospaceMeasure {
    fn width(&self, text: &str) -> u32 {
        u32::try_from(UnicodeWidthStr::width(text)).unwrap_or(u32::MAX)
    }
}
