//! Line wrapping by measured-width accumulation.
//!
//! The wrapper scans grapheme clusters left to right, growing an
//! accumulator until appending the next grapheme would push the measured
//! width past the limit, then closes the line and starts a new one with
//! that grapheme. Explicit line breaks always close the current line,
//! even an empty one, and never appear in the output.

use super::measure::TextMeasure;
use unicode_segmentation::UnicodeSegmentation;

/// A single wrapped line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Line content, free of line-break characters.
    pub text: String,
    /// Whether the line was closed by an explicit break in the source.
    pub hard_break: bool,
}

/// The wrapped form of one message.
///
/// Produced once per message by [`wrap`] and never mutated afterwards.
/// [`reconstruct`](Self::reconstruct) reassembles the source text exactly;
/// carriage-return/line-feed pairs are normalized to a single `\n`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WrappedText {
    lines: Vec<Line>,
}

impl WrappedText {
    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether there are no lines at all.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The line at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    /// Iterate over the lines in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Line> {
        self.lines.iter()
    }

    /// Reassemble the source text, re-inserting explicit breaks.
    pub fn reconstruct(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(&line.text);
            if line.hard_break {
                out.push('\n');
            }
        }
        out
    }
}

/// Wrap `text` into lines no wider than `max_width`.
///
/// Measurement is applied to the whole candidate line (accumulator plus
/// next grapheme), so proportional measurers work as well as fixed-column
/// ones. A single grapheme wider than `max_width` is still placed alone on
/// its own line rather than dropped or split.
pub fn wrap(text: &str, measure: &impl TextMeasure, max_width: u32) -> WrappedText {
    let mut lines = Vec::new();
    let mut acc = String::new();

    for grapheme in text.graphemes(true) {
        if grapheme == "\n" || grapheme == "\r\n" {
            lines.push(Line {
                text: std::mem::take(&mut acc),
                hard_break: true,
            });
            continue;
        }

        let prev_len = acc.len();
        acc.push_str(grapheme);
        if prev_len > 0 && measure.width(&acc) > max_width {
            // Overflow: the line closes before this grapheme, which starts
            // the next accumulator.
            let overflow = acc.split_off(prev_len);
            lines.push(Line {
                text: std::mem::take(&mut acc),
                hard_break: false,
            });
            acc = overflow;
        }
    }

    if !acc.is_empty() {
        lines.push(Line {
            text: acc,
            hard_break: false,
        });
    }

    WrappedText { lines }
}
