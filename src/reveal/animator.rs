//! Reveal Animator: advances a cursor through wrapped lines step by step.
//!
//! The animator is a pure state machine; pacing belongs to the caller.
//! Every step before completion yields exactly one frame describing what
//! the surface should show: the fully revealed lines inside the scroll
//! window plus the revealed prefix of the line under the cursor. Once the
//! last line is exhausted the animator turns terminal and stays there.

use crate::text::WrappedText;
use unicode_segmentation::UnicodeSegmentation;

/// Position of the reveal inside the wrapped text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealState {
    /// Index of the line currently being revealed.
    pub row: usize,
    /// Grapheme offset of the last revealed character in the current line.
    pub cursor: usize,
    /// Index of the first visible line.
    pub window_start: usize,
}

/// One frame of the reveal, ready to hand to a display surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Fully revealed lines from the window start up to the current row.
    pub full_lines: Vec<String>,
    /// Revealed prefix of the current row.
    pub partial: String,
}

/// Outcome of a single animator step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepResult {
    /// The reveal advanced; the surface should draw this frame.
    Frame(Frame),
    /// The reveal is complete; no frame accompanies this result.
    Done,
}

/// State machine revealing a [`WrappedText`] one grapheme per step.
///
/// The visible window holds at most `window_rows` lines including the one
/// being revealed; when the cursor moves past that, the window start
/// advances and earlier lines scroll out of view for good.
pub struct RevealAnimator {
    text: WrappedText,
    state: RevealState,
    window_rows: usize,
    done: bool,
}

impl RevealAnimator {
    /// Create an animator over `text` with a visible window of
    /// `window_rows` lines (clamped to at least one).
    ///
    /// An empty text is terminal from the start and yields no frames.
    pub fn new(text: WrappedText, window_rows: usize) -> Self {
        let done = text.is_empty();
        Self {
            text,
            state: RevealState {
                row: 0,
                cursor: 0,
                window_start: 0,
            },
            window_rows: window_rows.max(1),
            done,
        }
    }

    /// Current reveal position.
    pub const fn state(&self) -> RevealState {
        self.state
    }

    /// Whether the reveal has finished.
    pub const fn is_done(&self) -> bool {
        self.done
    }

    /// Frame for the state before any step has run.
    ///
    /// A freshly exposed surface already shows the first grapheme of the
    /// first line; this is that frame. `None` once terminal.
    pub fn initial_frame(&self) -> Option<Frame> {
        if self.done {
            None
        } else {
            Some(self.frame())
        }
    }

    /// Advance the reveal by one step.
    ///
    /// Returns the frame to draw, or [`StepResult::Done`] once the text is
    /// exhausted. Stepping a terminal animator keeps returning `Done`.
    pub fn step(&mut self) -> StepResult {
        if self.done {
            return StepResult::Done;
        }

        if self.state.cursor + 1 < self.line_len(self.state.row) {
            self.state.cursor += 1;
        } else {
            self.state.row += 1;
            self.state.cursor = 0;
            if self.state.row - self.state.window_start == self.window_rows {
                self.state.window_start += 1;
            }
            if self.state.row == self.text.len() {
                self.done = true;
                return StepResult::Done;
            }
        }

        StepResult::Frame(self.frame())
    }

    /// Frame for the current state.
    fn frame(&self) -> Frame {
        let full_lines = (self.state.window_start..self.state.row)
            .filter_map(|index| self.text.get(index))
            .map(|line| line.text.clone())
            .collect();
        let partial = self.text.get(self.state.row).map_or_else(String::new, |line| {
            line.text.graphemes(true).take(self.state.cursor + 1).collect()
        });

        Frame { full_lines, partial }
    }

    /// Grapheme count of the line at `row`, zero past the end.
    fn line_len(&self, row: usize) -> usize {
        self.text
            .get(row)
            .map_or(0, |line| line.text.graphemes(true).count())
    }
}
