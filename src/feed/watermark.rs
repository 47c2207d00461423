//! Watermark: the monotonic lower bound for incremental polls.

use chrono::{DateTime, Utc};

/// Latest accepted message timestamp.
///
/// Owned by the poll loop and written only there, after screening a batch.
/// The value never moves backward; queries use it as their "since" bound
/// so already-seen items are not fetched again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Watermark {
    value: Option<DateTime<Utc>>,
}

impl Watermark {
    /// A watermark with no value yet (cold start).
    pub const fn new() -> Self {
        Self { value: None }
    }

    /// Current value, if any poll has set one.
    pub const fn get(&self) -> Option<DateTime<Utc>> {
        self.value
    }

    /// Whether no value has been recorded yet.
    pub const fn is_unset(&self) -> bool {
        self.value.is_none()
    }

    /// Advance to `candidate` if it is ahead of the current value.
    ///
    /// Returns whether the watermark moved. Equal and earlier candidates
    /// leave it untouched.
    pub fn advance(&mut self, candidate: DateTime<Utc>) -> bool {
        match self.value {
            Some(current) if candidate <= current => false,
            _ => {
                self.value = Some(candidate);
                true
            }
        }
    }
}
