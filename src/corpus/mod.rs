//! Filler corpus: scripted dialogues played when the feed is quiet.
//!
//! This module contains:
//! - [`Dialogue`] / [`DialogueTurn`]: scripted multi-turn exchanges,
//!   tagged with the balloon each turn is spoken on
//! - [`FillerCorpus`]: uniform random selection over a dialogue set
//! - [`builtin`]: a small default set so the engine runs out of the box

mod builtin;

pub use builtin::builtin;

use crate::surface::Channel;
use rand::Rng;

/// One turn of a scripted dialogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueTurn {
    /// Balloon the turn is spoken on.
    pub channel: Channel,
    /// Spoken text.
    pub text: String,
}

/// A scripted multi-turn dialogue.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dialogue {
    turns: Vec<DialogueTurn>,
}

impl Dialogue {
    /// Build a dialogue from its turns.
    pub fn new(turns: Vec<DialogueTurn>) -> Self {
        Self { turns }
    }

    /// The turns in playback order.
    pub fn turns(&self) -> &[DialogueTurn] {
        &self.turns
    }
}

/// An immutable dialogue set with uniform random selection.
///
/// Dialogues are copied out on selection; the corpus itself is never
/// consumed. An empty corpus is allowed but never yields anything, which
/// disables filler playback.
#[derive(Debug, Clone, Default)]
pub struct FillerCorpus {
    dialogues: Vec<Dialogue>,
}

impl FillerCorpus {
    /// Build a corpus from a dialogue set.
    pub fn new(dialogues: Vec<Dialogue>) -> Self {
        Self { dialogues }
    }

    /// Number of dialogues.
    pub fn len(&self) -> usize {
        self.dialogues.len()
    }

    /// Whether the corpus holds no dialogues.
    pub fn is_empty(&self) -> bool {
        self.dialogues.is_empty()
    }

    /// Pick one dialogue uniformly at random, `None` when empty.
    pub fn pick<R: Rng>(&self, rng: &mut R) -> Option<&Dialogue> {
        if self.dialogues.is_empty() {
            return None;
        }
        self.dialogues.get(rng.gen_range(0..self.dialogues.len()))
    }
}
