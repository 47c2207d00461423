//! Built-in filler dialogues.
//!
//! A deliberately small default set, enough that a freshly wired engine
//! has something to say while the feed is quiet. Hosts ship their own
//! scripted content for anything beyond smoke testing.

use super::{Dialogue, DialogueTurn, FillerCorpus};
use crate::surface::Channel;

const DIALOGUES: &[&[(Channel, &str)]] = &[
    &[
        (Channel::Main, "Quiet on the feed today."),
        (Channel::Aside, "Enjoy it while it lasts."),
    ],
    &[
        (Channel::Main, "Did you water the cactus this week?"),
        (Channel::Aside, "It is a cactus. It forgives."),
        (Channel::Main, "That is not the same as watering it."),
    ],
    &[
        (Channel::Aside, "You have been staring at that screen a while."),
        (Channel::Main, "The screen started it."),
    ],
    &[
        (Channel::Main, "I rehearsed something to say."),
        (Channel::Aside, "And?"),
        (Channel::Main, "This was it. This is the thing."),
    ],
    &[
        (Channel::Aside, "Stretch break?"),
        (Channel::Main, "After this line finishes scrolling."),
    ],
    &[
        (Channel::Main, "A watched feed never refreshes."),
        (Channel::Aside, "It refreshes exactly as often either way."),
        (Channel::Main, "Let me have my proverbs."),
    ],
];

/// The built-in corpus.
pub fn builtin() -> FillerCorpus {
    FillerCorpus::new(
        DIALOGUES
            .iter()
            .map(|turns| {
                Dialogue::new(
                    turns
                        .iter()
                        .map(|(channel, text)| DialogueTurn {
                            channel: *channel,
                            text: (*text).to_string(),
                        })
                        .collect(),
                )
            })
            .collect(),
    )
}
