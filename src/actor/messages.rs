//! Messages exchanged between the pipeline workers.

use crate::corpus::Dialogue;
use crate::feed::FeedMessage;

/// One unit of playback work, produced by the merge loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayItem {
    /// A live message discovered by the poll loop.
    Message(FeedMessage),
    /// A scripted filler dialogue.
    Filler(Dialogue),
}
