//! Per-item acceptance policy for poll batches.

use super::message::{FeedMessage, RawItem};
use chrono::{DateTime, Utc};

/// Leading marker of a repost body.
pub const REPOST_PREFIX: &str = "RT ";

/// Why an item was excluded from a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Author missing or not the tracked identity.
    AuthorMismatch,
    /// Body carries the repost marker.
    Repost,
    /// Timestamp missing or unparseable while a watermark is set.
    BadTimestamp,
    /// Timestamp not strictly after the watermark.
    NotAfterWatermark,
}

/// Outcome of screening one raw item.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// Item accepted for playback.
    Accept(FeedMessage),
    /// Item excluded by policy. Skips are expected, not errors.
    Skip(SkipReason),
}

/// Screen one raw item against the tracked identity and the watermark
/// snapshot taken at the start of the poll run.
///
/// On a cold start (no watermark) every author-matching, non-repost item
/// is accepted, parseable timestamp or not. Once a watermark exists the
/// timestamp must parse and lie strictly after it; an exact tie is
/// rejected.
pub fn screen(item: RawItem, identity: &str, watermark: Option<DateTime<Utc>>) -> Verdict {
    let Some(author) = item.author else {
        return Verdict::Skip(SkipReason::AuthorMismatch);
    };
    if author.identity != identity {
        return Verdict::Skip(SkipReason::AuthorMismatch);
    }
    if item.body.starts_with(REPOST_PREFIX) {
        return Verdict::Skip(SkipReason::Repost);
    }

    let parsed = item.created_at.parse().ok();
    if let Some(watermark) = watermark {
        let Some(ts) = parsed else {
            return Verdict::Skip(SkipReason::BadTimestamp);
        };
        if ts <= watermark {
            return Verdict::Skip(SkipReason::NotAfterWatermark);
        }
    }

    Verdict::Accept(FeedMessage {
        author_name: author.name,
        body: item.body,
        timestamp: parsed,
        quoted_reply: item.quoted_reply,
    })
}
