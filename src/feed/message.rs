//! Feed item types, raw and accepted.

use super::service::FeedError;
use chrono::{DateTime, Utc};

/// Author of a raw feed item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    /// Stable identity handle, matched exactly by the filter.
    pub identity: String,
    /// Human-readable display name.
    pub name: String,
}

/// A quoted reply attached to a feed item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotedReply {
    /// Display name of the quoted author.
    pub author_name: String,
    /// The quoted text.
    pub body: String,
}

/// Creation time of a raw item, as delivered by the collaborator.
///
/// Some collaborators parse timestamps themselves; others pass the wire
/// string through and leave parsing to the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Timestamp {
    /// Already parsed by the collaborator.
    Parsed(DateTime<Utc>),
    /// Raw wire text, parsed here.
    Raw(String),
}

impl Timestamp {
    /// Parse into a UTC instant.
    ///
    /// Accepts RFC 3339, RFC 2822, and the legacy
    /// `%a %b %d %H:%M:%S %z %Y` form still used by older feed APIs.
    pub fn parse(&self) -> Result<DateTime<Utc>, FeedError> {
        match self {
            Self::Parsed(ts) => Ok(*ts),
            Self::Raw(raw) => DateTime::parse_from_rfc3339(raw)
                .or_else(|_| DateTime::parse_from_rfc2822(raw))
                .or_else(|_| DateTime::parse_from_str(raw, "%a %b %d %H:%M:%S %z %Y"))
                .map(|ts| ts.with_timezone(&Utc))
                .map_err(|_| FeedError::Timestamp { raw: raw.clone() }),
        }
    }
}

/// An item as returned by the search collaborator, before screening.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawItem {
    /// Item author, when the collaborator resolved one.
    pub author: Option<Author>,
    /// Message text.
    pub body: String,
    /// Creation time.
    pub created_at: Timestamp,
    /// Quoted reply, when the item carries one.
    pub quoted_reply: Option<QuotedReply>,
}

/// An accepted message on its way through the pipeline.
///
/// Owned by exactly one queue at a time and consumed exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedMessage {
    /// Display name of the author.
    pub author_name: String,
    /// Message text.
    pub body: String,
    /// Parsed creation time, when one was available.
    pub timestamp: Option<DateTime<Utc>>,
    /// Quoted reply to play as an aside before the body.
    pub quoted_reply: Option<QuotedReply>,
}
