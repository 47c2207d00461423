//! Search collaborator contract and feed errors.

use super::message::RawItem;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors surfaced by the feed pipeline.
///
/// Both variants are caught at the poll-run boundary and logged; neither
/// ever reaches playback.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The search collaborator failed outright.
    #[error("search failed: {message}")]
    Search {
        /// Collaborator-provided failure description.
        message: String,
    },
    /// A timestamp could not be parsed in any supported format.
    #[error("unparseable timestamp: {raw:?}")]
    Timestamp {
        /// The raw timestamp text.
        raw: String,
    },
}

/// What the poll loop tracks: one author's posts matching one keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedTarget {
    /// Search keyword.
    pub keyword: String,
    /// Author identity accepted by the filter.
    pub identity: String,
    /// Language filter passed to the collaborator.
    pub language: String,
}

impl FeedTarget {
    /// Build the query for one poll run.
    pub fn query(&self, since: Option<DateTime<Utc>>) -> SearchQuery {
        SearchQuery {
            keyword: self.keyword.clone(),
            exclude_reposts: true,
            since,
            language: self.language.clone(),
        }
    }
}

/// Query handed to the search collaborator for one poll run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Keyword the feed is tracked by.
    pub keyword: String,
    /// Ask the collaborator to exclude reposts and link-share mentions.
    pub exclude_reposts: bool,
    /// Lower date bound derived from the watermark, if one is set.
    pub since: Option<DateTime<Utc>>,
    /// Language filter, e.g. `"ja"`.
    pub language: String,
}

/// External search collaborator.
///
/// Implementations own transport details (HTTP, auth, paging); the
/// pipeline only sees the resulting items, newest first. The call runs on
/// the poll thread and may take as long as it needs — a slow collaborator
/// delays only the next poll, never playback.
pub trait SearchService {
    /// Run one search and return matching items, newest first.
    fn search(&self, query: &SearchQuery) -> Result<Vec<RawItem>, FeedError>;
}
