//! Feed module: discovery and screening of live messages.
//!
//! This module contains:
//! - [`SearchService`] / [`SearchQuery`]: the external collaborator contract
//! - [`FeedTarget`]: the keyword/identity/language the poll loop tracks
//! - [`screen`]: the per-item acceptance policy
//! - [`Watermark`]: monotonic lower bound for incremental queries
//! - [`FetchQueue`]: thread-safe FIFO toward the merge loop
//! - [`FeedError`]: what can go wrong, caught at the poll-run boundary

mod filter;
mod message;
mod queue;
mod service;
mod watermark;

pub use filter::{screen, SkipReason, Verdict, REPOST_PREFIX};
pub use message::{Author, FeedMessage, QuotedReply, RawItem, Timestamp};
pub use queue::FetchQueue;
pub use service::{FeedError, FeedTarget, SearchQuery, SearchService};
pub use watermark::Watermark;
