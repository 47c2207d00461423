//! # Zoetrope
//!
//! A tick-paced speech-balloon engine for desktop mascots.
//!
//! Zoetrope animates short text messages one character at a time inside a
//! fixed-size balloon while a background pipeline keeps discovering new
//! messages from an external feed and mixing them, at a controlled rate,
//! into what is actually shown. When the feed is quiet, scripted filler
//! dialogue keeps the mascot talking.
//!
//! ## Core Concepts
//!
//! - **Measured wrapping**: text is wrapped by injected width measurement,
//!   so terminal columns and proportional fonts use the same code path
//! - **Reveal window**: the animation scrolls a bounded window of lines,
//!   so balloon height is fixed no matter how long the message is
//! - **Watermark polling**: incremental feed queries driven by a
//!   monotonic last-seen timestamp; nothing is shown twice
//! - **Worker threads**: poll, mix, and playback each own a thread, so a
//!   slow reveal never delays discovery
//!
//! ## Example
//!
//! ```rust,ignore
//! use zoetrope::{builtin, Engine, EngineConfig, FeedTarget, MonospaceMeasure};
//!
//! let config = EngineConfig::new(FeedTarget {
//!     keyword: "mascot".into(),
//!     identity: "mascot_dev".into(),
//!     language: "ja".into(),
//! });
//!
//! // `service` implements SearchService, `surface` implements DisplaySurface
//! let engine = Engine::spawn(service, surface, MonospaceMeasure, config, builtin());
//! // ... run the host UI ...
//! engine.join();
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod corpus;
pub mod feed;
pub mod reveal;
pub mod surface;
pub mod text;

// Re-exports for convenience
pub use actor::{Engine, EngineConfig, PlayItem, PlaybackConfig};
pub use corpus::{builtin, Dialogue, DialogueTurn, FillerCorpus};
pub use feed::{FeedError, FeedMessage, FeedTarget, RawItem, SearchQuery, SearchService};
pub use reveal::{choose_side, Placement, RevealAnimator, Side};
pub use surface::{Channel, DisplaySurface};
pub use text::{wrap, MonospaceMeasure, TextMeasure, WrappedText};
