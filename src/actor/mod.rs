//! Worker threads: the pipeline's three timelines and their wiring.
//!
//! Three threads run for the engine's lifetime:
//! - **Poll**: queries the feed on a fixed period, screens results,
//!   fills the fetch queue
//! - **Mixer**: on its own period, moves live or filler content into
//!   the playback queue
//! - **Playback**: blocks on the playback queue, animates one item at
//!   a time on the display surface
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐  FetchQueue   ┌─────────────┐  PlayItem     ┌──────────────┐
//! │ Poll Thread │ ────────────▶ │ Mixer Thread│ ────────────▶ │ Playback     │
//! │ (search +   │               │ (live/filler│   (channel)   │ Thread       │
//! │  screen)    │               │  weighting) │               │ (reveal tick)│
//! └─────────────┘               └─────────────┘               └──────────────┘
//!                                                                    │
//!                                                                    ▼
//!                                                             DisplaySurface
//! ```
//!
//! Poll and Mixer are self-scheduling: each runs its body, then sleeps
//! its period, so runs of one scheduler never overlap and the two never
//! block each other. Playback blocks on a channel receive; the mixer's
//! send is its wakeup. Every loop exits promptly on shutdown.

mod engine;
mod messages;
mod mixer;
mod pacer;
mod playback;
mod poll;

pub use engine::{Engine, EngineConfig};
pub use messages::PlayItem;
pub use mixer::{MixActor, MixRunner};
pub use pacer::{sleep_interruptible, Pacer};
pub use playback::{PlaybackActor, PlaybackConfig, PlaybackRunner};
pub use poll::{PollActor, PollRunner};
