//! Engine: wires the pipeline and owns the worker threads.
//!
//! `Engine::spawn` builds the queues, starts the poll, mixer, and
//! playback threads, and hands back a handle that shuts the whole
//! pipeline down on request (or on drop). The host supplies the search
//! collaborator, the display surface, the width measurer, and the filler
//! corpus; everything in between is internal.

use super::mixer::{MixActor, MixRunner};
use super::playback::{PlaybackActor, PlaybackConfig, PlaybackRunner};
use super::poll::{PollActor, PollRunner};
use crate::corpus::FillerCorpus;
use crate::feed::{FeedTarget, FetchQueue, SearchService};
use crate::surface::DisplaySurface;
use crate::text::TextMeasure;
use crossbeam_channel::unbounded;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;
use tracing::info;

/// Allowed range for the externally persisted poll period, in seconds.
const POLL_PERIOD_SECS: (u64, u64) = (1, 6000);
/// Allowed range for the externally persisted merge period, in seconds.
const MERGE_PERIOD_SECS: (u64, u64) = (1, 600);

/// Configuration for the pipeline.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Keyword, identity, and language the poll loop tracks.
    pub target: FeedTarget,
    /// Time between poll runs.
    pub poll_period: Duration,
    /// Time between merge runs.
    pub merge_period: Duration,
    /// Probability of preferring live content over filler per merge run.
    pub live_bias: f64,
    /// Playback pacing and layout.
    pub playback: PlaybackConfig,
}

impl EngineConfig {
    /// Defaults for `target`: 60s polls, 20s merges, 0.85 live bias.
    pub fn new(target: FeedTarget) -> Self {
        Self {
            target,
            poll_period: Duration::from_secs(60),
            merge_period: Duration::from_secs(20),
            live_bias: 0.85,
            playback: PlaybackConfig::default(),
        }
    }

    /// Set the poll period from persisted user settings, clamped to
    /// [1, 6000] seconds.
    pub fn poll_period_secs(mut self, secs: u64) -> Self {
        self.poll_period = Duration::from_secs(secs.clamp(POLL_PERIOD_SECS.0, POLL_PERIOD_SECS.1));
        self
    }

    /// Set the merge period from persisted user settings, clamped to
    /// [1, 600] seconds.
    pub fn merge_period_secs(mut self, secs: u64) -> Self {
        self.merge_period =
            Duration::from_secs(secs.clamp(MERGE_PERIOD_SECS.0, MERGE_PERIOD_SECS.1));
        self
    }
}

/// Handle to a running pipeline.
///
/// Dropping the handle shuts the pipeline down; call [`join`](Self::join)
/// to also wait for the threads to exit.
pub struct Engine {
    poll: Option<PollActor>,
    mixer: Option<MixActor>,
    playback: Option<PlaybackActor>,
    fetch: FetchQueue,
}

impl Engine {
    /// Spawn the pipeline.
    ///
    /// `service` is polled for live messages, `surface` receives every
    /// reveal frame, `measure` maps candidate lines to widths in the
    /// host's units, and `corpus` fills the quiet stretches.
    pub fn spawn<S, D, M>(
        service: S,
        surface: D,
        measure: M,
        config: EngineConfig,
        corpus: FillerCorpus,
    ) -> Self
    where
        S: SearchService + Send + 'static,
        D: DisplaySurface + 'static,
        M: TextMeasure + Send + 'static,
    {
        info!(
            identity = %config.target.identity,
            poll_period = ?config.poll_period,
            merge_period = ?config.merge_period,
            "engine starting"
        );

        let fetch = FetchQueue::new();
        let (playback_tx, playback_rx) = unbounded();

        let poll = PollActor::spawn(
            PollRunner::new(service, config.target, fetch.clone()),
            config.poll_period,
        );
        let mixer = MixActor::spawn(
            MixRunner::new(fetch.clone(), corpus, config.live_bias, StdRng::from_entropy()),
            playback_tx,
            config.merge_period,
        );
        let playback = PlaybackActor::spawn(
            PlaybackRunner::new(surface, measure, config.playback),
            playback_rx,
        );

        Self {
            poll: Some(poll),
            mixer: Some(mixer),
            playback: Some(playback),
            fetch,
        }
    }

    /// Messages discovered but not yet merged into playback.
    pub fn pending_live(&self) -> usize {
        self.fetch.len()
    }

    /// Signal every worker to shutdown.
    ///
    /// The mixer drops its playback sender as it exits, which unblocks a
    /// playback consumer waiting on an empty queue.
    pub fn shutdown(&self) {
        if let Some(poll) = &self.poll {
            poll.shutdown();
        }
        if let Some(mixer) = &self.mixer {
            mixer.shutdown();
        }
        if let Some(playback) = &self.playback {
            playback.shutdown();
        }
    }

    /// Shut down and wait for every worker to exit.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(poll) = self.poll.take() {
            poll.join();
        }
        if let Some(mixer) = self.mixer.take() {
            mixer.join();
        }
        if let Some(playback) = self.playback.take() {
            playback.join();
        }
        info!("engine stopped");
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{Dialogue, DialogueTurn, FillerCorpus};
    use crate::feed::{Author, FeedError, FeedTarget, RawItem, SearchQuery, Timestamp};
    use crate::surface::Channel;
    use crossbeam_channel::{unbounded as channel, Sender};
    use std::time::Duration;
    use unicode_segmentation::UnicodeSegmentation;

    /// Surface that reports every shown partial over a channel.
    struct NotifyingSurface {
        shows: Sender<(Channel, String)>,
    }

    impl DisplaySurface for NotifyingSurface {
        fn show_text(&self, channel: Channel, _full_lines: &[String], partial: &str) {
            let _ = self.shows.send((channel, partial.to_string()));
        }

        fn clear(&self, _channel: Channel) {}

        fn request_redraw(&self, _channel: Channel) {}
    }

    struct OneShotService;

    impl SearchService for OneShotService {
        fn search(&self, query: &SearchQuery) -> Result<Vec<RawItem>, FeedError> {
            if query.since.is_some() {
                return Ok(Vec::new());
            }
            Ok(vec![RawItem {
                author: Some(Author {
                    identity: "mascot_dev".to_string(),
                    name: "Mascot Dev".to_string(),
                }),
                body: "live!".to_string(),
                created_at: Timestamp::Raw("2026-08-23T12:00:00+00:00".to_string()),
                quoted_reply: None,
            }])
        }
    }

    fn per_grapheme(s: &str) -> u32 {
        u32::try_from(s.graphemes(true).count()).unwrap_or(u32::MAX)
    }

    fn fast_config() -> EngineConfig {
        let mut config = EngineConfig::new(FeedTarget {
            keyword: "mascot".to_string(),
            identity: "mascot_dev".to_string(),
            language: "ja".to_string(),
        });
        config.poll_period = Duration::from_millis(5);
        config.merge_period = Duration::from_millis(5);
        config.playback.tick_interval = Duration::from_millis(1);
        config.playback.aside_pause = Duration::from_millis(1);
        config.playback.body_pause = Duration::from_millis(1);
        config.playback.clear_pause = Duration::from_millis(1);
        config.playback.turn_pause = Duration::from_millis(1);
        config
    }

    fn tiny_corpus() -> FillerCorpus {
        FillerCorpus::new(vec![Dialogue::new(vec![DialogueTurn {
            channel: Channel::Main,
            text: "...".to_string(),
        }])])
    }

    #[test]
    fn test_live_message_reaches_surface() {
        let (shows_tx, shows_rx) = channel();
        let engine = Engine::spawn(
            OneShotService,
            NotifyingSurface { shows: shows_tx },
            per_grapheme,
            fast_config(),
            tiny_corpus(),
        );

        // The one live message must make it through poll, mix, and
        // playback without any external nudge
        let deadline = std::time::Instant::now() + Duration::from_secs(5);
        loop {
            let remaining = deadline.saturating_duration_since(std::time::Instant::now());
            let (channel, partial) = shows_rx
                .recv_timeout(remaining)
                .expect("nothing reached the surface");
            if channel == Channel::Main && partial == "live!" {
                break;
            }
        }

        engine.join();
    }

    #[test]
    fn test_filler_flows_without_feed() {
        struct EmptyService;
        impl SearchService for EmptyService {
            fn search(&self, _query: &SearchQuery) -> Result<Vec<RawItem>, FeedError> {
                Ok(Vec::new())
            }
        }

        let (shows_tx, shows_rx) = channel();
        let engine = Engine::spawn(
            EmptyService,
            NotifyingSurface { shows: shows_tx },
            per_grapheme,
            fast_config(),
            tiny_corpus(),
        );

        let (_, partial) = shows_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(partial, ".");
        assert_eq!(engine.pending_live(), 0);

        engine.join();
    }

    #[test]
    fn test_period_setters_clamp() {
        let config = fast_config().poll_period_secs(0).merge_period_secs(9999);
        assert_eq!(config.poll_period, Duration::from_secs(1));
        assert_eq!(config.merge_period, Duration::from_secs(600));

        let config = fast_config().poll_period_secs(120).merge_period_secs(30);
        assert_eq!(config.poll_period, Duration::from_secs(120));
        assert_eq!(config.merge_period, Duration::from_secs(30));
    }

    #[test]
    fn test_join_returns_promptly() {
        let (shows_tx, _shows_rx) = channel();
        let mut config = fast_config();
        // Long periods: join must not wait a full period out
        config.poll_period = Duration::from_secs(3600);
        config.merge_period = Duration::from_secs(3600);

        let engine = Engine::spawn(
            OneShotService,
            NotifyingSurface { shows: shows_tx },
            per_grapheme,
            config,
            tiny_corpus(),
        );

        let start = std::time::Instant::now();
        engine.join();
        assert!(start.elapsed() < Duration::from_secs(5));
    }
}
