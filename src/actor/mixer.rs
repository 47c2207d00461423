//! Merge Scheduler: feeds the playback queue from live or filler content.
//!
//! Each run produces exactly one play item. Live content is preferred
//! with a configured bias when the fetch queue has something waiting;
//! otherwise a filler dialogue is drawn from the corpus, so playback
//! never starves while the feed is quiet. The loop sleeps its period
//! after each run, so runs never overlap.

use super::messages::PlayItem;
use super::pacer::sleep_interruptible;
use crate::corpus::FillerCorpus;
use crate::feed::FetchQueue;
use crossbeam_channel::Sender;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info};

/// One merge decision, separated from the thread that schedules it.
pub struct MixRunner<R> {
    fetch: FetchQueue,
    corpus: FillerCorpus,
    live_bias: f64,
    rng: R,
}

impl<R: Rng> MixRunner<R> {
    /// Create a runner draining `fetch` with the given live-content bias.
    ///
    /// `live_bias` is clamped to `[0, 1]`.
    pub fn new(fetch: FetchQueue, corpus: FillerCorpus, live_bias: f64, rng: R) -> Self {
        Self {
            fetch,
            corpus,
            live_bias: live_bias.clamp(0.0, 1.0),
            rng,
        }
    }

    /// Decide one item: live with probability `live_bias` when the fetch
    /// queue is non-empty, filler otherwise.
    ///
    /// `None` only when filler was chosen and the corpus is empty.
    pub fn run_once(&mut self) -> Option<PlayItem> {
        if !self.fetch.is_empty() && self.rng.gen_bool(self.live_bias) {
            if let Some(message) = self.fetch.pop() {
                debug!(pending = self.fetch.len(), "mixed in live message");
                return Some(PlayItem::Message(message));
            }
        }

        let dialogue = self.corpus.pick(&mut self.rng)?;
        debug!("mixed in filler dialogue");
        Some(PlayItem::Filler(dialogue.clone()))
    }
}

/// Merge thread: runs the runner on a fixed period until shutdown.
pub struct MixActor {
    /// Handle to the merge thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
}

impl MixActor {
    /// Spawn the merge thread, sending decisions into `playback_tx`.
    ///
    /// The thread exits on shutdown or when the playback side hangs up.
    /// Its copy of the sender is dropped on exit, which is what unblocks
    /// a waiting playback consumer during engine shutdown.
    ///
    /// # Panics
    ///
    /// Panics if the OS fails to spawn the thread.
    #[allow(clippy::missing_panics_doc)]
    pub fn spawn<R>(runner: MixRunner<R>, playback_tx: Sender<PlayItem>, period: Duration) -> Self
    where
        R: Rng + Send + 'static,
    {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let handle = thread::Builder::new()
            .name("zoetrope-mixer".to_string())
            .spawn(move || {
                run_loop(runner, &playback_tx, &shutdown_clone, period);
            })
            .expect("Failed to spawn mixer thread");

        Self {
            handle: Some(handle),
            shutdown,
        }
    }

    /// Signal the merge thread to shutdown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Wait for the merge thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for MixActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Main merge loop: decide, send, sleep the period, repeat.
fn run_loop<R: Rng>(
    mut runner: MixRunner<R>,
    playback_tx: &Sender<PlayItem>,
    shutdown: &AtomicBool,
    period: Duration,
) {
    info!(?period, "mixer loop started");
    loop {
        if shutdown.load(Ordering::Relaxed) {
            break;
        }

        if let Some(item) = runner.run_once() {
            if playback_tx.send(item).is_err() {
                // Playback hung up; nothing left to feed
                break;
            }
        }

        if !sleep_interruptible(period, shutdown) {
            break;
        }
    }
    info!("mixer loop stopped");
}
