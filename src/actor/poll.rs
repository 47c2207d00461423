//! Poll Scheduler: discovers new feed items on a fixed period.
//!
//! Each run snapshots the watermark, queries the search collaborator,
//! screens every returned item, appends the accepted ones to the fetch
//! queue oldest-first, and advances the watermark. The loop then sleeps
//! the period, so runs never overlap and a failed run only costs one
//! period before the next attempt.

use super::pacer::sleep_interruptible;
use crate::feed::{screen, FeedError, FeedTarget, FetchQueue, SearchService, Verdict, Watermark};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info, warn};

/// One poll cycle's logic, separated from the thread that schedules it.
pub struct PollRunner<S> {
    service: S,
    target: FeedTarget,
    queue: FetchQueue,
    watermark: Watermark,
}

impl<S: SearchService> PollRunner<S> {
    /// Create a runner querying `service` for `target`, feeding `queue`.
    pub fn new(service: S, target: FeedTarget, queue: FetchQueue) -> Self {
        Self {
            service,
            target,
            queue,
            watermark: Watermark::new(),
        }
    }

    /// Current watermark.
    pub const fn watermark(&self) -> &Watermark {
        &self.watermark
    }

    /// Run one poll: search, screen, enqueue, advance the watermark.
    ///
    /// Returns the number of accepted items. Screening uses the watermark
    /// as it stood when the run began; the advance happens afterwards,
    /// from the accepted items' parsed timestamps only.
    pub fn run_once(&mut self) -> Result<usize, FeedError> {
        let since = self.watermark.get();
        let batch = self.service.search(&self.target.query(since))?;
        let total = batch.len();

        let mut accepted = Vec::new();
        for item in batch {
            match screen(item, &self.target.identity, since) {
                Verdict::Accept(message) => accepted.push(message),
                Verdict::Skip(reason) => debug!(?reason, "item skipped"),
            }
        }

        for message in &accepted {
            if let Some(ts) = message.timestamp {
                self.watermark.advance(ts);
            }
        }

        let count = accepted.len();
        if count > 0 {
            // The collaborator returns newest first; playback wants oldest first
            accepted.reverse();
            self.queue.extend(accepted);
            info!(accepted = count, total, watermark = ?self.watermark.get(), "poll accepted items");
        } else {
            debug!(total, "poll accepted nothing");
        }

        Ok(count)
    }
}

/// Poll thread: runs the runner on a fixed period until shutdown.
pub struct PollActor {
    /// Handle to the poll thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
}

impl PollActor {
    /// Spawn the poll thread.
    ///
    /// # Panics
    ///
    /// Panics if the OS fails to spawn the thread.
    #[allow(clippy::missing_panics_doc)]
    pub fn spawn<S>(runner: PollRunner<S>, period: Duration) -> Self
    where
        S: SearchService + Send + 'static,
    {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let handle = thread::Builder::new()
            .name("zoetrope-poll".to_string())
            .spawn(move || {
                run_loop(runner, &shutdown_clone, period);
            })
            .expect("Failed to spawn poll thread");

        Self {
            handle: Some(handle),
            shutdown,
        }
    }

    /// Signal the poll thread to shutdown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Wait for the poll thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for PollActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Main poll loop: run, sleep the period, repeat.
fn run_loop<S: SearchService>(
    mut runner: PollRunner<S>,
    shutdown: &AtomicBool,
    period: Duration,
) {
    info!(?period, "poll loop started");
    loop {
        if shutdown.load(Ordering::Relaxed) {
            break;
        }

        if let Err(error) = runner.run_once() {
            // Self-healing: the next run is still scheduled
            warn!(%error, "poll run failed");
        }

        if !sleep_interruptible(period, shutdown) {
            break;
        }
    }
    info!("poll loop stopped");
}
