//! Pacing primitives shared by the worker loops.
//!
//! The reveal tick wants drift-corrected timing so a slow frame does not
//! shift every later frame; the multi-second playback pauses just want to
//! sleep without holding shutdown hostage. Both live here.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

/// Slice length for interruptible sleeps; bounds shutdown latency.
const SLEEP_SLICE: Duration = Duration::from_millis(10);

/// Drift-corrected fixed-interval pacer for the reveal tick.
///
/// Each wait targets the previous target plus the interval, carrying the
/// schedule across waits. If the schedule falls more than one interval
/// behind it resynchronizes instead of bursting to catch up.
pub struct Pacer {
    interval: Duration,
    next_tick: Instant,
}

impl Pacer {
    /// Create a pacer with the given interval, starting now.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_tick: Instant::now() + interval,
        }
    }

    /// Wait until the next tick, waking early on shutdown.
    ///
    /// Returns `false` when shutdown was signalled during the wait.
    pub fn wait(&mut self, shutdown: &AtomicBool) -> bool {
        loop {
            if shutdown.load(Ordering::Relaxed) {
                return false;
            }

            let now = Instant::now();
            if now >= self.next_tick {
                self.next_tick += self.interval;
                if self.next_tick < now {
                    // Fell behind by more than one interval: resync
                    self.next_tick = now + self.interval;
                }
                return true;
            }

            let remaining = self.next_tick - now;
            thread::sleep(remaining.min(Duration::from_millis(1)));
        }
    }
}

/// Sleep for `duration`, waking early when `shutdown` is set.
///
/// Sleeps in small slices so shutdown latency stays bounded no matter how
/// long the requested pause is. Returns `false` when interrupted.
pub fn sleep_interruptible(duration: Duration, shutdown: &AtomicBool) -> bool {
    let deadline = Instant::now() + duration;
    loop {
        if shutdown.load(Ordering::Relaxed) {
            return false;
        }

        let now = Instant::now();
        if now >= deadline {
            return true;
        }
        thread::sleep((deadline - now).min(SLEEP_SLICE));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;

    #[test]
    fn test_pacer_ticks_at_interval() {
        let shutdown = AtomicBool::new(false);
        let mut pacer = Pacer::new(Duration::from_millis(10));

        let start = Instant::now();
        for _ in 0..5 {
            assert!(pacer.wait(&shutdown));
        }
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(50));
        // Generous upper bound; scheduling jitter only ever adds time
        assert!(elapsed < Duration::from_millis(500));
    }

    #[test]
    fn test_pacer_stops_on_shutdown() {
        let shutdown = Arc::new(AtomicBool::new(false));
        let mut pacer = Pacer::new(Duration::from_secs(60));

        let flag = shutdown.clone();
        let setter = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            flag.store(true, Ordering::Relaxed);
        });

        let start = Instant::now();
        assert!(!pacer.wait(&shutdown));
        assert!(start.elapsed() < Duration::from_secs(5));
        setter.join().unwrap();
    }

    #[test]
    fn test_sleep_interruptible_completes() {
        let shutdown = AtomicBool::new(false);
        assert!(sleep_interruptible(Duration::from_millis(5), &shutdown));
    }

    #[test]
    fn test_sleep_interruptible_bails_early() {
        let shutdown = AtomicBool::new(true);
        let start = Instant::now();
        assert!(!sleep_interruptible(Duration::from_secs(60), &shutdown));
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
