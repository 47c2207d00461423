//! Playback Consumer: animates queued items on the display surface.
//!
//! A single worker owns the consumption side of the playback queue. It
//! blocks on the channel while the queue is empty — the mixer's send is
//! the wakeup, so no wakeup can be lost — and processes one item at a
//! time. Each play runs the reveal animator to completion on this thread,
//! sleeping the tick interval between frames; the multi-second pauses
//! between stages happen here too. All sleeps wake early on shutdown.

use super::messages::PlayItem;
use super::pacer::{sleep_interruptible, Pacer};
use crate::corpus::Dialogue;
use crate::feed::FeedMessage;
use crate::reveal::{Frame, RevealAnimator, StepResult};
use crate::surface::{Channel, DisplaySurface};
use crate::text::{wrap, TextMeasure};
use crossbeam_channel::Receiver;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info};

/// Pacing and layout knobs for playback.
#[derive(Debug, Clone)]
pub struct PlaybackConfig {
    /// Interval between reveal steps.
    pub tick_interval: Duration,
    /// Visible window height in lines during the reveal.
    pub window_rows: usize,
    /// Maximum line width, in the measurer's units.
    pub max_width: u32,
    /// Pause after a quoted-reply aside, before the body plays.
    pub aside_pause: Duration,
    /// Pause after the body finishes, before the balloons clear.
    pub body_pause: Duration,
    /// Pause after clearing, before the next item is taken.
    pub clear_pause: Duration,
    /// Pause between the turns of a filler dialogue.
    pub turn_pause: Duration,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(100),
            window_rows: 4,
            max_width: 300,
            aside_pause: Duration::from_secs(2),
            body_pause: Duration::from_secs(3),
            clear_pause: Duration::from_secs(5),
            turn_pause: Duration::from_secs(2),
        }
    }
}

/// One item's playback logic, separated from the thread that drives it.
pub struct PlaybackRunner<D, M> {
    surface: D,
    measure: M,
    config: PlaybackConfig,
}

impl<D: DisplaySurface, M: TextMeasure> PlaybackRunner<D, M> {
    /// Create a runner drawing on `surface` with the injected measurer.
    pub fn new(surface: D, measure: M, config: PlaybackConfig) -> Self {
        Self {
            surface,
            measure,
            config,
        }
    }

    /// Play one item through all its stages.
    ///
    /// Returns `false` when shutdown interrupted the playback; the
    /// surface may be left mid-reveal in that case.
    pub fn play_item(&self, item: PlayItem, shutdown: &AtomicBool) -> bool {
        match item {
            PlayItem::Message(message) => self.play_message(&message, shutdown),
            PlayItem::Filler(dialogue) => self.play_filler(&dialogue, shutdown),
        }
    }

    /// Live message: aside first when a quoted reply is attached, then
    /// the body, then the shared clear sequence.
    fn play_message(&self, message: &FeedMessage, shutdown: &AtomicBool) -> bool {
        debug!(author = %message.author_name, "playing live message");
        if let Some(reply) = &message.quoted_reply {
            let aside = format!("{}:\n{}", reply.author_name, reply.body);
            if !self.play(Channel::Aside, &aside, shutdown) {
                return false;
            }
            if !sleep_interruptible(self.config.aside_pause, shutdown) {
                return false;
            }
        }

        if !self.play(Channel::Main, &message.body, shutdown) {
            return false;
        }
        if !sleep_interruptible(self.config.body_pause, shutdown) {
            return false;
        }
        self.clear_and_rest(shutdown)
    }

    /// Filler dialogue: each turn on the balloon its speaker tag names,
    /// with a pause after every turn, then the shared clear sequence.
    fn play_filler(&self, dialogue: &Dialogue, shutdown: &AtomicBool) -> bool {
        debug!(turns = dialogue.turns().len(), "playing filler dialogue");
        for turn in dialogue.turns() {
            if !self.play(turn.channel, &turn.text, shutdown) {
                return false;
            }
            if !sleep_interruptible(self.config.turn_pause, shutdown) {
                return false;
            }
        }
        self.clear_and_rest(shutdown)
    }

    /// Run one reveal to completion on `channel`.
    ///
    /// Empty text is a no-op stage: nothing is drawn, but the caller's
    /// pacing around the stage still happens.
    fn play(&self, channel: Channel, text: &str, shutdown: &AtomicBool) -> bool {
        let wrapped = wrap(text, &self.measure, self.config.max_width);
        let mut animator = RevealAnimator::new(wrapped, self.config.window_rows);

        let Some(first) = animator.initial_frame() else {
            return true;
        };
        self.show(channel, &first);

        let mut pacer = Pacer::new(self.config.tick_interval);
        loop {
            if !pacer.wait(shutdown) {
                return false;
            }
            match animator.step() {
                StepResult::Frame(frame) => self.show(channel, &frame),
                StepResult::Done => return true,
            }
        }
    }

    fn show(&self, channel: Channel, frame: &Frame) {
        self.surface.show_text(channel, &frame.full_lines, &frame.partial);
        self.surface.request_redraw(channel);
    }

    /// Hide both balloons, then rest before the next item.
    fn clear_and_rest(&self, shutdown: &AtomicBool) -> bool {
        for channel in [Channel::Main, Channel::Aside] {
            self.surface.clear(channel);
            self.surface.request_redraw(channel);
        }
        sleep_interruptible(self.config.clear_pause, shutdown)
    }
}

/// Playback thread: consumes the playback queue until shutdown.
pub struct PlaybackActor {
    /// Handle to the playback thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
}

impl PlaybackActor {
    /// Spawn the playback thread consuming `playback_rx`.
    ///
    /// The thread exits when shutdown is signalled or when every sender
    /// has hung up; a blocked receive is unblocked by the mixer dropping
    /// its sender on its own shutdown.
    ///
    /// # Panics
    ///
    /// Panics if the OS fails to spawn the thread.
    #[allow(clippy::missing_panics_doc)]
    pub fn spawn<D, M>(runner: PlaybackRunner<D, M>, playback_rx: Receiver<PlayItem>) -> Self
    where
        D: DisplaySurface + 'static,
        M: TextMeasure + Send + 'static,
    {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let handle = thread::Builder::new()
            .name("zoetrope-playback".to_string())
            .spawn(move || {
                run_loop(&runner, &playback_rx, &shutdown_clone);
            })
            .expect("Failed to spawn playback thread");

        Self {
            handle: Some(handle),
            shutdown,
        }
    }

    /// Signal the playback thread to shutdown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Wait for the playback thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for PlaybackActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Main playback loop: block for an item, play it, repeat.
fn run_loop<D: DisplaySurface, M: TextMeasure>(
    runner: &PlaybackRunner<D, M>,
    playback_rx: &Receiver<PlayItem>,
    shutdown: &AtomicBool,
) {
    info!("playback loop started");
    while let Ok(item) = playback_rx.recv() {
        if shutdown.load(Ordering::Relaxed) {
            break;
        }
        if !runner.play_item(item, shutdown) {
            break;
        }
    }
    info!("playback loop stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::DialogueTurn;
    use crate::feed::QuotedReply;
    use crossbeam_channel::unbounded;
    use std::sync::Mutex;
    use unicode_segmentation::UnicodeSegmentation;

    /// Records every surface call in order.
    #[derive(Default)]
    struct RecordingSurface {
        calls: Mutex<Vec<Call>>,
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Show(Channel, Vec<String>, String),
        Clear(Channel),
        Redraw(Channel),
    }

    impl DisplaySurface for RecordingSurface {
        fn show_text(&self, channel: Channel, full_lines: &[String], partial: &str) {
            self.calls.lock().unwrap().push(Call::Show(
                channel,
                full_lines.to_vec(),
                partial.to_string(),
            ));
        }

        fn clear(&self, channel: Channel) {
            self.calls.lock().unwrap().push(Call::Clear(channel));
        }

        fn request_redraw(&self, channel: Channel) {
            self.calls.lock().unwrap().push(Call::Redraw(channel));
        }
    }

    fn per_grapheme(s: &str) -> u32 {
        u32::try_from(s.graphemes(true).count()).unwrap_or(u32::MAX)
    }

    fn fast_config() -> PlaybackConfig {
        PlaybackConfig {
            tick_interval: Duration::from_millis(1),
            window_rows: 2,
            max_width: 10,
            aside_pause: Duration::from_millis(1),
            body_pause: Duration::from_millis(1),
            clear_pause: Duration::from_millis(1),
            turn_pause: Duration::from_millis(1),
        }
    }

    fn runner() -> PlaybackRunner<Arc<RecordingSurface>, impl TextMeasure> {
        PlaybackRunner::new(Arc::new(RecordingSurface::default()), per_grapheme, fast_config())
    }

    fn shows(calls: &[Call], channel: Channel) -> Vec<String> {
        calls
            .iter()
            .filter_map(|call| match call {
                Call::Show(c, _, partial) if *c == channel => Some(partial.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_message_reveals_then_clears() {
        let runner = runner();
        let surface = runner.surface.clone();
        let shutdown = AtomicBool::new(false);

        let message = FeedMessage {
            author_name: "Mascot".to_string(),
            body: "Hi!".to_string(),
            timestamp: None,
            quoted_reply: None,
        };
        assert!(runner.play_item(PlayItem::Message(message), &shutdown));

        let calls = surface.calls.lock().unwrap();
        // One frame per grapheme, all on the main balloon
        assert_eq!(shows(&calls, Channel::Main), vec!["H", "Hi", "Hi!"]);
        assert!(shows(&calls, Channel::Aside).is_empty());
        // Both balloons clear at the end
        assert!(calls.contains(&Call::Clear(Channel::Main)));
        assert!(calls.contains(&Call::Clear(Channel::Aside)));
        // Clears come after every show
        let last_show = calls
            .iter()
            .rposition(|c| matches!(c, Call::Show(..)))
            .unwrap();
        let first_clear = calls
            .iter()
            .position(|c| matches!(c, Call::Clear(_)))
            .unwrap();
        assert!(last_show < first_clear);
    }

    #[test]
    fn test_quoted_reply_plays_aside_first() {
        let runner = runner();
        let surface = runner.surface.clone();
        let shutdown = AtomicBool::new(false);

        let message = FeedMessage {
            author_name: "Mascot".to_string(),
            body: "Me".to_string(),
            timestamp: None,
            quoted_reply: Some(QuotedReply {
                author_name: "Fan".to_string(),
                body: "You".to_string(),
            }),
        };
        assert!(runner.play_item(PlayItem::Message(message), &shutdown));

        let calls = surface.calls.lock().unwrap();
        let aside = shows(&calls, Channel::Aside);
        // The aside opens with the quoted author's name
        assert_eq!(aside.first().unwrap(), "F");
        assert!(!shows(&calls, Channel::Main).is_empty());

        // Every aside show precedes every main show
        let last_aside = calls
            .iter()
            .rposition(|c| matches!(c, Call::Show(Channel::Aside, ..)))
            .unwrap();
        let first_main = calls
            .iter()
            .position(|c| matches!(c, Call::Show(Channel::Main, ..)))
            .unwrap();
        assert!(last_aside < first_main);
    }

    #[test]
    fn test_filler_alternates_channels_by_speaker() {
        let runner = runner();
        let surface = runner.surface.clone();
        let shutdown = AtomicBool::new(false);

        let dialogue = Dialogue::new(vec![
            DialogueTurn {
                channel: Channel::Main,
                text: "A".to_string(),
            },
            DialogueTurn {
                channel: Channel::Aside,
                text: "B".to_string(),
            },
            DialogueTurn {
                channel: Channel::Main,
                text: "C".to_string(),
            },
        ]);
        assert!(runner.play_item(PlayItem::Filler(dialogue), &shutdown));

        let calls = surface.calls.lock().unwrap();
        assert_eq!(shows(&calls, Channel::Main), vec!["A", "C"]);
        assert_eq!(shows(&calls, Channel::Aside), vec!["B"]);
        assert!(calls.contains(&Call::Clear(Channel::Main)));
        assert!(calls.contains(&Call::Clear(Channel::Aside)));
    }

    #[test]
    fn test_empty_body_draws_nothing_but_still_clears() {
        let runner = runner();
        let surface = runner.surface.clone();
        let shutdown = AtomicBool::new(false);

        let message = FeedMessage {
            author_name: "Mascot".to_string(),
            body: String::new(),
            timestamp: None,
            quoted_reply: None,
        };
        assert!(runner.play_item(PlayItem::Message(message), &shutdown));

        let calls = surface.calls.lock().unwrap();
        assert!(calls.iter().all(|c| !matches!(c, Call::Show(..))));
        assert!(calls.contains(&Call::Clear(Channel::Main)));
    }

    #[test]
    fn test_shutdown_interrupts_playback() {
        let runner = PlaybackRunner::new(
            Arc::new(RecordingSurface::default()),
            per_grapheme,
            PlaybackConfig {
                tick_interval: Duration::from_secs(60),
                ..fast_config()
            },
        );
        let shutdown = AtomicBool::new(true);

        let message = FeedMessage {
            author_name: "Mascot".to_string(),
            body: "long enough to need ticks".to_string(),
            timestamp: None,
            quoted_reply: None,
        };
        let start = std::time::Instant::now();
        assert!(!runner.play_item(PlayItem::Message(message), &shutdown));
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_consumer_wakes_on_enqueue() {
        let surface = Arc::new(RecordingSurface::default());
        let runner = PlaybackRunner::new(surface.clone(), per_grapheme, fast_config());
        let (tx, rx) = unbounded();
        let actor = PlaybackActor::spawn(runner, rx);

        // Let the consumer block on the empty queue first
        thread::sleep(Duration::from_millis(20));
        tx.send(PlayItem::Message(FeedMessage {
            author_name: "Mascot".to_string(),
            body: "wake".to_string(),
            timestamp: None,
            quoted_reply: None,
        }))
        .unwrap();

        // No other event occurs; the send alone must get it processed
        let deadline = std::time::Instant::now() + Duration::from_secs(2);
        loop {
            let done = surface
                .calls
                .lock()
                .unwrap()
                .iter()
                .any(|c| matches!(c, Call::Clear(_)));
            if done {
                break;
            }
            assert!(std::time::Instant::now() < deadline, "consumer never woke");
            thread::sleep(Duration::from_millis(5));
        }

        drop(tx);
        actor.join();
    }

    #[test]
    fn test_consumer_exits_when_senders_hang_up() {
        let runner = PlaybackRunner::new(
            Arc::new(RecordingSurface::default()),
            per_grapheme,
            fast_config(),
        );
        let (tx, rx) = unbounded::<PlayItem>();
        let actor = PlaybackActor::spawn(runner, rx);

        drop(tx);
        // join returns promptly because recv disconnects
        actor.join();
    }
}
