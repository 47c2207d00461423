//! Terminal demo: the full pipeline against a scripted in-process feed.
//!
//! Two panes stand in for the mascot's balloons: the top pane is the
//! main balloon, the bottom one the companion. A scripted search service
//! delivers a few "live" messages across the first polls; once it runs
//! dry, the built-in filler corpus takes over.
//!
//! Press 'q' or Escape to quit. Set `RUST_LOG=zoetrope=debug` to watch
//! the pipeline's decisions on stderr.

use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::terminal::{self, ClearType};
use crossterm::{cursor, execute, queue};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use zoetrope::feed::{Author, FeedError, QuotedReply, RawItem, SearchQuery, SearchService, Timestamp};
use zoetrope::{
    builtin, Channel, DisplaySurface, Engine, EngineConfig, FeedTarget, MonospaceMeasure,
};

const IDENTITY: &str = "mascot_dev";

/// Serves a fixed script of poll batches, then nothing.
struct ScriptedFeed {
    batches: Mutex<Vec<Vec<RawItem>>>,
}

impl ScriptedFeed {
    fn new() -> Self {
        let author = || {
            Some(Author {
                identity: IDENTITY.to_string(),
                name: "Mascot Dev".to_string(),
            })
        };
        Self {
            batches: Mutex::new(vec![
                vec![RawItem {
                    author: author(),
                    body: "Shipped the new balloon engine today. It wraps, it scrolls, it never flickers.".to_string(),
                    created_at: Timestamp::Raw("2026-08-23T12:00:00+00:00".to_string()),
                    quoted_reply: None,
                }],
                vec![RawItem {
                    author: author(),
                    body: "Good question! The window only ever keeps a few lines visible.".to_string(),
                    created_at: Timestamp::Raw("2026-08-23T12:05:00+00:00".to_string()),
                    quoted_reply: Some(QuotedReply {
                        author_name: "curious_user".to_string(),
                        body: "What happens when a message is longer than the balloon?".to_string(),
                    }),
                }],
            ]),
        }
    }
}

impl SearchService for ScriptedFeed {
    fn search(&self, _query: &SearchQuery) -> Result<Vec<RawItem>, FeedError> {
        let mut batches = self.batches.lock().unwrap();
        if batches.is_empty() {
            Ok(Vec::new())
        } else {
            Ok(batches.remove(0))
        }
    }
}

#[derive(Default)]
struct Pane {
    lines: Vec<String>,
    partial: String,
    visible: bool,
}

/// Two fixed panes painted with crossterm.
#[derive(Default)]
struct TermSurface {
    panes: Mutex<[Pane; 2]>,
}

const fn pane_index(channel: Channel) -> usize {
    match channel {
        Channel::Main => 0,
        Channel::Aside => 1,
    }
}

impl TermSurface {
    fn paint(&self) {
        let panes = self.panes.lock().unwrap();
        let mut out = io::stdout().lock();
        let _ = queue!(out, cursor::MoveTo(0, 0), terminal::Clear(ClearType::All));
        let _ = queue!(out, cursor::MoveTo(0, 0));
        let _ = write!(out, "zoetrope terminal demo — press 'q' to quit");

        let labels = ["[ mascot ]", "[ companion ]"];
        let mut row = 2u16;
        for (pane, label) in panes.iter().zip(labels) {
            let _ = queue!(out, cursor::MoveTo(0, row));
            let _ = write!(out, "{label}");
            row += 1;
            if pane.visible {
                for line in &pane.lines {
                    let _ = queue!(out, cursor::MoveTo(2, row));
                    let _ = write!(out, "{line}");
                    row += 1;
                }
                let _ = queue!(out, cursor::MoveTo(2, row));
                let _ = write!(out, "{}", pane.partial);
            }
            row += 7;
        }
        let _ = out.flush();
    }
}

impl DisplaySurface for TermSurface {
    fn show_text(&self, channel: Channel, full_lines: &[String], partial: &str) {
        let mut panes = self.panes.lock().unwrap();
        let pane = &mut panes[pane_index(channel)];
        pane.lines = full_lines.to_vec();
        pane.partial = partial.to_string();
        pane.visible = true;
    }

    fn clear(&self, channel: Channel) {
        let mut panes = self.panes.lock().unwrap();
        let pane = &mut panes[pane_index(channel)];
        pane.lines.clear();
        pane.partial.clear();
        pane.visible = false;
    }

    fn request_redraw(&self, _channel: Channel) {
        self.paint();
    }
}

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("zoetrope=warn")),
        )
        .with_writer(io::stderr)
        .init();

    let mut config = EngineConfig::new(FeedTarget {
        keyword: "balloon".to_string(),
        identity: IDENTITY.to_string(),
        language: "en".to_string(),
    })
    .poll_period_secs(2)
    .merge_period_secs(6);
    // Demo pacing: brisk enough to watch without waiting out the defaults
    config.playback.tick_interval = Duration::from_millis(50);
    config.playback.max_width = 40;
    config.playback.aside_pause = Duration::from_secs(1);
    config.playback.body_pause = Duration::from_secs(2);
    config.playback.clear_pause = Duration::from_secs(1);
    config.playback.turn_pause = Duration::from_secs(1);

    terminal::enable_raw_mode()?;
    execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

    let surface = Arc::new(TermSurface::default());
    let engine = Engine::spawn(
        ScriptedFeed::new(),
        surface,
        MonospaceMeasure,
        config,
        builtin(),
    );

    loop {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
                    _ => {}
                }
            }
        }
    }

    engine.join();

    execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    Ok(())
}
