//! Display surface contract implemented by the host.
//!
//! The engine draws nothing itself. Playback hands reveal frames to a host
//! surface (a GTK balloon widget, a terminal pane, a test recorder) and
//! asks it to repaint; the host owns windowing, fonts, and transparency.

/// Logical display channel.
///
/// Two balloons exist: the mascot's own speech and a companion balloon for
/// attributed quoted replies and dialogue partners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// The mascot's own balloon.
    Main,
    /// The companion balloon.
    Aside,
}

/// Host-implemented drawing surface for the balloons.
///
/// All calls come from the playback thread, so implementations must be
/// shareable across threads. Painting is fire-and-forget: the engine never
/// reads anything back and never waits on the host.
pub trait DisplaySurface: Send + Sync {
    /// Show a reveal frame on `channel`: the fully revealed lines of the
    /// visible window followed by the partial line under the cursor.
    fn show_text(&self, channel: Channel, full_lines: &[String], partial: &str);

    /// Clear `channel`, hiding its balloon.
    fn clear(&self, channel: Channel);

    /// Ask the host to repaint `channel`.
    fn request_redraw(&self, channel: Channel);
}

impl<T: DisplaySurface + ?Sized> DisplaySurface for std::sync::Arc<T> {
    fn show_text(&self, channel: Channel, full_lines: &[String], partial: &str) {
        (**self).show_text(channel, full_lines, partial);
    }

    fn clear(&self, channel: Channel) {
        (**self).clear(channel);
    }

    fn request_redraw(&self, channel: Channel) {
        (**self).request_redraw(channel);
    }
}
