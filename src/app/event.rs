//! Terminal event polling

use anyhow::Result;
use ratatui::crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use std::time::Duration;

/// Application events
#[derive(Debug, Clone, Copy)]
pub enum Event {
    /// Nothing arrived within the tick rate
    Tick,
    /// Keyboard input
    Key(KeyEvent),
    /// Terminal resize
    Resize(u16, u16),
}

/// Handler that polls for terminal events
#[derive(Debug, Clone, Copy)]
pub struct Handler {
    tick_rate: Duration,
}

impl Handler {
    /// Create a new event handler with the given tick rate
    #[must_use]
    pub const fn new(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    /// Poll for the next event
    ///
    /// Key releases and unhandled terminal events are reported as ticks.
    ///
    /// # Errors
    ///
    /// Returns an error if polling fails
    pub fn next(&self) -> Result<Event> {
        if !event::poll(self.tick_rate)? {
            return Ok(Event::Tick);
        }

        Ok(match event::read()? {
            CrosstermEvent::Key(key) if key.kind != KeyEventKind::Release => Event::Key(key),
            CrosstermEvent::Resize(w, h) => Event::Resize(w, h),
            _ => Event::Tick,
        })
    }

    /// Get the tick rate
    #[must_use]
    pub const fn tick_rate(&self) -> Duration {
        self.tick_rate
    }
}

impl Default for Handler {
    fn default() -> Self {
        Self::new(100)
    }
}
