use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use crate::tui::event::TuiEvent;

/// Produces ticks, redraw requests and terminal events in order.
///
/// Rendering only happens after something marked the screen dirty; ticks are
/// only produced while a tick interval is set.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    last_tick: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self {
            tick_interval: None,
            last_tick: Instant::now(),
            // first frame
            dirty: true,
        }
    }
}

impl EventLoop {
    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.tick_interval = interval;
        self.last_tick = Instant::now();
    }

    pub(super) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Blocks until the next event is due.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        if self.dirty {
            self.dirty = false;
            return Ok(TuiEvent::Render);
        }

        if let Some(interval) = self.tick_interval {
            let due = self.last_tick + interval;
            let timeout = due.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                self.last_tick = Instant::now();
                return Ok(TuiEvent::Tick);
            }
        }

        Ok(event::read()?.into())
    }
}
