use crossterm::event::Event;
use ratatui::Frame;

use crate::tui::Tui;

/// Trait for TUI applications.
///
/// Applications executed by [`Tui::run`] must implement this trait.
pub trait App {
    /// Called once before the first frame. Use this to configure the tick rate.
    fn init(&mut self, tui: &mut Tui);

    fn should_exit(&self) -> bool;

    /// Handles terminal events (key input, resize, etc.). A redraw always follows.
    fn handle_event(&mut self, tui: &mut Tui, event: &Event);

    fn draw(&self, frame: &mut Frame);

    /// Advances time-based state on each tick.
    ///
    /// Returns whether anything visible changed.
    fn update(&mut self, tui: &mut Tui) -> bool;
}
