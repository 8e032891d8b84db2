use crossterm::event::Event;
use ratatui::Frame;

use crate::{
    command::play::screen::PlayScreen,
    record::RecordingSession,
    store::JsonFileStore,
    tui::{App, Tui},
};

/// Ticks drive the end of the settling highlight only.
const TICK_RATE: f64 = 30.0;

#[derive(Debug)]
pub struct PlayApp {
    screen: PlayScreen<JsonFileStore>,
}

impl PlayApp {
    pub fn new(session: RecordingSession<JsonFileStore>) -> Self {
        Self {
            screen: PlayScreen::new(session),
        }
    }

    pub fn into_session(self) -> RecordingSession<JsonFileStore> {
        self.screen.into_session()
    }
}

impl App for PlayApp {
    fn init(&mut self, tui: &mut Tui) {
        tui.set_tick_rate(Some(TICK_RATE));
    }

    fn should_exit(&self) -> bool {
        self.screen.should_exit()
    }

    fn handle_event(&mut self, _tui: &mut Tui, event: &Event) {
        self.screen.handle_event(event);
    }

    fn draw(&self, frame: &mut Frame) {
        self.screen.draw(frame);
    }

    fn update(&mut self, _tui: &mut Tui) -> bool {
        self.screen.update()
    }
}
