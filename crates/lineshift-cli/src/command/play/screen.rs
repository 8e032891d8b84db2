use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode};
use lineshift_engine::{CellMask, Direction, LineKind, RecordStore, TurnStatus};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout},
    text::Line,
    widgets::Block as BlockWidget,
};

use crate::{
    record::RecordingSession,
    view::widgets::{
        BoardDisplay, HelpDisplay, KeyBinding, KeyBindingDisplay, SessionStatsDisplay, style,
    },
};

/// How long shifted and merged cells stay highlighted after a turn.
///
/// Turn commands are ignored until the highlight ends.
const SETTLE_DURATION: Duration = Duration::from_millis(220);

const LINE_KEYS: [char; 5] = ['1', '2', '3', '4', '5'];

const PLAYING_BINDINGS: &[KeyBinding] = &[
    (&["Tab"], "Row/Col"),
    (&["1-5"], "Line"),
    (&["j", "k"], "Next/Prev"),
    (&["←", "→", "↑", "↓"], "Shift"),
    (&["n"], "New"),
    (&["?"], "Help"),
    (&["q"], "Quit"),
];

const GAME_OVER_BINDINGS: &[KeyBinding] =
    &[(&["n"], "New game"), (&["?"], "Help"), (&["q"], "Quit")];

#[derive(Debug)]
struct Settling {
    until: Instant,
    shifted: CellMask,
    merged: CellMask,
}

#[derive(Debug)]
pub struct PlayScreen<S> {
    session: RecordingSession<S>,
    settling: Option<Settling>,
    show_help: bool,
    is_exiting: bool,
}

impl<S> PlayScreen<S>
where
    S: RecordStore,
{
    pub fn new(session: RecordingSession<S>) -> Self {
        Self {
            session,
            settling: None,
            show_help: false,
            is_exiting: false,
        }
    }

    pub fn should_exit(&self) -> bool {
        self.is_exiting
    }

    pub fn into_session(self) -> RecordingSession<S> {
        self.session
    }

    pub fn handle_event(&mut self, event: &Event) {
        if let Some(event) = event.as_key_press_event() {
            self.handle_key(event.code, Instant::now());
        }
    }

    /// Ends the settling highlight once it expires.
    ///
    /// Returns whether the screen changed.
    pub fn update(&mut self) -> bool {
        self.update_at(Instant::now())
    }

    fn update_at(&mut self, now: Instant) -> bool {
        if self
            .settling
            .as_ref()
            .is_some_and(|settling| now >= settling.until)
        {
            self.settling = None;
            return true;
        }
        false
    }

    fn handle_key(&mut self, code: KeyCode, now: Instant) {
        if self.show_help {
            match code {
                KeyCode::Char('?') | KeyCode::Esc => self.show_help = false,
                KeyCode::Char('q') => self.is_exiting = true,
                _ => {}
            }
            return;
        }

        if let KeyCode::Char(c) = code
            && let Some(index) = LINE_KEYS.iter().position(|&key| key == c)
        {
            let kind = self.session.selected_line().kind();
            _ = self.session.set_selected_line(kind, index);
            return;
        }

        let line = self.session.selected_line();
        match code {
            KeyCode::Char('q') => self.is_exiting = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('n') => {
                self.session.reset();
                self.settling = None;
            }
            KeyCode::Tab | KeyCode::BackTab => self.session.select_line(line.toggled()),
            KeyCode::Char('j') => self.session.select_line(line.cycled(1)),
            KeyCode::Char('k') => self.session.select_line(line.cycled(-1)),
            KeyCode::Left => self.shift(Direction::Left, now),
            KeyCode::Right => self.shift(Direction::Right, now),
            KeyCode::Up => self.shift(Direction::Up, now),
            KeyCode::Down => self.shift(Direction::Down, now),
            _ => {}
        }
    }

    fn shift(&mut self, direction: Direction, now: Instant) {
        if self.settling.is_some() {
            return;
        }
        if let Ok(report) = self.session.try_execute_turn(direction) {
            self.settling = Some(Settling {
                until: now + SETTLE_DURATION,
                shifted: report.shift.shifted_cells,
                merged: report.merge.merged_cells,
            });
        }
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        let title = match self.session.seed() {
            Some(seed) => format!(" LINESHIFT · seed {seed} "),
            None => " LINESHIFT ".to_owned(),
        };
        let mut board_display = BoardDisplay::new(self.session.board())
            .selected(self.session.selected_line())
            .block(BlockWidget::bordered().title(title));
        if let Some(settling) = &self.settling {
            board_display = board_display.highlight(settling.shifted, settling.merged);
        }
        let stats_display = SessionStatsDisplay::new(self.session.stats(), self.session.best())
            .block(BlockWidget::bordered().title(" STATS "));

        let [main_area, status_area, line_area, keys_area] = Layout::vertical([
            Constraint::Length(board_display.height()),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .flex(Flex::Center)
        .areas(frame.area());
        let [board_area, stats_area] = Layout::horizontal([
            Constraint::Length(board_display.width()),
            Constraint::Length(stats_display.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(main_area);
        let [stats_area, _] = Layout::vertical([
            Constraint::Length(stats_display.height()),
            Constraint::Fill(1),
        ])
        .areas(stats_area);

        frame.render_widget(&board_display, board_area);
        frame.render_widget(stats_display, stats_area);

        let status = self.session.status();
        let status_style = match status {
            TurnStatus::GameOver => style::GAME_OVER,
            TurnStatus::Chain { .. } | TurnStatus::Neutral => style::STATUS,
        };
        frame.render_widget(
            Line::styled(status.to_string(), status_style).centered(),
            status_area,
        );

        let line = self.session.selected_line();
        let arrows = match line.kind() {
            LineKind::Row => "← →",
            LineKind::Column => "↑ ↓",
        };
        let selection = format!("Selected: {line} ({}), shift with {arrows}", line.kind());
        frame.render_widget(Line::styled(selection, style::DIM).centered(), line_area);

        let bindings = if self.session.session_state().is_game_over() {
            GAME_OVER_BINDINGS
        } else {
            PLAYING_BINDINGS
        };
        frame.render_widget(KeyBindingDisplay::new(bindings), keys_area);

        if self.show_help {
            frame.render_widget(HelpDisplay, frame.area());
        }
    }
}

#[cfg(test)]
mod tests {
    use lineshift_engine::{LineSelector, MemoryStore, TileSeed};
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;

    fn screen() -> PlayScreen<MemoryStore> {
        PlayScreen::new(RecordingSession::new(
            Some(TileSeed::from_token("screen")),
            MemoryStore::new(),
        ))
    }

    #[test]
    fn test_line_selection_keys() {
        let mut screen = screen();
        let now = Instant::now();
        assert_eq!(screen.session.selected_line(), LineSelector::default());

        screen.handle_key(KeyCode::Tab, now);
        assert_eq!(
            screen.session.selected_line(),
            LineSelector::new(LineKind::Column, 2).unwrap()
        );

        screen.handle_key(KeyCode::Char('5'), now);
        assert_eq!(screen.session.selected_line().index(), 4);
        screen.handle_key(KeyCode::Char('j'), now);
        assert_eq!(screen.session.selected_line().index(), 0);
        screen.handle_key(KeyCode::Char('k'), now);
        assert_eq!(screen.session.selected_line().index(), 4);
        assert_eq!(screen.session.selected_line().kind(), LineKind::Column);
    }

    #[test]
    fn test_settling_ignores_turns_until_expired() {
        let mut screen = screen();
        let start = Instant::now();

        screen.handle_key(KeyCode::Left, start);
        assert_eq!(screen.session.stats().turn(), 1);
        assert!(screen.settling.is_some());

        screen.handle_key(KeyCode::Right, start);
        assert_eq!(screen.session.stats().turn(), 1);

        assert!(!screen.update_at(start));
        assert!(screen.update_at(start + SETTLE_DURATION));
        assert!(screen.settling.is_none());

        screen.handle_key(KeyCode::Right, start + SETTLE_DURATION);
        assert_eq!(screen.session.stats().turn(), 2);
    }

    #[test]
    fn test_mismatched_arrow_is_ignored() {
        let mut screen = screen();
        let board = *screen.session.board();

        screen.handle_key(KeyCode::Up, Instant::now());

        assert_eq!(screen.session.stats().turn(), 0);
        assert_eq!(*screen.session.board(), board);
        assert!(screen.settling.is_none());
    }

    #[test]
    fn test_help_overlay_swallows_keys() {
        let mut screen = screen();
        let now = Instant::now();

        screen.handle_key(KeyCode::Char('?'), now);
        screen.handle_key(KeyCode::Left, now);
        screen.handle_key(KeyCode::Tab, now);
        assert_eq!(screen.session.stats().turn(), 0);
        assert_eq!(screen.session.selected_line(), LineSelector::default());

        screen.handle_key(KeyCode::Esc, now);
        screen.handle_key(KeyCode::Left, now);
        assert_eq!(screen.session.stats().turn(), 1);
    }

    #[test]
    fn test_new_game_and_quit() {
        let mut screen = screen();
        let now = Instant::now();
        screen.handle_key(KeyCode::Left, now);

        screen.handle_key(KeyCode::Char('n'), now);
        assert_eq!(screen.session.stats().turn(), 0);
        assert!(screen.settling.is_none());
        assert!(!screen.should_exit());

        screen.handle_key(KeyCode::Char('q'), now);
        assert!(screen.should_exit());
    }

    fn draw_text(screen: &PlayScreen<MemoryStore>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| screen.draw(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn test_draw() {
        let mut screen = screen();

        let text = draw_text(&screen);
        for expected in ["SCORE:", "BEST TILE:", "R3", "C5", "seed screen", "Selected: R3"] {
            assert!(text.contains(expected), "missing {expected:?}");
        }
        assert!(!text.contains("How to play"));

        screen.handle_key(KeyCode::Char('?'), Instant::now());
        assert!(draw_text(&screen).contains("How to play"));
    }
}
