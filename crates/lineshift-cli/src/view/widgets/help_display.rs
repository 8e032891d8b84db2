use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    text::{Line, Text},
    widgets::{Block as BlockWidget, Clear, Padding, Paragraph, Widget, Wrap},
};

use crate::view::widgets::style;

const HELP_WIDTH: u16 = 64;
const HELP_HEIGHT: u16 = 20;

const RULES: &[&str] = &[
    "Pick a row or column, then shift it one step.",
    "",
    "- The tile at the leading edge falls off the board.",
    "- The cell at the trailing edge becomes empty.",
    "- Equal neighbours merge into one tile of the next rank.",
    "  A tile merges with the one below it before the one to its right.",
    "- Merges repeat in rounds until nothing is left to merge.",
    "  A merge in round k scores new rank × (k+1).",
    "- One new tile (rank 1, sometimes 2 or 3) appears after each turn.",
    "- The game ends when no empty cell is left for the new tile.",
    "",
    "Best score and best tile are kept across games.",
];

/// Centered overlay explaining the rules.
#[derive(Debug, Default)]
pub struct HelpDisplay;

impl Widget for HelpDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [area] = Layout::vertical([Constraint::Length(HELP_HEIGHT)])
            .flex(Flex::Center)
            .areas(area);
        let [area] = Layout::horizontal([Constraint::Length(HELP_WIDTH)])
            .flex(Flex::Center)
            .areas(area);

        Clear.render(area, buf);
        let text: Text = RULES.iter().copied().map(Line::from).collect();
        Paragraph::new(text)
            .style(style::DEFAULT)
            .wrap(Wrap { trim: false })
            .block(
                BlockWidget::bordered()
                    .title(" How to play ")
                    .title_bottom(Line::from(" ? / Esc to close ").centered())
                    .padding(Padding::horizontal(1)),
            )
            .render(area, buf);
    }
}
