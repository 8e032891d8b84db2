use std::iter;

use lineshift_engine::{BestRecord, GameStats};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::view::widgets::style;

/// Score, best values and counters shown next to the board.
pub struct SessionStatsDisplay<'a> {
    stats: &'a GameStats,
    best: &'a BestRecord,
    block: Option<BlockWidget<'a>>,
}

impl<'a> SessionStatsDisplay<'a> {
    pub fn new(stats: &'a GameStats, best: &'a BestRecord) -> Self {
        Self {
            stats,
            best,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        22 + super::block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        ROWS.len() as u16 + super::block_vertical_margin(self.block.as_ref())
    }
}

type Value = fn(&GameStats, &BestRecord) -> String;

#[derive(Clone, Copy)]
enum Row {
    Empty,
    FullLabel(&'static str),
    FullValue(Value),
    LabelValue(&'static str, Value),
}

const ROWS: &[Row] = &[
    Row::FullLabel("SCORE:"),
    Row::FullValue(|stats, _| stats.score().to_string()),
    Row::FullLabel("BEST SCORE:"),
    Row::FullValue(|_, best| best.best_score.to_string()),
    Row::Empty,
    Row::LabelValue("MAX TILE:", |stats, _| stats.max_tile().to_string()),
    Row::LabelValue("BEST TILE:", |_, best| best.best_tile.to_string()),
    Row::Empty,
    Row::LabelValue("TURN:", |stats, _| stats.turn().to_string()),
    Row::LabelValue("MERGES:", |stats, _| stats.total_merges().to_string()),
    Row::LabelValue("CHAIN:", |stats, _| stats.longest_chain().to_string()),
];

impl Widget for SessionStatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let style = style::DEFAULT;

        let rows_areas =
            Layout::vertical((0..ROWS.len()).map(|_| Constraint::Length(1))).split(area);

        for (row, area) in iter::zip(ROWS.iter().copied(), rows_areas.iter().copied()) {
            match row {
                Row::Empty => {}
                Row::FullLabel(label) => {
                    Line::styled(label, style).left_aligned().render(area, buf);
                }
                Row::FullValue(value) => {
                    Line::styled(value(self.stats, self.best), style)
                        .right_aligned()
                        .render(area, buf);
                }
                Row::LabelValue(label, value) => {
                    let [label_area, value_area] = area.layout(&Layout::horizontal([
                        Constraint::Fill(2),
                        Constraint::Fill(1),
                    ]));
                    Line::styled(label, style)
                        .left_aligned()
                        .render(label_area, buf);
                    Line::styled(value(self.stats, self.best), style)
                        .right_aligned()
                        .render(value_area, buf);
                }
            }
        }
    }
}
