use std::iter;

use lineshift_engine::{BOARD_SIZE, Board, CellMask, Coord, LineKind, LineSelector};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::view::widgets::{color, style};

const CELL_WIDTH: u16 = 7;
const CELL_HEIGHT: u16 = 3;
const MARKER_WIDTH: u16 = 4;
const MARKER_HEIGHT: u16 = 1;

/// Renders the 5×5 board with `R1`..`R5` / `C1`..`C5` line markers.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a Board,
    selected: Option<LineSelector>,
    shifted: CellMask,
    merged: CellMask,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            selected: None,
            shifted: CellMask::EMPTY,
            merged: CellMask::EMPTY,
            block: None,
        }
    }

    pub fn selected(self, line: LineSelector) -> Self {
        Self {
            selected: Some(line),
            ..self
        }
    }

    /// Highlights the cells written by the last shift and merge.
    pub fn highlight(self, shifted: CellMask, merged: CellMask) -> Self {
        Self {
            shifted,
            merged,
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn width(&self) -> u16 {
        MARKER_WIDTH
            + BOARD_SIZE as u16 * CELL_WIDTH
            + super::block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        MARKER_HEIGHT
            + BOARD_SIZE as u16 * CELL_HEIGHT
            + super::block_vertical_margin(self.block.as_ref())
    }

    fn is_selected(&self, kind: LineKind, index: usize) -> bool {
        self.selected
            .is_some_and(|line| line.kind() == kind && line.index() == index)
    }

    fn marker_style(&self, kind: LineKind, index: usize) -> Style {
        if self.is_selected(kind, index) {
            style::MARKER_SELECTED
        } else {
            style::MARKER
        }
    }

    fn render_cell(&self, coord: Coord, area: Rect, buf: &mut Buffer) {
        // leave a one-column gap between cells
        let area = Rect {
            width: area.width.saturating_sub(1),
            ..area
        };
        let rank = self.board.get(coord);
        let in_selected_line = self.selected.is_some_and(|line| line.contains(coord));

        let (mut cell_style, label) = if rank == 0 {
            let cell_style = if in_selected_line {
                style::EMPTY_SELECTED
            } else {
                style::EMPTY
            };
            (cell_style, "·".to_owned())
        } else {
            let fg = if in_selected_line {
                color::YELLOW
            } else {
                color::WHITE
            };
            let cell_style = Style::new()
                .fg(fg)
                .bg(color::tile(rank))
                .add_modifier(Modifier::BOLD);
            let label = if self.merged.contains(coord) {
                format!("*{rank}*")
            } else {
                rank.to_string()
            };
            (cell_style, label)
        };
        if self.shifted.contains(coord) {
            cell_style = cell_style.add_modifier(style::SHIFTED);
        }

        buf.set_style(area, cell_style);
        let [_, label_area, _] = area.layout(&Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ]));
        Line::styled(label, cell_style)
            .centered()
            .render(label_area, buf);
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let vertical = Layout::vertical(
            iter::once(Constraint::Length(MARKER_HEIGHT))
                .chain((0..BOARD_SIZE).map(|_| Constraint::Length(CELL_HEIGHT))),
        );
        let horizontal = Layout::horizontal(
            iter::once(Constraint::Length(MARKER_WIDTH))
                .chain((0..BOARD_SIZE).map(|_| Constraint::Length(CELL_WIDTH))),
        );

        let [header, rows @ ..] = area.layout::<{ BOARD_SIZE + 1 }>(&vertical);

        let [_, column_markers @ ..] = header.layout::<{ BOARD_SIZE + 1 }>(&horizontal);
        for (col, marker_area) in column_markers.into_iter().enumerate() {
            let marker_area = Rect {
                width: marker_area.width.saturating_sub(1),
                ..marker_area
            };
            Line::styled(
                format!("C{}", col + 1),
                self.marker_style(LineKind::Column, col),
            )
            .centered()
            .render(marker_area, buf);
        }

        for (row, row_area) in rows.into_iter().enumerate() {
            let [marker_area, cells @ ..] = row_area.layout::<{ BOARD_SIZE + 1 }>(&horizontal);
            let [_, marker_area, _] = marker_area.layout(&Layout::vertical([
                Constraint::Fill(1),
                Constraint::Length(1),
                Constraint::Fill(1),
            ]));
            Line::styled(format!("R{}", row + 1), self.marker_style(LineKind::Row, row))
                .left_aligned()
                .render(marker_area, buf);

            for (col, cell_area) in cells.into_iter().enumerate() {
                self.render_cell(Coord::new(row, col), cell_area, buf);
            }
        }
    }
}
