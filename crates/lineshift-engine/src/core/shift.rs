use arrayvec::ArrayVec;

use super::board::{BOARD_SIZE, Board, CellMask, Coord, Direction, LineKind, LineSelector, Rank};

/// Movement of a single non-empty tile during a shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMove {
    pub from: Coord,
    pub to: Coord,
    pub rank: Rank,
}

/// Outcome of shifting one line by one step.
///
/// `moves` and `shifted_cells` only describe motion for presentation; merge
/// resolution and scoring work on `board` alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftResult {
    pub board: Board,
    /// Non-empty source cells that moved, ordered from the leading edge.
    pub moves: ArrayVec<CellMove, BOARD_SIZE>,
    /// Every destination cell written by the shift (the vacated cell excluded).
    pub shifted_cells: CellMask,
}

/// Shifts the selected line one step toward `direction`.
///
/// The shift is rigid: each cell takes the value of its neighbour on the far
/// side, empty cells move like any other value, the tile at the leading edge
/// falls off the board and the cell at the trailing edge becomes empty.
/// Nothing wraps around.
///
/// Returns `None` when `direction` does not fit the line orientation
/// (rows move left/right, columns move up/down).
///
/// # Example
///
/// ```
/// use lineshift_engine::{Board, Direction, LineKind, LineSelector, shift_line};
///
/// let board = Board::from_rows([
///     [1, 0, 2, 3, 4],
///     [0; 5],
///     [0; 5],
///     [0; 5],
///     [0; 5],
/// ]);
/// let row0 = LineSelector::new(LineKind::Row, 0).unwrap();
///
/// let result = shift_line(&board, row0, Direction::Left).unwrap();
/// assert_eq!(result.board.rows()[0], [0, 2, 3, 4, 0]);
///
/// assert!(shift_line(&board, row0, Direction::Up).is_none());
/// ```
#[must_use]
pub fn shift_line(board: &Board, line: LineSelector, direction: Direction) -> Option<ShiftResult> {
    if !line.accepts(direction) {
        return None;
    }

    let index = line.index();
    let cell_at = |pos: usize| match line.kind() {
        LineKind::Row => Coord::new(index, pos),
        LineKind::Column => Coord::new(pos, index),
    };

    // Positions along the line from the leading edge; each cell takes the
    // value of the next one.
    let toward_start = matches!(direction, Direction::Left | Direction::Up);
    let positions: [usize; BOARD_SIZE] = if toward_start {
        [0, 1, 2, 3, 4]
    } else {
        [4, 3, 2, 1, 0]
    };

    let mut next = *board;
    let mut moves = ArrayVec::new();
    let mut shifted_cells = CellMask::EMPTY;

    for pair in positions.windows(2) {
        let to = cell_at(pair[0]);
        let from = cell_at(pair[1]);
        let rank = board.get(from);
        next.set(to, rank);
        shifted_cells.insert(to);
        if rank != 0 {
            moves.push(CellMove { from, to, rank });
        }
    }
    next.set(cell_at(positions[BOARD_SIZE - 1]), 0);

    Some(ShiftResult {
        board: next,
        moves,
        shifted_cells,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(index: usize) -> LineSelector {
        LineSelector::new(LineKind::Row, index).unwrap()
    }

    fn column(index: usize) -> LineSelector {
        LineSelector::new(LineKind::Column, index).unwrap()
    }

    #[test]
    fn test_shift_row_left_drops_leading_tile_and_clears_trailing_edge() {
        let board = Board::from_ascii(
            "
            . . . . .
            4 1 . 2 3
            . . . . .
            . . . . .
            . . . . .
            ",
        );

        let result = shift_line(&board, row(1), Direction::Left).unwrap();

        assert_eq!(
            result.board,
            Board::from_ascii(
                "
                . . . . .
                1 . 2 3 .
                . . . . .
                . . . . .
                . . . . .
                ",
            )
        );
        assert_eq!(
            result.moves.as_slice(),
            &[
                CellMove {
                    from: Coord::new(1, 1),
                    to: Coord::new(1, 0),
                    rank: 1
                },
                CellMove {
                    from: Coord::new(1, 3),
                    to: Coord::new(1, 2),
                    rank: 2
                },
                CellMove {
                    from: Coord::new(1, 4),
                    to: Coord::new(1, 3),
                    rank: 3
                },
            ]
        );
        assert_eq!(result.shifted_cells.len(), 4);
        assert!(!result.shifted_cells.contains(Coord::new(1, 4)));
    }

    #[test]
    fn test_shift_row_right() {
        let board = Board::from_ascii(
            "
            1 2 3 4 5
            . . . . .
            . . . . .
            . . . . .
            . . . . .
            ",
        );

        let result = shift_line(&board, row(0), Direction::Right).unwrap();

        assert_eq!(result.board.rows()[0], [0, 1, 2, 3, 4]);
        assert_eq!(result.moves.len(), 4);
        assert_eq!(
            result.moves[0],
            CellMove {
                from: Coord::new(0, 3),
                to: Coord::new(0, 4),
                rank: 4
            }
        );
    }

    #[test]
    fn test_shift_column_up_and_down() {
        let board = Board::from_ascii(
            "
            . . 1 . .
            . . 2 . .
            . . . . .
            . . 3 . .
            . . 4 . .
            ",
        );

        let up = shift_line(&board, column(2), Direction::Up).unwrap();
        assert_eq!(
            up.board,
            Board::from_ascii(
                "
                . . 2 . .
                . . . . .
                . . 3 . .
                . . 4 . .
                . . . . .
                ",
            )
        );
        assert_eq!(up.moves.len(), 3);

        let down = shift_line(&board, column(2), Direction::Down).unwrap();
        assert_eq!(
            down.board,
            Board::from_ascii(
                "
                . . . . .
                . . 1 . .
                . . 2 . .
                . . . . .
                . . 3 . .
                ",
            )
        );
    }

    #[test]
    fn test_shift_leaves_other_lines_untouched() {
        let board = Board::from_ascii(
            "
            1 1 1 1 1
            2 2 2 2 2
            3 3 3 3 3
            4 4 4 4 4
            5 5 5 5 5
            ",
        );

        let result = shift_line(&board, row(2), Direction::Left).unwrap();
        for (index, line) in result.board.rows().iter().enumerate() {
            if index == 2 {
                assert_eq!(*line, [3, 3, 3, 3, 0]);
            } else {
                assert_eq!(*line, board.rows()[index]);
            }
        }
    }

    #[test]
    fn test_mismatched_direction_is_rejected() {
        let board = Board::EMPTY;
        assert!(shift_line(&board, row(0), Direction::Up).is_none());
        assert!(shift_line(&board, row(0), Direction::Down).is_none());
        assert!(shift_line(&board, column(0), Direction::Left).is_none());
        assert!(shift_line(&board, column(0), Direction::Right).is_none());
    }

    #[test]
    fn test_left_then_right_is_not_an_inverse() {
        let board = Board::from_ascii(
            "
            1 2 3 4 5
            . . . . .
            . . . . .
            . . . . .
            . . . . .
            ",
        );

        let left = shift_line(&board, row(0), Direction::Left).unwrap();
        let back = shift_line(&left.board, row(0), Direction::Right).unwrap();

        // The leading tile is lost and the vacated edge stays empty.
        assert_eq!(left.board.rows()[0], [2, 3, 4, 5, 0]);
        assert_eq!(back.board.rows()[0], [0, 2, 3, 4, 5]);
        assert_ne!(back.board, board);
    }

    #[test]
    fn test_uniform_empty_line_is_unchanged() {
        let board = Board::from_ascii(
            "
            . . . . .
            1 2 1 2 1
            . . . . .
            . . . . .
            . . . . .
            ",
        );

        let result = shift_line(&board, row(0), Direction::Right).unwrap();
        assert_eq!(result.board, board);
        assert!(result.moves.is_empty());
    }
}
