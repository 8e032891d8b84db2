use std::fmt::{self, Write as _};

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::LineIndexOutOfRange;

/// Number of rows and columns of the board.
pub const BOARD_SIZE: usize = 5;

/// Total number of cells on the board.
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// Merge level of a tile.
///
/// `0` is an empty cell; every merge raises the rank of the surviving tile by one.
/// Ranks are abstract levels, not displayed tile values.
pub type Rank = u8;

/// Position of a cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns the cell directly below, if it is on the board.
    #[must_use]
    pub const fn below(self) -> Option<Self> {
        if self.row + 1 < BOARD_SIZE {
            Some(Self::new(self.row + 1, self.col))
        } else {
            None
        }
    }

    /// Returns the cell directly to the right, if it is on the board.
    #[must_use]
    pub const fn right(self) -> Option<Self> {
        if self.col + 1 < BOARD_SIZE {
            Some(Self::new(self.row, self.col + 1))
        } else {
            None
        }
    }

    /// Iterates over every coordinate in row-major order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Self::new(row, col)))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Fixed-size 5×5 grid of tile ranks.
///
/// `Board` is a plain `Copy` value, so every copy is independent of the
/// original. All iteration helpers visit cells in row-major order (row 0
/// first, columns left to right), which keeps randomized selections
/// reproducible for a fixed RNG sequence.
///
/// # Example
///
/// ```
/// use lineshift_engine::{Board, Coord};
///
/// let mut board = Board::EMPTY;
/// board.set(Coord::new(0, 1), 3);
///
/// let copy = board;
/// board.set(Coord::new(0, 1), 0);
///
/// assert_eq!(copy.get(Coord::new(0, 1)), 3);
/// assert_eq!(board.empty_count(), 25);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [[Rank; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    pub const EMPTY: Self = Self {
        cells: [[0; BOARD_SIZE]; BOARD_SIZE],
    };

    #[must_use]
    pub const fn from_rows(cells: [[Rank; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        Self { cells }
    }

    #[must_use]
    pub const fn rows(&self) -> &[[Rank; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    #[must_use]
    pub const fn get(&self, coord: Coord) -> Rank {
        self.cells[coord.row][coord.col]
    }

    pub const fn set(&mut self, coord: Coord, rank: Rank) {
        self.cells[coord.row][coord.col] = rank;
    }

    /// Lists the empty cells in row-major order.
    #[must_use]
    pub fn empty_cells(&self) -> ArrayVec<Coord, CELL_COUNT> {
        Coord::all().filter(|&coord| self.get(coord) == 0).collect()
    }

    #[must_use]
    pub fn empty_count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&rank| rank == 0).count()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|&rank| rank != 0)
    }

    /// Returns the highest rank on the board (`0` for an empty board).
    #[must_use]
    pub fn max_rank(&self) -> Rank {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Creates a `Board` from a text grid for tests and fixtures.
    ///
    /// Each non-blank line is one row of five whitespace-separated ranks;
    /// `.` stands for an empty cell.
    ///
    /// # Panics
    ///
    /// Panics if the grid is not 5×5 or contains an invalid rank.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let mut board = Self::EMPTY;
        let lines: Vec<&str> = art.lines().filter(|line| !line.trim().is_empty()).collect();
        assert_eq!(
            lines.len(),
            BOARD_SIZE,
            "board must have exactly {BOARD_SIZE} rows, got {}",
            lines.len()
        );

        for (row, line) in lines.iter().enumerate() {
            let cells: Vec<&str> = line.split_whitespace().collect();
            assert_eq!(
                cells.len(),
                BOARD_SIZE,
                "each row must have exactly {BOARD_SIZE} cells, got {} at row {row}",
                cells.len()
            );
            for (col, cell) in cells.into_iter().enumerate() {
                let rank = if cell == "." {
                    0
                } else {
                    cell.parse()
                        .unwrap_or_else(|e| panic!("invalid rank {cell:?} at row {row}: {e}"))
                };
                board.cells[row][col] = rank;
            }
        }
        board
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for (col, &rank) in row.iter().enumerate() {
                if col > 0 {
                    f.write_char(' ')?;
                }
                if rank == 0 {
                    write!(f, "{:>2}", ".")?;
                } else {
                    write!(f, "{rank:>2}")?;
                }
            }
            f.write_char('\n')?;
        }
        Ok(())
    }
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Format: "1 1 2 2 0/0 0 0 0 0/..." (rows separated by '/')
        let mut text = String::with_capacity(CELL_COUNT * 3);
        for (row, cells) in self.cells.iter().enumerate() {
            if row > 0 {
                text.push('/');
            }
            for (col, rank) in cells.iter().enumerate() {
                if col > 0 {
                    text.push(' ');
                }
                write!(&mut text, "{rank}").unwrap();
            }
        }
        serializer.serialize_str(&text)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;

        let rows: Vec<&str> = text.split('/').collect();
        if rows.len() != BOARD_SIZE {
            return Err(serde::de::Error::custom(format!(
                "expected {BOARD_SIZE} '/'-separated rows, got {}",
                rows.len()
            )));
        }

        let mut board = Self::EMPTY;
        for (row, row_text) in rows.iter().enumerate() {
            let cells: Vec<&str> = row_text.split_whitespace().collect();
            if cells.len() != BOARD_SIZE {
                return Err(serde::de::Error::custom(format!(
                    "expected {BOARD_SIZE} cells at row {row}, got {}",
                    cells.len()
                )));
            }
            for (col, cell) in cells.iter().enumerate() {
                board.cells[row][col] = cell.parse().map_err(|e| {
                    serde::de::Error::custom(format!("invalid rank at row {row}: {cell} ({e})"))
                })?;
            }
        }
        Ok(board)
    }
}

/// Set of board cells stored as a fixed boolean grid.
///
/// Used to report which cells were touched by a shift or a merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellMask {
    cells: [[bool; BOARD_SIZE]; BOARD_SIZE],
}

impl CellMask {
    pub const EMPTY: Self = Self {
        cells: [[false; BOARD_SIZE]; BOARD_SIZE],
    };

    pub const fn insert(&mut self, coord: Coord) {
        self.cells[coord.row][coord.col] = true;
    }

    #[must_use]
    pub const fn contains(&self, coord: Coord) -> bool {
        self.cells[coord.row][coord.col]
    }

    /// Iterates over the cells in the set in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Coord> + '_ {
        Coord::all().filter(|&coord| self.contains(coord))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.iter().flatten().filter(|&&set| set).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Orientation of a selectable line.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    #[display("row")]
    Row,
    #[display("column")]
    Column,
}

impl LineKind {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            LineKind::Row => LineKind::Column,
            LineKind::Column => LineKind::Row,
        }
    }
}

/// Direction of a one-step line shift.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[display("left")]
    Left,
    #[display("right")]
    Right,
    #[display("up")]
    Up,
    #[display("down")]
    Down,
}

impl Direction {
    pub const ALL: [Self; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Returns the line orientation this direction applies to.
    #[must_use]
    pub const fn line_kind(self) -> LineKind {
        match self {
            Direction::Left | Direction::Right => LineKind::Row,
            Direction::Up | Direction::Down => LineKind::Column,
        }
    }
}

/// Selected row or column that the next shift acts on.
///
/// The index is validated on construction and always lies in `0..BOARD_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LineSelector {
    kind: LineKind,
    index: usize,
}

impl Default for LineSelector {
    fn default() -> Self {
        Self {
            kind: LineKind::Row,
            index: 2,
        }
    }
}

impl<'de> Deserialize<'de> for LineSelector {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            kind: LineKind,
            index: usize,
        }

        let Raw { kind, index } = Raw::deserialize(deserializer)?;
        Self::new(kind, index).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for LineSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.kind {
            LineKind::Row => 'R',
            LineKind::Column => 'C',
        };
        write!(f, "{prefix}{}", self.index + 1)
    }
}

impl LineSelector {
    pub fn new(kind: LineKind, index: usize) -> Result<Self, LineIndexOutOfRange> {
        if index >= BOARD_SIZE {
            return Err(LineIndexOutOfRange { index });
        }
        Ok(Self { kind, index })
    }

    #[must_use]
    pub const fn kind(self) -> LineKind {
        self.kind
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.index
    }

    /// Returns whether `direction` can shift this line.
    #[must_use]
    pub fn accepts(self, direction: Direction) -> bool {
        direction.line_kind() == self.kind
    }

    /// Returns whether `coord` lies on this line.
    #[must_use]
    pub const fn contains(self, coord: Coord) -> bool {
        match self.kind {
            LineKind::Row => coord.row == self.index,
            LineKind::Column => coord.col == self.index,
        }
    }

    /// Returns the same index with the other orientation.
    #[must_use]
    pub const fn toggled(self) -> Self {
        Self {
            kind: self.kind.toggled(),
            index: self.index,
        }
    }

    /// Moves the index by `delta`, wrapping around the board edge.
    #[must_use]
    pub const fn cycled(self, delta: isize) -> Self {
        #[expect(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
        let index = (self.index as isize + delta).rem_euclid(BOARD_SIZE as isize) as usize;
        Self {
            kind: self.kind,
            index,
        }
    }
}
