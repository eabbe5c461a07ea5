use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::player::Player;
use crate::error::{BoardError, MoveError};

/// Line directions as `(row step, column step)`, in scan priority order:
/// horizontal, vertical, down-right (↘), down-left (↙).
pub const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Contents of a single board cell. Serialized as `0` / `1` / `2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Cell {
    Empty,
    Player1,
    Player2,
}

impl Cell {
    /// The player owning this cell, if any
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Player1 => Some(Player::One),
            Cell::Player2 => Some(Player::Two),
        }
    }

    fn glyph(self) -> char {
        self.owner().map_or('.', Player::symbol)
    }

    fn from_glyph(glyph: char) -> Option<Cell> {
        match glyph {
            '.' | '0' => Some(Cell::Empty),
            'X' | 'x' | '1' => Some(Cell::Player1),
            'O' | 'o' | '2' => Some(Cell::Player2),
            _ => None,
        }
    }
}

impl From<Cell> for u8 {
    fn from(cell: Cell) -> u8 {
        match cell {
            Cell::Empty => 0,
            Cell::Player1 => 1,
            Cell::Player2 => 2,
        }
    }
}

impl TryFrom<u8> for Cell {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Cell::Empty),
            1 => Ok(Cell::Player1),
            2 => Ok(Cell::Player2),
            other => Err(format!("invalid cell value {other} (expected 0, 1 or 2)")),
        }
    }
}

/// A `rows × cols` grid stored row-major. Row 0 is the top.
///
/// Every column keeps its empty cells as a contiguous run starting at row 0;
/// `drop_piece` and `from_cells` are the only ways to fill cells and both
/// preserve that.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(rows: usize, cols: usize) -> Self {
        Board {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        }
    }

    /// Build a board from row-major cell values, rejecting shapes that
    /// violate gravity.
    pub fn from_cells(rows: usize, cols: usize, cells: Vec<Cell>) -> Result<Self, BoardError> {
        if rows == 0 || cols == 0 {
            return Err(BoardError::ZeroDimension { rows, cols });
        }
        let expected = rows
            .checked_mul(cols)
            .ok_or(BoardError::TooLarge { rows, cols })?;
        if cells.len() != expected {
            return Err(BoardError::CellCount {
                expected,
                found: cells.len(),
            });
        }

        let board = Board { rows, cols, cells };
        for col in 0..cols {
            let mut filled = false;
            for row in 0..rows {
                match board.get(row, col) {
                    Cell::Empty if filled => {
                        return Err(BoardError::FloatingPiece { row: row - 1, col })
                    }
                    Cell::Empty => {}
                    _ => filled = true,
                }
            }
        }
        Ok(board)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Row-major view of every cell
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Get the cell at a specific position
    /// Row 0 is the top, row `rows - 1` is the bottom
    ///
    /// Panics if the position is off the board; see [`Board::cell`] for the
    /// checked form.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.cols + col]
    }

    /// Bounds-checked variant of [`Board::get`]
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        (row < self.rows && col < self.cols).then(|| self.get(row, col))
    }

    /// Check if a column is full. Columns off the board count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= self.cols {
            return true;
        }
        self.get(0, col) != Cell::Empty
    }

    /// Row a piece dropped into `col` would land on
    pub fn landing_row(&self, col: usize) -> Option<usize> {
        if col >= self.cols {
            return None;
        }
        (0..self.rows)
            .rev()
            .find(|&row| self.get(row, col) == Cell::Empty)
    }

    /// Drop a piece in a column, returns the row where it landed
    pub fn drop_piece(&mut self, col: usize, cell: Cell) -> Result<usize, MoveError> {
        if col >= self.cols {
            return Err(MoveError::InvalidColumn {
                column: col,
                cols: self.cols,
            });
        }

        let row = self.landing_row(col).ok_or(MoveError::ColumnFull(col))?;
        self.cells[row * self.cols + col] = cell;
        Ok(row)
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..self.cols).all(|col| self.is_column_full(col))
    }

    /// Number of pieces on the board
    pub fn piece_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell != Cell::Empty).count()
    }

    /// Position `steps` cells away from `(row, col)` along `(dr, dc)`, if it
    /// is still on the board. Never wraps across rows or columns.
    fn offset(
        &self,
        row: usize,
        col: usize,
        (dr, dc): (isize, isize),
        steps: usize,
    ) -> Option<(usize, usize)> {
        let steps = isize::try_from(steps).ok()?;
        let r = row.checked_add_signed(dr.checked_mul(steps)?)?;
        let c = col.checked_add_signed(dc.checked_mul(steps)?)?;
        (r < self.rows && c < self.cols).then_some((r, c))
    }

    /// Owner of the window of `length` cells starting at `(row, col)` and
    /// heading along `direction`, if the whole window fits on the board and
    /// every cell belongs to the same player.
    pub fn run_owner(
        &self,
        row: usize,
        col: usize,
        direction: (isize, isize),
        length: usize,
    ) -> Option<Player> {
        if length == 0 {
            return None;
        }
        self.offset(row, col, direction, length - 1)?;
        let owner = self.cell(row, col)?.owner()?;
        let target = owner.to_cell();

        (1..length)
            .all(|i| {
                self.offset(row, col, direction, i)
                    .is_some_and(|(r, c)| self.get(r, c) == target)
            })
            .then_some(owner)
    }

    /// Length of the same-owner line through `(row, col)` along `direction`,
    /// counting both ways. Zero for an empty or off-board cell.
    pub fn line_length(&self, row: usize, col: usize, direction: (isize, isize)) -> usize {
        let Some(target) = self.cell(row, col).filter(|&cell| cell != Cell::Empty) else {
            return 0;
        };

        let mut count = 1;
        let (dr, dc) = direction;
        for way in [(dr, dc), (-dr, -dc)] {
            let mut steps = 1;
            while let Some((r, c)) = self.offset(row, col, way, steps) {
                if self.get(r, c) != target {
                    break;
                }
                count += 1;
                steps += 1;
            }
        }
        count
    }

    /// Check if the piece at `(row, col)` completes a line of `match_length`
    pub fn check_win(&self, row: usize, col: usize, match_length: usize) -> bool {
        match_length > 0
            && DIRECTIONS
                .iter()
                .any(|&direction| self.line_length(row, col, direction) >= match_length)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            let line: String = (0..self.cols).map(|col| self.get(row, col).glyph()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = BoardError;

    /// Parse the `Display` form: one line per row, top row first, using
    /// `.`, `X` and `O` (or `0`, `1` and `2`). Blank lines are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let rows = lines.len();
        let cols = lines.first().map_or(0, |line| line.chars().count());

        let mut cells = Vec::with_capacity(rows * cols);
        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != cols {
                return Err(BoardError::RaggedRow {
                    row,
                    expected: cols,
                    found,
                });
            }
            for glyph in line.chars() {
                cells.push(Cell::from_glyph(glyph).ok_or(BoardError::UnknownGlyph(glyph))?);
            }
        }

        Board::from_cells(rows, cols, cells)
    }
}
