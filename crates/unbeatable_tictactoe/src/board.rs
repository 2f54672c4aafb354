//! The 3x3 board.

use crate::error::ParseBoardError;
use crate::rules;
use crate::{Cell, Player, Position};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 3x3 tic-tac-toe board.
///
/// Cells are stored row-major. The board is a plain value: it does not
/// track whose turn it is and does not validate moves. Turn order is kept
/// by [`Game`](crate::Game).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Cells in row-major order (0-8).
    cells: [Cell; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; 9],
        }
    }

    /// Gets the cell at the given position.
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.to_index()]
    }

    /// Overwrites the cell at the given position.
    ///
    /// This is a low-level primitive: it does not check that the cell was
    /// empty. Use [`Game::apply_human_move`](crate::Game::apply_human_move)
    /// for a validated move.
    pub fn set(&mut self, pos: Position, cell: Cell) {
        self.cells[pos.to_index()] = cell;
    }

    /// Gets the cell at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is outside `0..=2`. Use
    /// [`Position::from_coords`] to validate untrusted coordinates first.
    pub fn cell_at(&self, row: usize, col: usize) -> Cell {
        self.get(Self::checked(row, col))
    }

    /// Overwrites the cell at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is outside `0..=2`.
    pub fn set_cell(&mut self, row: usize, col: usize, cell: Cell) {
        self.set(Self::checked(row, col), cell);
    }

    fn checked(row: usize, col: usize) -> Position {
        match Position::from_coords(row, col) {
            Some(pos) => pos,
            None => panic!("cell ({row}, {col}) is outside the 3x3 board"),
        }
    }

    /// Checks if a cell is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Cell::Empty
    }

    /// Returns all cells as a slice.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Empty positions in row-major order.
    pub fn empty_positions(&self) -> impl Iterator<Item = Position> + '_ {
        Position::ALL.into_iter().filter(|&pos| self.is_empty(pos))
    }

    /// Number of cells marked by `player`.
    pub fn count(&self, player: Player) -> usize {
        self.cells
            .iter()
            .filter(|&&c| c == Cell::Occupied(player))
            .count()
    }

    /// True iff no cell is empty.
    pub fn is_full(&self) -> bool {
        rules::is_full(self)
    }

    /// True iff `player` holds any of the 8 lines.
    pub fn has_line(&self, player: Player) -> bool {
        rules::has_line(self, player)
    }

    /// The player holding a line, if any.
    pub fn winner(&self) -> Option<Player> {
        rules::winner(self)
    }

    /// True iff either player holds a line or the board is full.
    pub fn is_terminal(&self) -> bool {
        self.has_line(Player::Human) || self.has_line(Player::Ai) || self.is_full()
    }

    /// Clears every cell.
    pub fn reset(&mut self) {
        self.cells = [Cell::Empty; 9];
    }

    /// Copy of the board with every Human mark turned into an AI mark and
    /// vice versa.
    pub fn swapped(&self) -> Self {
        Self {
            cells: self.cells.map(Cell::swapped),
        }
    }

    /// Formats the board as a human-readable grid.
    ///
    /// Empty cells show their 1-based keypad number.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for pos in Position::ALL {
            let symbol = match self.get(pos) {
                Cell::Empty => char::from(b'1' + pos.to_index() as u8),
                Cell::Occupied(player) => player.symbol(),
            };
            result.push(symbol);
            if pos.col() < 2 {
                result.push('|');
            } else if pos.row() < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

/// Compact one-line form, `XO./.X./..O`, accepted back by [`FromStr`].
impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for pos in Position::ALL {
            if pos.col() == 0 && pos.row() > 0 {
                write!(f, "/")?;
            }
            let symbol = match self.get(pos) {
                Cell::Empty => '.',
                Cell::Occupied(player) => player.symbol(),
            };
            write!(f, "{symbol}")?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    /// Parses 9 cells in row-major order.
    ///
    /// `X` (Human) and `O` (AI) in either case; `.`, `-`, `_` and space
    /// mark empty cells. `/`, `|` and line breaks are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = Vec::with_capacity(9);
        for c in s.chars() {
            let cell = match c {
                'X' | 'x' => Cell::Occupied(Player::Human),
                'O' | 'o' => Cell::Occupied(Player::Ai),
                '.' | '-' | '_' | ' ' => Cell::Empty,
                '/' | '|' | '\n' | '\r' => continue,
                other => return Err(ParseBoardError::InvalidChar(other)),
            };
            cells.push(cell);
        }

        let cells: [Cell; 9] = cells
            .try_into()
            .map_err(|v: Vec<Cell>| ParseBoardError::WrongLength(v.len()))?;
        Ok(Self { cells })
    }
}
