//! Position enum for the nine cells of the board.

use serde::{Deserialize, Serialize};

/// A cell position on the board (row-major index 0-8).
///
/// The declaration order is row-major, which is also the order the search
/// enumerates candidate moves in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, strum::EnumIter,
)]
pub enum Position {
    /// Top-left (row 0, col 0)
    TopLeft,
    /// Top-center (row 0, col 1)
    TopCenter,
    /// Top-right (row 0, col 2)
    TopRight,
    /// Middle-left (row 1, col 0)
    MiddleLeft,
    /// Center (row 1, col 1)
    Center,
    /// Middle-right (row 1, col 2)
    MiddleRight,
    /// Bottom-left (row 2, col 0)
    BottomLeft,
    /// Bottom-center (row 2, col 1)
    BottomCenter,
    /// Bottom-right (row 2, col 2)
    BottomRight,
}

impl Position {
    /// All 9 positions in row-major order.
    pub const ALL: [Position; 9] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ];

    /// Get label for this position (for display).
    pub fn label(&self) -> &'static str {
        match self {
            Position::TopLeft => "Top-left",
            Position::TopCenter => "Top-center",
            Position::TopRight => "Top-right",
            Position::MiddleLeft => "Middle-left",
            Position::Center => "Center",
            Position::MiddleRight => "Middle-right",
            Position::BottomLeft => "Bottom-left",
            Position::BottomCenter => "Bottom-center",
            Position::BottomRight => "Bottom-right",
        }
    }

    /// Converts position to board index (0-8).
    pub fn to_index(self) -> usize {
        self as usize
    }

    /// Creates position from board index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Creates position from row and column, each in 0..=2.
    pub fn from_coords(row: usize, col: usize) -> Option<Self> {
        if row < 3 && col < 3 {
            Self::from_index(row * 3 + col)
        } else {
            None
        }
    }

    /// Row of this position (0-2).
    pub fn row(self) -> usize {
        self.to_index() / 3
    }

    /// Column of this position (0-2).
    pub fn col(self) -> usize {
        self.to_index() % 3
    }

    /// `(row, col)` pair.
    pub fn coords(self) -> (usize, usize) {
        (self.row(), self.col())
    }

    /// Neighbour in the given direction, or `None` at the board edge.
    pub fn step(self, d_row: isize, d_col: isize) -> Option<Self> {
        let row = self.row().checked_add_signed(d_row)?;
        let col = self.col().checked_add_signed(d_col)?;
        Self::from_coords(row, col)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}, {})", self.label(), self.row(), self.col())
    }
}
