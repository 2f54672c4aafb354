//! Error types for the tic-tac-toe core.

use crate::Position;

/// Error that can occur when applying a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    /// The cell at the position is already occupied.
    #[display("{} is already occupied", _0)]
    CellOccupied(#[error(not(source))] Position),

    /// The game is already over.
    #[display("Game is already over")]
    GameOver,

    /// The AI is to move, not the human.
    #[display("It's not the human's turn")]
    NotYourTurn,
}

/// Error parsing a board from its text form.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseBoardError {
    /// A character that is neither a mark, an empty marker nor a separator.
    #[display("Unexpected character {:?} in board", _0)]
    InvalidChar(#[error(not(source))] char),

    /// The text did not describe exactly 9 cells.
    #[display("Expected 9 cells, found {}", _0)]
    WrongLength(#[error(not(source))] usize),
}
