//! Draw detection logic for tic-tac-toe.

use super::win::winner;
use crate::{Board, Cell};

/// Checks if the board is full (no empty cells).
pub fn is_full(board: &Board) -> bool {
    board.cells().iter().all(|c| *c != Cell::Empty)
}

/// A full board with no winner.
pub fn is_draw(board: &Board) -> bool {
    is_full(board) && winner(board).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Player, Position};

    #[test]
    fn test_empty_board_not_full() {
        let board = Board::new();
        assert!(!is_full(&board));
    }

    #[test]
    fn test_partial_board_not_full() {
        let mut board = Board::new();
        board.set(Position::Center, Cell::Occupied(Player::Human));
        assert!(!is_full(&board));
    }

    #[test]
    fn test_draw_detection() {
        // X O X / O X X / O X O
        let board: Board = "XOX/OXX/OXO".parse().unwrap();
        assert!(is_full(&board));
        assert!(is_draw(&board));
    }

    #[test]
    fn test_not_draw_if_winner() {
        // Full, but X holds the left column.
        let board: Board = "XOO/XXO/XOX".parse().unwrap();
        assert!(is_full(&board));
        assert!(!is_draw(&board));
    }
}
