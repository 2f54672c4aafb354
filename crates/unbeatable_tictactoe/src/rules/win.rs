//! Win detection logic for tic-tac-toe.

use crate::{Board, Cell, Player, Position};

/// The 8 winning lines: 3 rows, 3 columns, 2 diagonals.
pub const LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// Checks whether `player` owns all three cells of any line.
pub fn has_line(board: &Board, player: Player) -> bool {
    let mark = Cell::Occupied(player);
    LINES
        .iter()
        .any(|line| line.iter().all(|&pos| board.get(pos) == mark))
}

/// Returns the player holding a completed line.
///
/// Human is checked first; on boards reachable through alternating play at
/// most one player can hold a line.
pub fn winner(board: &Board) -> Option<Player> {
    [Player::Human, Player::Ai]
        .into_iter()
        .find(|&player| has_line(board, player))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_line_empty_board() {
        let board = Board::new();
        assert!(!has_line(&board, Player::Human));
        assert!(!has_line(&board, Player::Ai));
        assert_eq!(winner(&board), None);
    }

    #[test]
    fn test_every_line_wins() {
        for line in LINES {
            let mut board = Board::new();
            for pos in line {
                board.set(pos, Cell::Occupied(Player::Ai));
            }
            assert!(has_line(&board, Player::Ai), "line {:?}", line);
            assert!(!has_line(&board, Player::Human));
            assert_eq!(winner(&board), Some(Player::Ai));
        }
    }

    #[test]
    fn test_mixed_line_does_not_win() {
        let board: Board = "XXO/.../...".parse().unwrap();
        assert!(!has_line(&board, Player::Human));
        assert!(!has_line(&board, Player::Ai));
    }

    #[test]
    fn test_knight_shape_is_not_a_line() {
        let board: Board = "X../..X/.X.".parse().unwrap();
        assert_eq!(winner(&board), None);
    }
}
