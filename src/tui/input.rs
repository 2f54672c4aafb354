//! Key handling helpers for keyboard navigation.

use crossterm::event::KeyCode;
use unbeatable_tictactoe::Position;

/// Moves cursor based on arrow keys (or vim keys); stops at the edges.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let (d_row, d_col) = match key {
        KeyCode::Up | KeyCode::Char('k') => (-1, 0),
        KeyCode::Down | KeyCode::Char('j') => (1, 0),
        KeyCode::Left | KeyCode::Char('h') => (0, -1),
        KeyCode::Right | KeyCode::Char('l') => (0, 1),
        _ => return cursor,
    };
    cursor.step(d_row, d_col).unwrap_or(cursor)
}

/// Maps digits 1-9 to cells, keypad order matching the board display.
pub fn digit_position(key: KeyCode) -> Option<Position> {
    match key {
        KeyCode::Char(c) => c
            .to_digit(10)
            .and_then(|d| (d as usize).checked_sub(1))
            .and_then(Position::from_index),
        _ => None,
    }
}
