//! Unbeatable tic-tac-toe.
//!
//! Pure game logic with an exhaustive minimax opponent:
//!
//! - [`Board`]: the 3x3 grid, line and draw detection
//! - [`SearchEngine`]: minimax with alpha-beta pruning that picks and plays
//!   the AI's move
//! - [`Game`]: the turn protocol a front-end drives (human move, AI reply,
//!   status, reset)
//!
//! ```
//! use unbeatable_tictactoe::{Game, GameStatus, Player, Position, SearchEngine};
//!
//! let mut game = Game::new(Player::Human, SearchEngine::default());
//! let turn = game.play_human_turn(Position::Center).unwrap();
//! assert_eq!(*turn.ai(), Some(Position::TopLeft));
//! assert_eq!(game.query_state(), GameStatus::Ongoing);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod error;
mod game;
pub mod invariants;
mod position;
pub mod rules;
pub mod search;
mod types;

pub use board::Board;
pub use error::{MoveError, ParseBoardError};
pub use game::{Game, GameStatus, Outcome, Phase, Turn};
pub use position::Position;
pub use search::{Analysis, Score, SearchConfig, SearchEngine, SearchStats, evaluate};
pub use types::{Cell, Player};
