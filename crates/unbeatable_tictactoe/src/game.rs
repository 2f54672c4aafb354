//! Game protocol: human move, AI reply, status, reset.
//!
//! [`Game`] owns one [`Board`] and the turn phase. It is the only place that
//! commits moves, so it is where alternation is enforced:
//!
//! ```text
//! AwaitingHuman --human places--> (evaluate) --> GameOver | AwaitingAi
//! AwaitingAi    --AI places-----> (evaluate) --> GameOver | AwaitingHuman
//! GameOver      --reset---------> AwaitingHuman
//! ```

use crate::error::MoveError;
use crate::invariants::{BoardInvariants, InvariantSet};
use crate::search::SearchEngine;
use crate::{Board, Cell, Player, Position};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Status derived from the board after each move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// No line and at least one empty cell.
    Ongoing,
    /// The player holds a line.
    Won(Player),
    /// Full board, no line.
    Draw,
}

impl GameStatus {
    /// Reads the status off a board.
    pub fn of(board: &Board) -> Self {
        if let Some(winner) = board.winner() {
            GameStatus::Won(winner)
        } else if board.is_full() {
            GameStatus::Draw
        } else {
            GameStatus::Ongoing
        }
    }

    /// Returns true once the game has ended.
    pub fn is_over(self) -> bool {
        !matches!(self, GameStatus::Ongoing)
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameStatus::Ongoing => write!(f, "In progress"),
            GameStatus::Won(Player::Human) => write!(f, "You win!"),
            GameStatus::Won(Player::Ai) => write!(f, "AI wins!"),
            GameStatus::Draw => write!(f, "It's a draw!"),
        }
    }
}

/// Outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Player won the game.
    Winner(Player),
    /// Game ended in a draw.
    Draw,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Winner(player) => Some(*player),
            Outcome::Draw => None,
        }
    }
}

/// Where the game stands between moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the human to place a mark.
    AwaitingHuman,
    /// The AI is to move.
    AwaitingAi,
    /// Terminal; only [`Game::reset`] leaves this phase.
    GameOver(Outcome),
}

impl Phase {
    fn after_move(board: &Board, mover: Player) -> Self {
        match GameStatus::of(board) {
            GameStatus::Won(winner) => Phase::GameOver(Outcome::Winner(winner)),
            GameStatus::Draw => Phase::GameOver(Outcome::Draw),
            GameStatus::Ongoing => Phase::to_move(mover.opponent()),
        }
    }

    fn to_move(player: Player) -> Self {
        match player {
            Player::Human => Phase::AwaitingHuman,
            Player::Ai => Phase::AwaitingAi,
        }
    }
}

/// What happened during one human turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize)]
pub struct Turn {
    /// Cell the human played.
    human: Position,
    /// The AI's reply, absent when the human's move ended the game.
    ai: Option<Position>,
    /// Status after the turn.
    status: GameStatus,
}

/// A single game against the search engine.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    phase: Phase,
    engine: SearchEngine,
}

impl Game {
    /// Creates a new game on an empty board with `first_player` to move.
    #[instrument(skip(engine))]
    pub fn new(first_player: Player, engine: SearchEngine) -> Self {
        info!(%first_player, "Game started");
        Self {
            board: Board::new(),
            phase: Phase::to_move(first_player),
            engine,
        }
    }

    /// Resumes a game from an arbitrary board with `to_move` to play.
    ///
    /// The phase is derived from the board; a terminal board starts in
    /// [`Phase::GameOver`].
    #[instrument(skip(board, engine), fields(board = %board))]
    pub fn from_board(board: Board, to_move: Player, engine: SearchEngine) -> Self {
        let phase = match GameStatus::of(&board) {
            GameStatus::Won(winner) => Phase::GameOver(Outcome::Winner(winner)),
            GameStatus::Draw => Phase::GameOver(Outcome::Draw),
            GameStatus::Ongoing => Phase::to_move(to_move),
        };
        Self {
            board,
            phase,
            engine,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the search engine.
    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }

    /// Current status, read off the board.
    pub fn query_state(&self) -> GameStatus {
        GameStatus::of(&self.board)
    }

    /// Places the human's mark at `pos`.
    ///
    /// # Errors
    ///
    /// - [`MoveError::GameOver`] once the game has ended.
    /// - [`MoveError::NotYourTurn`] while the AI is to move.
    /// - [`MoveError::CellOccupied`] if the cell is not empty.
    ///
    /// The board is unchanged on error.
    #[instrument(skip(self), fields(position = %pos))]
    pub fn apply_human_move(&mut self, pos: Position) -> Result<(), MoveError> {
        match self.phase {
            Phase::GameOver(_) => return Err(MoveError::GameOver),
            Phase::AwaitingAi => return Err(MoveError::NotYourTurn),
            Phase::AwaitingHuman => {}
        }

        if !self.board.is_empty(pos) {
            warn!("Rejected move on occupied cell");
            return Err(MoveError::CellOccupied(pos));
        }

        self.board.set(pos, Cell::Occupied(Player::Human));
        self.commit(Player::Human);
        Ok(())
    }

    /// Lets the engine place the AI's mark.
    ///
    /// # Errors
    ///
    /// [`MoveError::GameOver`] once the game has ended,
    /// [`MoveError::NotYourTurn`] while the human is to move.
    #[instrument(skip(self))]
    pub fn play_ai_turn(&mut self) -> Result<Position, MoveError> {
        match self.phase {
            Phase::GameOver(_) => return Err(MoveError::GameOver),
            Phase::AwaitingHuman => return Err(MoveError::NotYourTurn),
            Phase::AwaitingAi => {}
        }

        // An ongoing game always has an empty cell.
        let pos = self
            .engine
            .choose_and_apply_move(&mut self.board)
            .ok_or(MoveError::GameOver)?;
        self.commit(Player::Ai);
        Ok(pos)
    }

    /// Plays one full human turn: the human's move and, unless that ended
    /// the game, the AI's immediate reply.
    #[instrument(skip(self), fields(position = %pos))]
    pub fn play_human_turn(&mut self, pos: Position) -> Result<Turn, MoveError> {
        self.apply_human_move(pos)?;

        let ai = match self.phase {
            Phase::AwaitingAi => Some(self.play_ai_turn()?),
            _ => None,
        };

        Ok(Turn {
            human: pos,
            ai,
            status: self.query_state(),
        })
    }

    /// Clears the board; the human moves first in the restarted game.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.board.reset();
        self.phase = Phase::AwaitingHuman;
        info!("Game reset");
    }

    fn commit(&mut self, mover: Player) {
        if cfg!(debug_assertions)
            && let Err(violations) = BoardInvariants::check_all(&self.board)
        {
            for violation in violations {
                warn!(%violation, board = %self.board, "Board invariant violated");
            }
        }

        self.phase = Phase::after_move(&self.board, mover);
        match self.phase {
            Phase::GameOver(outcome) => info!(?outcome, board = %self.board, "Game over"),
            phase => debug!(?phase, board = %self.board, "Move committed"),
        }
    }
}

impl Default for Game {
    /// AI opens, as in the classic version of this game.
    fn default() -> Self {
        Self::new(Player::Ai, SearchEngine::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn human_first() -> Game {
        Game::new(Player::Human, SearchEngine::default())
    }

    #[test]
    fn test_new_game_phases() {
        assert_eq!(human_first().phase(), Phase::AwaitingHuman);
        assert_eq!(Game::default().phase(), Phase::AwaitingAi);
        assert_eq!(Game::default().query_state(), GameStatus::Ongoing);
    }

    #[test]
    fn test_human_move_hands_turn_to_ai() {
        let mut game = human_first();
        game.apply_human_move(Position::Center).unwrap();
        assert_eq!(game.phase(), Phase::AwaitingAi);
        assert_eq!(game.board().get(Position::Center), Cell::Occupied(Player::Human));
    }

    #[test]
    fn test_occupied_cell_rejected_without_mutation() {
        let mut game = human_first();
        game.play_human_turn(Position::Center).unwrap();
        let before = game.board().clone();

        let result = game.apply_human_move(Position::Center);
        assert_eq!(result, Err(MoveError::CellOccupied(Position::Center)));
        assert_eq!(game.board(), &before);
        assert_eq!(game.phase(), Phase::AwaitingHuman);
    }

    #[test]
    fn test_out_of_turn_moves_rejected() {
        let mut game = Game::default();
        assert_eq!(game.apply_human_move(Position::Center), Err(MoveError::NotYourTurn));

        let mut game = human_first();
        assert_eq!(game.play_ai_turn(), Err(MoveError::NotYourTurn));
    }

    #[test]
    fn test_ai_opens_top_left() {
        let mut game = Game::default();
        assert_eq!(game.play_ai_turn(), Ok(Position::TopLeft));
        assert_eq!(game.phase(), Phase::AwaitingHuman);
    }

    #[test]
    fn test_play_human_turn_includes_reply() {
        let mut game = human_first();
        let turn = game.play_human_turn(Position::Center).unwrap();
        assert_eq!(*turn.human(), Position::Center);
        assert_eq!(*turn.ai(), Some(Position::TopLeft));
        assert_eq!(*turn.status(), GameStatus::Ongoing);
        assert_eq!(game.board().count(Player::Ai), 1);
    }

    #[test]
    fn test_ai_completes_line_and_game_ends() {
        let board: Board = "OO./XX./...".parse().unwrap();
        let mut game = Game::from_board(board, Player::Ai, SearchEngine::default());
        assert_eq!(game.play_ai_turn(), Ok(Position::TopRight));
        assert_eq!(game.query_state(), GameStatus::Won(Player::Ai));
        assert_eq!(game.phase(), Phase::GameOver(Outcome::Winner(Player::Ai)));
        assert_eq!(game.apply_human_move(Position::Center), Err(MoveError::GameOver));
    }

    #[test]
    fn test_winning_human_move_gets_no_reply() {
        // Not reachable against the engine, but the protocol must stop.
        let board: Board = "XX./OO./O..".parse().unwrap();
        let mut game = Game::from_board(board, Player::Human, SearchEngine::default());
        let turn = game.play_human_turn(Position::TopRight).unwrap();
        assert_eq!(*turn.ai(), None);
        assert_eq!(*turn.status(), GameStatus::Won(Player::Human));
    }

    #[test]
    fn test_full_board_is_draw() {
        let board: Board = "XOX/OXX/OXO".parse().unwrap();
        let game = Game::from_board(board, Player::Human, SearchEngine::default());
        assert_eq!(game.query_state(), GameStatus::Draw);
        assert_eq!(game.phase(), Phase::GameOver(Outcome::Draw));
    }

    #[test]
    fn test_reset_returns_to_awaiting_human() {
        let board: Board = "OOO/XX./...".parse().unwrap();
        let mut game = Game::from_board(board, Player::Human, SearchEngine::default());
        assert!(game.query_state().is_over());

        game.reset();
        assert_eq!(game.board(), &Board::new());
        assert_eq!(game.phase(), Phase::AwaitingHuman);
        assert!(game.apply_human_move(Position::BottomRight).is_ok());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(GameStatus::Won(Player::Human).to_string(), "You win!");
        assert_eq!(GameStatus::Won(Player::Ai).to_string(), "AI wins!");
        assert_eq!(GameStatus::Draw.to_string(), "It's a draw!");
    }
}
