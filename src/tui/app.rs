//! Application state and logic.

use crossterm::event::KeyCode;
use tracing::{debug, info, instrument, warn};
use unbeatable_tictactoe::{Game, GameStatus, MoveError, Phase, Position, SearchEngine};

use super::input::{digit_position, move_cursor};
use crate::config::AppConfig;

const HUMAN_PROMPT: &str = "Your turn. Arrows + Enter or 1-9 to play, 'r' restart, 'q' quit.";

/// Main application state.
pub struct App {
    game: Game,
    cursor: Position,
    status_message: String,
    should_quit: bool,
}

impl App {
    /// Creates a new application; the AI opens at once if configured to.
    #[instrument(skip(config))]
    pub fn new(config: &AppConfig) -> Self {
        let game = Game::new(*config.first_player(), SearchEngine::new(*config.search()));
        let mut app = Self {
            game,
            cursor: Position::Center,
            status_message: HUMAN_PROMPT.to_string(),
            should_quit: false,
        };
        if app.game.phase() == Phase::AwaitingAi {
            app.ai_opens();
        }
        app
    }

    /// Gets the current game.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Gets the highlighted cell.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Returns true once the user asked to leave.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Handles one key press.
    pub fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('r') => self.restart(),
            KeyCode::Enter | KeyCode::Char(' ') => self.play(self.cursor),
            code => {
                if let Some(pos) = digit_position(code) {
                    self.cursor = pos;
                    self.play(pos);
                } else {
                    self.cursor = move_cursor(self.cursor, code);
                }
            }
        }
    }

    /// Plays the human's move at `pos` and lets the AI answer.
    #[instrument(skip(self), fields(position = %pos))]
    pub fn play(&mut self, pos: Position) {
        match self.game.play_human_turn(pos) {
            Ok(turn) => {
                debug!(?turn, "Turn played");
                self.status_message = match (turn.ai(), turn.status()) {
                    (_, status) if status.is_over() => game_over_message(*status),
                    (Some(ai), _) => format!("AI played {}. {}", ai.label(), HUMAN_PROMPT),
                    (None, _) => HUMAN_PROMPT.to_string(),
                };
            }
            Err(MoveError::GameOver) => {
                self.status_message = game_over_message(self.game.query_state());
            }
            Err(e) => {
                warn!(error = %e, "Move rejected");
                self.status_message = format!("Invalid move: {}. Try again.", e);
            }
        }
    }

    /// Restarts the game; the human opens a restarted game.
    pub fn restart(&mut self) {
        info!("Restarting game");
        self.game.reset();
        self.cursor = Position::Center;
        self.status_message = format!("Game restarted. {}", HUMAN_PROMPT);
    }

    fn ai_opens(&mut self) {
        match self.game.play_ai_turn() {
            Ok(pos) => {
                self.status_message = format!("AI opened at {}. {}", pos.label(), HUMAN_PROMPT);
            }
            Err(e) => warn!(error = %e, "AI could not open"),
        }
    }
}

fn game_over_message(status: GameStatus) -> String {
    format!("Game over: {} Press 'r' to restart or 'q' to quit.", status)
}
