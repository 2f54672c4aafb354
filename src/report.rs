//! Text and JSON output for the one-shot CLI commands.

use anyhow::{Result, bail};
use serde::Serialize;
use tracing::instrument;
use unbeatable_tictactoe::invariants::{BoardInvariants, InvariantSet};
use unbeatable_tictactoe::{Board, GameStatus, Position, Score, SearchEngine};

/// Rejects boards no legal game can reach: both players holding a line, or
/// mark counts more than one apart.
pub fn validate(board: &Board) -> Result<()> {
    if let Err(violations) = BoardInvariants::check_all(board) {
        let reasons: Vec<String> = violations.iter().map(ToString::to_string).collect();
        bail!("Board {} cannot occur in a game: {}", board, reasons.join("; "));
    }
    Ok(())
}

/// Result of `best-move`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BestMove {
    /// Cell the AI played, `None` once the game is over.
    pub position: Option<Position>,
    /// `[row, col]` of that cell.
    pub coords: Option<(usize, usize)>,
    /// Board after the move, in compact form.
    pub board: String,
    /// Status after the move.
    pub status: GameStatus,
}

impl BestMove {
    /// Plays the AI's move on a copy of `board`.
    ///
    /// A board that already has a line or is full is reported as is.
    #[instrument(skip(engine, board), fields(board = %board))]
    pub fn compute(engine: &SearchEngine, board: &Board) -> Self {
        let mut after = board.clone();
        let position = if board.is_terminal() {
            None
        } else {
            engine.choose_and_apply_move(&mut after)
        };
        Self {
            position,
            coords: position.map(Position::coords),
            board: after.to_string(),
            status: GameStatus::of(&after),
        }
    }

    /// Renders as text or pretty JSON.
    pub fn render(&self, json: bool) -> Result<String> {
        if json {
            return Ok(serde_json::to_string_pretty(self)?);
        }
        let board: Board = self.board.parse()?;
        let headline = match self.position {
            Some(pos) => format!("AI plays {}", pos),
            None => format!("No move: {}", self.status),
        };
        Ok(format!("{}\n\n{}\n\n{}", headline, board.display(), self.status))
    }
}

/// Per-move scores for `analyze`.
#[instrument(skip(engine, board), fields(board = %board))]
pub fn analysis(engine: &SearchEngine, board: &Board) -> String {
    let mut out = format!("{}\n\n", board.display());

    if board.is_terminal() {
        out.push_str(&GameStatus::of(board).to_string());
        return out;
    }

    let (scores, stats) = engine.scores(board);
    let mut best: Option<(Position, Score)> = None;
    for &(pos, score) in &scores {
        let verdict = match score.signum() {
            1 => "AI wins",
            -1 => "human wins",
            _ => "draw",
        };
        out.push_str(&format!("{:>2} {:<14} {:+} ({})\n", pos.to_index() + 1, pos.label(), score, verdict));
        // First strictly better score wins, as in the engine's own choice.
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((pos, score));
        }
    }

    if let Some((pos, _)) = best {
        out.push_str(&format!(
            "\nBest: {} ({} nodes, {} cutoffs)",
            pos,
            stats.nodes(),
            stats.cutoffs()
        ));
    }
    out
}
