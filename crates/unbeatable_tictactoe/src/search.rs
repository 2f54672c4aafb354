//! Minimax search with alpha-beta pruning.
//!
//! The engine searches the full game tree down to terminal boards; there is
//! no depth limit and no heuristic. Candidate moves are always enumerated in
//! row-major order, which makes the result deterministic: among moves of
//! equal value the first one in row-major order is chosen.

use crate::{Board, Cell, Player, Position};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};
use tracing::{debug, instrument};

/// Minimax value of a board, from the AI's point of view.
pub type Score = i32;

/// Value of a board the AI has won.
pub const AI_WIN: Score = 1;
/// Value of a board the human has won.
pub const HUMAN_WIN: Score = -1;
/// Value of a drawn board.
pub const DRAW: Score = 0;

/// Scores a terminal board: `+1` AI line, `-1` human line, `0` otherwise.
///
/// Only meaningful for terminal boards; a non-terminal board scores 0.
pub fn evaluate(board: &Board) -> Score {
    if board.has_line(Player::Ai) {
        AI_WIN
    } else if board.has_line(Player::Human) {
        HUMAN_WIN
    } else {
        DRAW
    }
}

/// Search settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize, derive_new::new)]
pub struct SearchConfig {
    /// Cut off siblings once `beta <= alpha`. Disabling this gives plain
    /// minimax, which picks the same move after visiting more nodes.
    #[serde(default = "default_pruning")]
    pruning: bool,
}

fn default_pruning() -> bool {
    true
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            pruning: default_pruning(),
        }
    }
}

/// Counters collected during one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters, Serialize)]
pub struct SearchStats {
    /// Boards visited, root children included.
    nodes: u64,
    /// Sibling enumerations stopped early by the `beta <= alpha` test.
    cutoffs: u64,
}

/// Result of analysing a board without committing a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize)]
pub struct Analysis {
    /// Best move for the AI.
    position: Position,
    /// Minimax value of that move.
    score: Score,
    /// Work done to find it.
    stats: SearchStats,
}

/// A speculative mark that is removed again when the guard drops.
///
/// Dereferences to the board so the search can recurse through it. The
/// cell is cleared on every exit path, pruning breaks included.
struct Placement<'a> {
    board: &'a mut Board,
    pos: Position,
}

impl<'a> Placement<'a> {
    fn new(board: &'a mut Board, pos: Position, player: Player) -> Self {
        debug_assert!(board.is_empty(pos), "speculative placement on {pos}");
        board.set(pos, Cell::Occupied(player));
        Self { board, pos }
    }
}

impl Deref for Placement<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for Placement<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for Placement<'_> {
    fn drop(&mut self) {
        self.board.set(self.pos, Cell::Empty);
    }
}

/// Exhaustive game-tree search for the AI's move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, derive_new::new)]
pub struct SearchEngine {
    config: SearchConfig,
}

impl SearchEngine {
    /// Returns the engine configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Picks the AI's best move, writes it to `board` and returns it.
    ///
    /// Returns `None` and leaves the board untouched when no cell is empty.
    /// Callers should not ask for a move on a board that already has a
    /// line; the engine would still fill a cell.
    #[instrument(skip(self, board), fields(board = %board))]
    pub fn choose_and_apply_move(&self, board: &mut Board) -> Option<Position> {
        let mut stats = SearchStats::default();
        let (position, score) = self.best_move(board, &mut stats)?;
        board.set(position, Cell::Occupied(Player::Ai));
        debug!(
            %position,
            score,
            nodes = stats.nodes,
            cutoffs = stats.cutoffs,
            "AI committed move"
        );
        Some(position)
    }

    /// Like [`choose_and_apply_move`](Self::choose_and_apply_move) but
    /// leaves `board` unchanged and reports the score and search counters.
    #[instrument(skip(self, board), fields(board = %board))]
    pub fn analyze(&self, board: &Board) -> Option<Analysis> {
        let mut scratch = board.clone();
        let mut stats = SearchStats::default();
        let (position, score) = self.best_move(&mut scratch, &mut stats)?;
        Some(Analysis {
            position,
            score,
            stats,
        })
    }

    /// Minimax value of every empty cell as an AI move, in row-major order,
    /// with the counters for the whole pass.
    #[instrument(skip(self, board), fields(board = %board))]
    pub fn scores(&self, board: &Board) -> (Vec<(Position, Score)>, SearchStats) {
        let mut scratch = board.clone();
        let mut stats = SearchStats::default();
        let mut scores = Vec::with_capacity(9);
        for pos in Position::ALL {
            if !scratch.is_empty(pos) {
                continue;
            }
            let mut placed = Placement::new(&mut scratch, pos, Player::Ai);
            let score = self.search_counted(&mut placed, false, Score::MIN, Score::MAX, &mut stats);
            scores.push((pos, score));
        }
        (scores, stats)
    }

    /// Minimax value of `board` with `maximizing` telling whether the AI
    /// (true) or the human (false) is to move.
    ///
    /// `alpha` and `beta` are the bounds already guaranteed to the maximizer
    /// and the minimizer; pass `Score::MIN` and `Score::MAX` for a full
    /// window. The board is returned unchanged.
    pub fn search(&self, board: &mut Board, maximizing: bool, alpha: Score, beta: Score) -> Score {
        let mut stats = SearchStats::default();
        self.search_counted(board, maximizing, alpha, beta, &mut stats)
    }

    /// Root of the search: the first strictly best empty cell in row-major
    /// order, each scored with a fresh full window.
    fn best_move(&self, board: &mut Board, stats: &mut SearchStats) -> Option<(Position, Score)> {
        let mut best: Option<(Position, Score)> = None;
        for pos in Position::ALL {
            if !board.is_empty(pos) {
                continue;
            }
            let score = {
                let mut placed = Placement::new(board, pos, Player::Ai);
                self.search_counted(&mut placed, false, Score::MIN, Score::MAX, stats)
            };
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((pos, score));
            }
        }
        best
    }

    fn search_counted(
        &self,
        board: &mut Board,
        maximizing: bool,
        mut alpha: Score,
        mut beta: Score,
        stats: &mut SearchStats,
    ) -> Score {
        stats.nodes += 1;

        if board.is_terminal() {
            return evaluate(board);
        }

        let (mover, mut best) = if maximizing {
            (Player::Ai, Score::MIN)
        } else {
            (Player::Human, Score::MAX)
        };

        for pos in Position::ALL {
            if !board.is_empty(pos) {
                continue;
            }
            let value = {
                let mut placed = Placement::new(board, pos, mover);
                self.search_counted(&mut placed, !maximizing, alpha, beta, stats)
            };

            if maximizing {
                best = best.max(value);
                alpha = alpha.max(value);
            } else {
                best = best.min(value);
                beta = beta.min(value);
            }

            // Only this node's remaining siblings are skipped.
            if self.config.pruning && beta <= alpha {
                stats.cutoffs += 1;
                break;
            }
        }

        best
    }
}
