//! First-class invariants for tic-tac-toe boards.
//!
//! Invariants are logical properties that must hold on every board reached
//! through alternating play. The board itself does not enforce them; the
//! game protocol does, and checks them after each committed move in debug
//! builds.

use crate::{Board, Player};

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("{}", description)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Invariant: at most one player holds a line.
pub struct SingleWinner;

impl Invariant<Board> for SingleWinner {
    fn holds(board: &Board) -> bool {
        !(board.has_line(Player::Human) && board.has_line(Player::Ai))
    }

    fn description() -> &'static str {
        "At most one player holds a line"
    }
}

/// Invariant: mark counts differ by at most one.
///
/// Either side may open, so the surplus can belong to either player.
pub struct BalancedMarks;

impl Invariant<Board> for BalancedMarks {
    fn holds(board: &Board) -> bool {
        board.count(Player::Human).abs_diff(board.count(Player::Ai)) <= 1
    }

    fn description() -> &'static str {
        "Mark counts differ by at most one"
    }
}

/// All board invariants as a composable set.
pub type BoardInvariants = (SingleWinner, BalancedMarks);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_holds() {
        assert!(BoardInvariants::check_all(&Board::new()).is_ok());
    }

    #[test]
    fn test_double_winner_violates() {
        let board: Board = "XXX/OOO/...".parse().unwrap();
        assert!(!SingleWinner::holds(&board));
        assert!(BalancedMarks::holds(&board));

        let violations = BoardInvariants::check_all(&board).unwrap_err();
        assert_eq!(violations, vec![InvariantViolation::new(SingleWinner::description())]);
    }

    #[test]
    fn test_unbalanced_marks_violate() {
        let board: Board = "XX./X../...".parse().unwrap();
        assert!(!BalancedMarks::holds(&board));
        assert!(BoardInvariants::check_all(&board).is_err());
    }

    #[test]
    fn test_either_side_may_lead() {
        let ai_first: Board = "O../.../...".parse().unwrap();
        let human_first: Board = "X../.../...".parse().unwrap();
        assert!(BalancedMarks::holds(&ai_first));
        assert!(BalancedMarks::holds(&human_first));
    }
}
