//! Core domain types for tic-tac-toe.

use serde::{Deserialize, Serialize};

/// Side in the game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    /// The person at the keyboard, marked `X`.
    #[display("Human")]
    Human,
    /// The search engine, marked `O`.
    #[display("AI")]
    Ai,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::Human => Player::Ai,
            Player::Ai => Player::Human,
        }
    }

    /// Board symbol for this player.
    pub fn symbol(self) -> char {
        match self {
            Player::Human => 'X',
            Player::Ai => 'O',
        }
    }
}

/// A cell on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell occupied by a player.
    Occupied(Player),
}

impl Cell {
    /// Returns the occupant, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(player) => Some(player),
        }
    }

    /// Same cell with the occupant relabeled to the opponent.
    pub fn swapped(self) -> Self {
        match self {
            Cell::Empty => Cell::Empty,
            Cell::Occupied(player) => Cell::Occupied(player.opponent()),
        }
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        Cell::Occupied(player)
    }
}
