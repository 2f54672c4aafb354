//! Command-line interface for unbeatable.

use clap::{Parser, Subcommand, ValueEnum};
use unbeatable_tictactoe::{Board, Player};

/// Unbeatable - tic-tac-toe against an exhaustive alpha-beta search
#[derive(Parser, Debug)]
#[command(name = "unbeatable")]
#[command(about = "Play tic-tac-toe against an opponent that never loses", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (defaults apply if it does not exist)
    #[arg(short, long, global = true, default_value = "unbeatable.toml")]
    pub config: std::path::PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal UI
    Tui {
        /// Who opens the game (overrides the config file)
        #[arg(long, value_enum)]
        first: Option<Opener>,
    },

    /// Print the AI's move for a board, e.g. "OO./XX./..."
    BestMove {
        /// Board as 9 cells, X = human, O = AI, . = empty; '/' separates rows
        board: Board,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print the minimax score of every AI move on a board
    Analyze {
        /// Board as 9 cells, X = human, O = AI, . = empty; '/' separates rows
        board: Board,
    },
}

/// Who moves first.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Opener {
    /// The human opens
    Human,
    /// The AI opens
    Ai,
}

impl From<Opener> for Player {
    fn from(opener: Opener) -> Self {
        match opener {
            Opener::Human => Player::Human,
            Opener::Ai => Player::Ai,
        }
    }
}
