//! Unbeatable library - terminal front-end for unbeatable tic-tac-toe
//!
//! The game logic lives in [`unbeatable_tictactoe`]; this crate adds the
//! shell around it.
//!
//! # Architecture
//!
//! - **Config**: TOML settings (who opens, pruning, logging)
//! - **TUI**: ratatui board the human plays on
//! - **Report**: text/JSON output for one-shot board queries
//!
//! # Example
//!
//! ```
//! use unbeatable::{AppConfig, BestMove};
//! use unbeatable_tictactoe::{Board, SearchEngine};
//!
//! let config = AppConfig::default();
//! let engine = SearchEngine::new(*config.search());
//! let board: Board = "OO./XX./...".parse().unwrap();
//! let report = BestMove::compute(&engine, &board);
//! assert_eq!(report.coords, Some((0, 2)));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod report;
mod tui;

pub mod logging;

// Crate-level exports - Configuration
pub use config::{AppConfig, ConfigError};

// Crate-level exports - CLI output
pub use report::{BestMove, analysis, validate};

// Crate-level exports - Terminal UI
pub use tui::{App, run_tui};
