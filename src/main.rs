//! Unbeatable - Unified CLI
//!
//! Terminal tic-tac-toe against an exhaustive alpha-beta search.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use tracing::{info, instrument};
use unbeatable::{AppConfig, BestMove, analysis, logging, run_tui, validate};
use unbeatable_tictactoe::{Board, SearchEngine};

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;

    match cli.command {
        Command::Tui { first } => {
            let config = match first {
                Some(opener) => config.with_first_player(opener.into()),
                None => config,
            };
            logging::init_file(config.log_filter(), config.log_file())?;
            run_tui(&config)
        }
        Command::BestMove { board, json } => {
            logging::init_stderr(config.log_filter());
            best_move(&config, &board, json)
        }
        Command::Analyze { board } => {
            logging::init_stderr(config.log_filter());
            analyze(&config, &board)
        }
    }
}

/// Print the AI's move for a board
#[instrument(skip_all, fields(board = %board))]
fn best_move(config: &AppConfig, board: &Board, json: bool) -> Result<()> {
    validate(board)?;
    let engine = SearchEngine::new(*config.search());
    let report = BestMove::compute(&engine, board);
    info!(position = ?report.position, "Best move computed");
    println!("{}", report.render(json)?);
    Ok(())
}

/// Print per-move scores for a board
#[instrument(skip_all, fields(board = %board))]
fn analyze(config: &AppConfig, board: &Board) -> Result<()> {
    validate(board)?;
    let engine = SearchEngine::new(*config.search());
    println!("{}", analysis(&engine, board));
    Ok(())
}
