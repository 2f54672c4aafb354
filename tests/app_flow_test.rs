//! End-to-end tests for the front-end driving the core.

use crossterm::event::KeyCode;
use std::io::Write;
use unbeatable::{App, AppConfig, BestMove};
use unbeatable_tictactoe::{Cell, GameStatus, Player, Position, SearchEngine};

#[test]
fn test_config_file_drives_app() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "first_player = \"human\"\n[search]\npruning = false").expect("write config");

    let config = AppConfig::load_or_default(file.path()).expect("valid config");
    let mut app = App::new(&config);
    assert_eq!(app.game().board().count(Player::Ai), 0);

    app.handle_key(KeyCode::Char('5'));
    assert_eq!(app.game().board().get(Position::Center), Cell::Occupied(Player::Human));
    assert_eq!(app.game().board().get(Position::TopLeft), Cell::Occupied(Player::Ai));
}

#[test]
fn test_keyboard_game_never_lost() {
    let mut app = App::new(&AppConfig::default());

    // Press 1-9 in turn; occupied cells are rejected and the next digit tried.
    let keys: Vec<KeyCode> = ('1'..='9').map(KeyCode::Char).collect();
    let mut i = 0;
    while !app.game().query_state().is_over() {
        app.handle_key(keys[i % keys.len()]);
        i += 1;
        assert!(i < 100, "game did not finish");
    }

    assert_ne!(app.game().query_state(), GameStatus::Won(Player::Human));
    assert!(app.status_message().starts_with("Game over"));
}

#[test]
fn test_best_move_report() {
    let board = "X../.O./X..".parse().expect("valid board");
    let report = BestMove::compute(&SearchEngine::default(), &board);
    assert_eq!(report.position, Some(Position::MiddleLeft));
    assert_eq!(report.status, GameStatus::Ongoing);

    let text = report.render(false).expect("render");
    assert!(text.starts_with("AI plays Middle-left (1, 0)"));
}
