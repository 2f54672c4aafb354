//! Scenario tests for the game protocol.

use unbeatable_tictactoe::{
    Board, Cell, Game, GameStatus, MoveError, Outcome, Phase, Player, Position, SearchEngine,
};

fn board(s: &str) -> Board {
    s.parse().expect("valid board")
}

#[test]
fn test_ai_first_opens_top_left() {
    let mut game = Game::new(Player::Ai, SearchEngine::default());
    let pos = game.play_ai_turn().expect("AI opens");
    assert_eq!(pos, Position::TopLeft);
    assert_eq!(pos.coords(), (0, 0));
    assert_eq!(game.board().cell_at(0, 0), Cell::Occupied(Player::Ai));
}

#[test]
fn test_ai_takes_the_win() {
    // [[AI, AI, _], [H, H, _], [_, _, _]]
    let mut b = board("OO./XX./...");
    let pos = SearchEngine::default().choose_and_apply_move(&mut b);
    assert_eq!(pos.map(Position::coords), Some((0, 2)));

    let game = Game::from_board(b, Player::Human, SearchEngine::default());
    assert_eq!(game.query_state(), GameStatus::Won(Player::Ai));
}

#[test]
fn test_occupied_cell_is_rejected() {
    let mut game = Game::new(Player::Ai, SearchEngine::default());
    game.play_ai_turn().expect("AI opens");
    let before = game.board().clone();

    let result = game.apply_human_move(Position::TopLeft);

    assert!(matches!(result, Err(MoveError::CellOccupied(Position::TopLeft))));
    assert_eq!(game.board(), &before);
    assert_eq!(game.phase(), Phase::AwaitingHuman);
}

#[test]
fn test_full_board_without_line_is_draw() {
    let game = Game::from_board(board("XOX/XOO/OXX"), Player::Ai, SearchEngine::default());
    assert_eq!(game.query_state(), GameStatus::Draw);
    assert_eq!(game.phase(), Phase::GameOver(Outcome::Draw));
}

#[test]
fn test_human_fork_attempt_is_defused() {
    // Human opens in a corner, then takes the opposite corner.
    let mut game = Game::new(Player::Human, SearchEngine::default());
    let first = game.play_human_turn(Position::TopLeft).expect("legal");
    assert_eq!(*first.ai(), Some(Position::Center));

    let second = game.play_human_turn(Position::BottomRight).expect("legal");
    let reply = second.ai().expect("game continues");
    // A corner reply here loses to a fork; the engine must take an edge.
    assert!(matches!(
        reply,
        Position::TopCenter | Position::MiddleLeft | Position::MiddleRight | Position::BottomCenter
    ));
}

#[test]
fn test_full_game_and_reset() {
    let mut game = Game::new(Player::Human, SearchEngine::default());

    // Keep playing the first empty cell until the game ends.
    while !game.query_state().is_over() {
        let pos = game.board().empty_positions().next().expect("ongoing game");
        game.play_human_turn(pos).expect("legal move");
    }
    assert_ne!(game.query_state(), GameStatus::Won(Player::Human));
    assert_eq!(game.play_ai_turn(), Err(MoveError::GameOver));

    game.reset();
    assert_eq!(game.board(), &Board::new());
    assert_eq!(game.phase(), Phase::AwaitingHuman);
    assert_eq!(game.query_state(), GameStatus::Ongoing);
}

#[test]
fn test_independent_games_do_not_share_state() {
    let mut a = Game::new(Player::Human, SearchEngine::default());
    let b = Game::new(Player::Human, SearchEngine::default());
    a.play_human_turn(Position::Center).expect("legal");
    assert_eq!(b.board(), &Board::new());
}
