//! Tic-tac-toe integration tests.

use board_engines::core::{Coord, Difficulty, GameRng, Move, MoveError, Outcome, Side};
use board_engines::games::tictactoe::{TicTacToe, TicTacToeAi, TicTacToeState};
use board_engines::rules::Rules;
use board_engines::session::GameDocument;

const X: Option<Side> = Some(Side::Player);
const O: Option<Side> = Some(Side::Opponent);

fn at(index: usize) -> Coord {
    Coord::from_index(index, 3)
}

// =============================================================================
// Rules
// =============================================================================

#[test]
fn test_completing_top_row_wins() {
    let state = TicTacToeState::from_owners([X, X, None, O, O, None, None, None, None], Side::Player);
    let next = TicTacToe.place(&state, Side::Player, at(2)).unwrap();
    assert_eq!(next.winner(), Some(Outcome::PlayerWin));
    assert!(TicTacToe.legal_moves(&next).is_empty());
}

#[test]
fn test_full_board_without_line_is_draw() {
    // X O X / X O O / O X _
    let state = TicTacToeState::from_owners([X, O, X, X, O, O, O, X, None], Side::Player);
    let next = TicTacToe.place(&state, Side::Player, at(8)).unwrap();
    assert_eq!(next.winner(), Some(Outcome::Draw));
}

#[test]
fn test_move_errors() {
    let state = TicTacToeState::new();
    assert_eq!(
        TicTacToe.place(&state, Side::Opponent, at(0)),
        Err(MoveError::NotCurrentPlayersTurn(Side::Opponent))
    );
    assert_eq!(
        TicTacToe.place(&state, Side::Player, Coord::new(3, 0)),
        Err(MoveError::OutOfBounds(Coord::new(3, 0)))
    );

    let next = TicTacToe.place(&state, Side::Player, at(4)).unwrap();
    assert_eq!(
        TicTacToe.place(&next, Side::Opponent, at(4)),
        Err(MoveError::CellOccupied(at(4)))
    );
}

#[test]
fn test_moving_a_mark_is_illegal() {
    let state = TicTacToeState::new();
    let mv = Move::step(at(0), at(1));
    let err = TicTacToe
        .apply_move(&state, Side::Player, &mv, &mut GameRng::new(0))
        .unwrap_err();
    assert!(matches!(err, MoveError::IllegalMove(_)));
}

#[test]
fn test_rejected_move_leaves_state() {
    let state = TicTacToe.place(&TicTacToeState::new(), Side::Player, at(0)).unwrap();
    let before = state.clone();
    let _ = TicTacToe.place(&state, Side::Opponent, at(0));
    assert_eq!(state, before);
}

// =============================================================================
// Hard AI
// =============================================================================

/// Walk every player line against the hard AI, collecting final results.
fn explore(state: &TicTacToeState, ai: &TicTacToeAi, results: &mut Vec<Outcome>) {
    for coord in TicTacToe.empty_cells(state) {
        let after_player = TicTacToe.place(state, Side::Player, coord).unwrap();
        if let Some(outcome) = after_player.winner() {
            results.push(outcome);
            continue;
        }
        let reply = ai.choose_cell(&after_player, &mut GameRng::new(0)).unwrap();
        let after_ai = TicTacToe.place(&after_player, Side::Opponent, reply).unwrap();
        match after_ai.winner() {
            Some(outcome) => results.push(outcome),
            None => explore(&after_ai, ai, results),
        }
    }
}

#[test]
fn test_hard_ai_never_loses() {
    let ai = TicTacToeAi::with_difficulty(Difficulty::Hard);
    let mut results = Vec::new();
    explore(&TicTacToeState::new(), &ai, &mut results);

    assert!(!results.is_empty());
    assert!(
        results.iter().all(|o| *o != Outcome::PlayerWin),
        "hard AI lost {} of {} games",
        results.iter().filter(|o| **o == Outcome::PlayerWin).count(),
        results.len()
    );
    assert!(results.contains(&Outcome::OpponentWin));
}

#[test]
fn test_easy_ai_picks_empty_square() {
    let ai = TicTacToeAi::with_difficulty(Difficulty::Easy);
    let state = TicTacToeState::from_owners([X, O, X, None, O, X, None, None, None], Side::Opponent);
    for seed in 0..20 {
        let cell = ai.choose_cell(&state, &mut GameRng::new(seed)).unwrap();
        assert!(state.owners()[cell.index(3)].is_none());
    }
}

// =============================================================================
// Persistence
// =============================================================================

#[test]
fn test_document_round_trip() {
    let state = TicTacToeState::from_owners([X, None, None, None, O, None, None, None, X], Side::Opponent);
    let document = GameDocument::TicTacToe(state);
    let json = document.to_json().unwrap();
    assert_eq!(GameDocument::from_json(&json).unwrap(), document);
}

#[test]
fn test_unreachable_counts_rejected() {
    let json = r#"{"game":"tic_tac_toe","state":{"board":[[{"Occupied":["Opponent",null]},"Empty","Empty"],["Empty","Empty","Empty"],["Empty","Empty","Empty"]],"current_player":"Player","winner":null}}"#;
    assert!(GameDocument::from_json(json).is_err());
}

#[test]
fn test_wrong_side_to_move_rejected() {
    let json = r#"{"game":"tic_tac_toe","state":{"board":[["Empty","Empty","Empty"],["Empty","Empty","Empty"],["Empty","Empty","Empty"]],"current_player":"Opponent","winner":null}}"#;
    assert!(GameDocument::from_json(json).is_err());
}

#[test]
fn test_unknown_field_rejected() {
    let json = r#"{"game":"tic_tac_toe","state":{"board":[["Empty","Empty","Empty"],["Empty","Empty","Empty"],["Empty","Empty","Empty"]],"current_player":"Player","winner":null,"difficulty":"hard"}}"#;
    assert!(GameDocument::from_json(json).is_err());

    let valid = json.replace(r#","difficulty":"hard""#, "");
    assert!(GameDocument::from_json(&valid).is_ok());
}

#[test]
fn test_wrong_shape_rejected() {
    let json = r#"{"game":"tic_tac_toe","state":{"board":[["Empty","Empty"],["Empty","Empty"]],"current_player":"Player","winner":null}}"#;
    assert!(GameDocument::from_json(json).is_err());
}
