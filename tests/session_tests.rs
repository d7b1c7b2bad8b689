//! Turn loop and document tests across all four games.

use board_engines::ai::{MovePolicy, UniformRandom};
use board_engines::core::{Coord, GameRng, Move, MoveError, Outcome, SessionConfig, Side, TurnOutcome};
use board_engines::games::checkers::{Checkers, CheckersAi};
use board_engines::games::g2048::{Direction, Game2048, Game2048State};
use board_engines::games::tictactoe::{TicTacToe, TicTacToeAi, TicTacToeState};
use board_engines::rules::Rules;
use board_engines::session::{play_document, GameDocument, GameKind, MoveRequest, Session};

/// Play random player moves against `session`'s opponent until the game ends.
fn play_out<R: Rules>(session: &mut Session<R>, rng: &mut GameRng, limit: usize) -> (R::State, TurnOutcome) {
    let mut state = session.new_game();
    let mut outcome = TurnOutcome::Continue;
    for _ in 0..limit {
        if outcome.is_terminal() {
            break;
        }
        let mv = UniformRandom
            .choose_move(session.engine(), &state, rng)
            .expect("player has a move while the game is running");
        let report = session.play_turn(&state, &mv).expect("legal move accepted");
        state = report.state;
        outcome = report.outcome;
    }
    (state, outcome)
}

// =============================================================================
// Full Games
// =============================================================================

#[test]
fn test_tictactoe_games_finish() {
    for seed in 0..20 {
        let mut session = Session::new(TicTacToe, SessionConfig::default().with_seed(seed))
            .with_opponent(TicTacToeAi::default());
        let (state, outcome) = play_out(&mut session, &mut GameRng::new(seed + 100), 9);
        assert!(outcome.is_terminal());
        assert_eq!(TurnOutcome::from(state.winner().unwrap()), outcome);
    }
}

#[test]
fn test_checkers_games_stay_consistent() {
    for seed in 0..5 {
        let mut session = Session::new(Checkers, SessionConfig::default().with_seed(seed)).with_opponent(CheckersAi);
        let (state, outcome) = play_out(&mut session, &mut GameRng::new(seed), 200);
        assert!(state.validate().is_ok());
        assert_eq!(outcome.is_terminal(), state.winner().is_some());
        assert!(session.stats().ai_moves > 0);
    }
}

#[test]
fn test_2048_games_finish() {
    let mut session = Session::new(Game2048, SessionConfig::default().with_seed(4));
    let (state, outcome) = play_out(&mut session, &mut GameRng::new(4), 5000);
    assert!(outcome.is_terminal());
    assert_eq!(state.winner().map(TurnOutcome::from), Some(outcome));
    assert_eq!(session.stats().ai_moves, 0);
}

// =============================================================================
// Terminal States
// =============================================================================

/// Top row to the player, opponent to move.
fn won_tictactoe() -> TicTacToeState {
    let p = Some(Side::Player);
    let o = Some(Side::Opponent);
    TicTacToeState::from_owners([p, p, p, o, o, None, None, None, None], Side::Opponent)
}

#[test]
fn test_finished_games_reject_every_move() {
    let mut rng = GameRng::new(1);

    let tictactoe = won_tictactoe();
    for coord in TicTacToe.empty_cells(&tictactoe) {
        for side in Side::BOTH {
            assert_eq!(
                TicTacToe.apply_move(&tictactoe, side, &Move::place(coord), &mut rng),
                Err(MoveError::GameAlreadyOver)
            );
        }
    }

    let stuck = Game2048State::from_rows([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]], 0).unwrap();
    for direction in Direction::ALL {
        assert_eq!(
            Game2048.apply_move(&stuck, Side::Player, &direction, &mut rng),
            Err(MoveError::GameAlreadyOver)
        );
    }
}

#[test]
fn test_play_turn_on_finished_game_counts_rejection() {
    let state = won_tictactoe();
    assert_eq!(state.winner(), Some(Outcome::PlayerWin));

    let mut session = Session::new(TicTacToe, SessionConfig::default());
    assert_eq!(
        session.play_turn(&state, &Move::place(Coord::new(2, 2))),
        Err(MoveError::GameAlreadyOver)
    );
    assert_eq!(session.stats().rejected_moves, 1);
    assert_eq!(session.choose_ai_move(&state), None);
}

// =============================================================================
// Documents
// =============================================================================

#[test]
fn test_document_turns_round_trip() {
    let config = SessionConfig::default();
    let mut rng = GameRng::new(99);
    let mut document = GameDocument::fresh(GameKind::Checkers, &mut rng);

    for _ in 0..10 {
        if document.is_over() {
            break;
        }
        let GameDocument::Checkers(state) = &document else {
            unreachable!("document stays a checkers game");
        };
        let mv = UniformRandom.choose_move(&Checkers, state, &mut rng).unwrap();
        let turn = play_document(&document, &MoveRequest::Checkers(mv), &config, &mut rng).unwrap();

        let json = turn.document.to_json().unwrap();
        let restored = GameDocument::from_json(&json).unwrap();
        assert_eq!(restored, turn.document);
        document = restored;
    }
}

#[test]
fn test_document_2048_turn() {
    let config = SessionConfig::default();
    let mut rng = GameRng::new(12);
    let document = GameDocument::fresh(GameKind::Game2048, &mut rng);
    let GameDocument::Game2048(state) = &document else {
        unreachable!("fresh 2048 document");
    };
    let direction = Game2048.legal_moves(state)[0];

    let turn = play_document(&document, &MoveRequest::Game2048(direction), &config, &mut rng).unwrap();
    assert_eq!(turn.ai_moves, 0);
    assert_eq!(turn.outcome, TurnOutcome::Continue);
    let GameDocument::Game2048(next) = &turn.document else {
        unreachable!("2048 turn keeps the game");
    };
    assert!(next.tile_sum() > state.tile_sum());
}

#[test]
fn test_move_request_json() {
    let request = MoveRequest::Game2048(Direction::Left);
    let json = serde_json::to_string(&request).unwrap();
    assert_eq!(json, r#"{"game":"2048","move":"Left"}"#);
    assert_eq!(serde_json::from_str::<MoveRequest>(&json).unwrap(), request);

    assert!(serde_json::from_str::<MoveRequest>(r#"{"game":"chess","move":"Left"}"#).is_err());
}

#[test]
fn test_wrong_game_request_rejected() {
    let mut rng = GameRng::new(3);
    let document = GameDocument::fresh(GameKind::TicTacToe, &mut rng);
    let err = play_document(
        &document,
        &MoveRequest::Game2048(Direction::Up),
        &SessionConfig::default(),
        &mut rng,
    )
    .unwrap_err();
    assert!(matches!(err, MoveError::IllegalMove(_)));
}

#[test]
fn test_load_or_fresh_recovers() {
    let mut rng = GameRng::new(6);
    let fresh = GameDocument::load_or_fresh("{not json", GameKind::Erudite, &mut rng);
    assert_eq!(fresh.kind(), GameKind::Erudite);
    assert!(fresh.validate().is_ok());

    let stored = GameDocument::fresh(GameKind::TicTacToe, &mut rng).to_json().unwrap();
    let loaded = GameDocument::load_or_fresh(&stored, GameKind::TicTacToe, &mut rng);
    assert_eq!(loaded.to_json().unwrap(), stored);

    let other = GameDocument::load_or_fresh(&stored, GameKind::Checkers, &mut rng);
    assert_eq!(other.kind(), GameKind::Checkers);
}
