//! The turn loop.
//!
//! One player move goes in; the engine applies it, then the opponent
//! answers for as long as it holds the turn. A checkers capture chain is
//! therefore answered in full before control comes back, and a player chain
//! in progress comes back as `MustContinueCapture` with no AI move made.

use std::time::{Duration, Instant};

use tracing::{debug, instrument, warn};

use super::pacer::{NoPause, Pacer};
use super::stats::TurnStats;
use crate::ai::{MovePolicy, UniformRandom};
use crate::core::{GameRng, GameRngState, MoveError, SessionConfig, Side, TurnOutcome};
use crate::rules::Rules;

/// Result of one player turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnReport<S, M> {
    /// State after the player's move and every AI reply.
    pub state: S,
    /// Verdict from the player's point of view.
    pub outcome: TurnOutcome,
    /// AI moves applied, in order.
    pub ai_moves: Vec<M>,
}

/// Drives one game engine against one opponent policy.
///
/// Generic over the rules engine. Owns the RNG so a whole session replays
/// from `SessionConfig::seed`.
pub struct Session<R: Rules> {
    /// The game rules engine.
    engine: R,

    /// Loop configuration.
    config: SessionConfig,

    /// The AI side.
    opponent: Box<dyn MovePolicy<R>>,

    /// Waits before AI moves.
    pacer: Box<dyn Pacer>,

    /// Every random choice in the session.
    rng: GameRng,

    /// Counters.
    stats: TurnStats,
}

impl<R: Rules> Session<R> {
    /// Create a session with a uniformly random opponent.
    pub fn new(engine: R, config: SessionConfig) -> Self {
        let rng = GameRng::new(config.seed);
        Self {
            engine,
            config,
            opponent: Box::new(UniformRandom),
            pacer: Box::new(NoPause),
            rng,
            stats: TurnStats::default(),
        }
    }

    /// Set the opponent.
    pub fn with_opponent<P: MovePolicy<R> + 'static>(mut self, opponent: P) -> Self {
        self.opponent = Box::new(opponent);
        self
    }

    /// Set the pacer.
    pub fn with_pacer<P: Pacer + 'static>(mut self, pacer: P) -> Self {
        self.pacer = Box::new(pacer);
        self
    }

    /// Resume a random stream saved with `rng_state`.
    pub fn with_rng_state(mut self, state: &GameRngState) -> Self {
        self.rng = GameRng::from_state(state);
        self
    }

    /// The engine.
    pub fn engine(&self) -> &R {
        &self.engine
    }

    /// The configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Counters so far.
    pub fn stats(&self) -> &TurnStats {
        &self.stats
    }

    /// Position of the random stream, for persisting alongside the game.
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    /// Start a game.
    pub fn new_game(&mut self) -> R::State {
        self.engine.new_game(&mut self.rng)
    }

    /// Apply one player move without letting the opponent answer.
    ///
    /// # Errors
    ///
    /// Whatever the engine rejects the move with.
    pub fn apply_player_move(&mut self, state: &R::State, mv: &R::Move) -> Result<R::State, MoveError> {
        self.engine.apply_move(state, Side::Player, mv, &mut self.rng)
    }

    /// The move the opponent would make, if it is its turn.
    pub fn choose_ai_move(&mut self, state: &R::State) -> Option<R::Move> {
        if self.engine.check_turn(state, Side::Opponent).is_err() {
            return None;
        }
        self.opponent.choose_move(&self.engine, state, &mut self.rng)
    }

    /// Let the opponent make exactly one move.
    ///
    /// # Errors
    ///
    /// `GameAlreadyOver` once the game has ended, `NotCurrentPlayersTurn`
    /// when the player holds the turn, and `IllegalMove` when the opponent
    /// has nothing to play.
    pub fn apply_ai_move(&mut self, state: &R::State) -> Result<(R::State, R::Move), MoveError> {
        self.engine.check_turn(state, Side::Opponent)?;
        let mv = self
            .opponent
            .choose_move(&self.engine, state, &mut self.rng)
            .ok_or_else(|| MoveError::illegal("opponent has no move"))?;
        let next = self.engine.apply_move(state, Side::Opponent, &mv, &mut self.rng)?;
        Ok((next, mv))
    }

    /// Apply the player's move, then let the opponent answer.
    ///
    /// # Errors
    ///
    /// The engine's rejection of the player's move, or any error from
    /// `respond`. The caller's state is untouched in either case.
    #[instrument(skip(self, state, mv))]
    pub fn play_turn(
        &mut self,
        state: &R::State,
        mv: &R::Move,
    ) -> Result<TurnReport<R::State, R::Move>, MoveError> {
        let start = Instant::now();
        let next = match self.apply_player_move(state, mv) {
            Ok(next) => next,
            Err(err) => {
                self.stats.rejected_moves += 1;
                debug!(%err, ?mv, "player move rejected");
                return Err(err);
            }
        };
        self.stats.player_moves += 1;

        let report = self.respond(next)?;
        self.stats.turns += 1;
        self.stats.time_us += start.elapsed().as_micros() as u64;
        debug!(outcome = ?report.outcome, ai_moves = report.ai_moves.len(), "turn complete");
        Ok(report)
    }

    /// Let the opponent move for as long as it holds the turn.
    ///
    /// A turn is never handed back half-finished: the report either has
    /// the player to move or a finished game.
    ///
    /// # Errors
    ///
    /// An engine rejection of an opponent move, or `IllegalMove` when the
    /// opponent has no move or would exceed `max_chain_steps`.
    pub fn respond(&mut self, mut state: R::State) -> Result<TurnReport<R::State, R::Move>, MoveError> {
        let delay = Duration::from_millis(self.config.think_delay_ms);
        let mut ai_moves = Vec::new();

        while self.engine.outcome(&state).is_none() && self.engine.side_to_move(&state) == Side::Opponent {
            if ai_moves.len() >= self.config.max_chain_steps as usize {
                warn!(steps = ai_moves.len(), "opponent step limit reached");
                return Err(MoveError::illegal(format!(
                    "opponent step limit of {} reached mid-turn",
                    self.config.max_chain_steps
                )));
            }
            self.pacer.pause(delay);
            let Some(mv) = self.opponent.choose_move(&self.engine, &state, &mut self.rng) else {
                warn!("opponent has no move on its turn");
                return Err(MoveError::illegal("opponent has no move"));
            };
            state = self.engine.apply_move(&state, Side::Opponent, &mv, &mut self.rng)?;
            debug!(?mv, "opponent moved");
            ai_moves.push(mv);
        }

        self.stats.ai_moves += ai_moves.len() as u32;
        self.stats.longest_response = self.stats.longest_response.max(ai_moves.len() as u16);
        let outcome = self.verdict(&state);
        Ok(TurnReport {
            state,
            outcome,
            ai_moves,
        })
    }

    /// Verdict for `state` from the player's point of view.
    pub fn verdict(&self, state: &R::State) -> TurnOutcome {
        if let Some(outcome) = self.engine.outcome(state) {
            return outcome.into();
        }
        if self.engine.side_to_move(state) == Side::Player && self.engine.must_continue(state) {
            TurnOutcome::MustContinueCapture
        } else {
            TurnOutcome::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::core::{Coord, Move, Outcome};
    use crate::games::checkers::{Checkers, CheckersAi, CheckersState, Rank};
    use crate::games::g2048::{Direction, Game2048, Game2048State};
    use crate::games::tictactoe::{TicTacToe, TicTacToeAi, TicTacToeState};

    struct CountingPacer(Arc<AtomicUsize>);

    impl Pacer for CountingPacer {
        fn pause(&self, _delay: Duration) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn c(row: usize, col: usize) -> Coord {
        Coord::new(row, col)
    }

    #[test]
    fn test_tictactoe_turn_gets_reply() {
        let mut session = Session::new(TicTacToe, SessionConfig::default()).with_opponent(TicTacToeAi::default());
        let state = TicTacToeState::new();
        let report = session.play_turn(&state, &Move::place(c(1, 1))).unwrap();
        assert_eq!(report.outcome, TurnOutcome::Continue);
        assert_eq!(report.ai_moves.len(), 1);
        assert_eq!(report.state.current_player(), Side::Player);
        assert_eq!(session.stats().turns, 1);
    }

    #[test]
    fn test_winning_move_ends_turn() {
        let p = Some(Side::Player);
        let o = Some(Side::Opponent);
        let state = TicTacToeState::from_owners([p, p, None, o, o, None, None, None, None], Side::Player);
        let mut session = Session::new(TicTacToe, SessionConfig::default());
        let report = session.play_turn(&state, &Move::place(c(0, 2))).unwrap();
        assert_eq!(report.outcome, TurnOutcome::PlayerWin);
        assert!(report.ai_moves.is_empty());
    }

    #[test]
    fn test_rejected_move_counted() {
        let mut session = Session::new(TicTacToe, SessionConfig::default());
        let state = TicTacToeState::new();
        let after = session.play_turn(&state, &Move::place(c(0, 0))).unwrap().state;
        let err = session.play_turn(&after, &Move::place(c(0, 0))).unwrap_err();
        assert_eq!(err, MoveError::CellOccupied(c(0, 0)));
        assert_eq!(session.stats().rejected_moves, 1);
    }

    #[test]
    fn test_player_chain_returns_without_reply() {
        let state = CheckersState::from_pieces(
            &[
                (c(5, 0), Side::Player, Rank::Man),
                (c(4, 1), Side::Opponent, Rank::Man),
                (c(2, 3), Side::Opponent, Rank::Man),
                (c(0, 7), Side::Opponent, Rank::Man),
            ],
            Side::Player,
        )
        .unwrap();
        let pauses = Arc::new(AtomicUsize::new(0));
        let mut session = Session::new(Checkers, SessionConfig::default())
            .with_opponent(CheckersAi)
            .with_pacer(CountingPacer(pauses.clone()));

        let report = session
            .play_turn(&state, &Move::jump(c(5, 0), c(4, 1), c(3, 2)))
            .unwrap();
        assert_eq!(report.outcome, TurnOutcome::MustContinueCapture);
        assert!(report.ai_moves.is_empty());
        assert_eq!(pauses.load(Ordering::SeqCst), 0);

        let report = session
            .play_turn(&report.state, &Move::jump(c(3, 2), c(2, 3), c(1, 4)))
            .unwrap();
        assert_eq!(report.ai_moves.len(), 1);
        assert_eq!(pauses.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_opponent_chain_played_in_full() {
        // The player's step walks into a double jump
        let state = CheckersState::from_pieces(
            &[
                (c(2, 1), Side::Opponent, Rank::Man),
                (c(4, 3), Side::Player, Rank::Man),
                (c(5, 4), Side::Player, Rank::Man),
                (c(7, 0), Side::Player, Rank::Man),
            ],
            Side::Player,
        )
        .unwrap();
        let mut session = Session::new(Checkers, SessionConfig::default()).with_opponent(CheckersAi);
        let report = session.play_turn(&state, &Move::step(c(4, 3), c(3, 2))).unwrap();
        assert_eq!(
            report.ai_moves,
            vec![
                Move::jump(c(2, 1), c(3, 2), c(4, 3)),
                Move::jump(c(4, 3), c(5, 4), c(6, 5)),
            ]
        );
        assert_eq!(report.outcome, TurnOutcome::Continue);
        assert_eq!(report.state.current_player(), Side::Player);
        assert_eq!(session.stats().longest_response, 2);
    }

    #[test]
    fn test_2048_never_hands_over() {
        let mut session = Session::new(Game2048, SessionConfig::default());
        let state = Game2048State::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]], 0).unwrap();
        let report = session.play_turn(&state, &Direction::Left).unwrap();
        assert_eq!(report.outcome, TurnOutcome::Continue);
        assert!(report.ai_moves.is_empty());
        assert_eq!(report.state.score(), 4);
    }

    #[test]
    fn test_finished_game_is_frozen() {
        let p = Some(Side::Player);
        let o = Some(Side::Opponent);
        let state = TicTacToeState::from_owners([p, p, p, o, o, None, None, None, None], Side::Opponent);
        assert_eq!(state.winner(), Some(Outcome::PlayerWin));

        let mut session = Session::new(TicTacToe, SessionConfig::default());
        assert_eq!(
            session.play_turn(&state, &Move::place(c(2, 2))),
            Err(MoveError::GameAlreadyOver)
        );
        assert_eq!(session.apply_ai_move(&state).map(|_| ()), Err(MoveError::GameAlreadyOver));
        assert!(session.choose_ai_move(&state).is_none());
    }

    #[test]
    fn test_ai_move_out_of_turn() {
        let mut session = Session::new(TicTacToe, SessionConfig::default());
        let state = TicTacToeState::new();
        assert_eq!(
            session.apply_ai_move(&state).map(|_| ()),
            Err(MoveError::NotCurrentPlayersTurn(Side::Opponent))
        );
    }

    #[test]
    fn test_step_limit() {
        let config = SessionConfig {
            max_chain_steps: 0,
            ..SessionConfig::default()
        };
        let mut session = Session::new(TicTacToe, config);
        let err = session
            .play_turn(&TicTacToeState::new(), &Move::place(c(0, 0)))
            .unwrap_err();
        assert!(matches!(err, MoveError::IllegalMove(_)));
        assert_eq!(session.stats().turns, 0);
    }

    #[test]
    fn test_same_seed_same_game() {
        let play = |seed: u64| {
            let mut session =
                Session::new(TicTacToe, SessionConfig::default().with_seed(seed)).with_opponent(TicTacToeAi::default());
            let mut state = session.new_game();
            let mut replies = Vec::new();
            for index in [4, 0, 8, 2, 6, 1, 3, 5, 7] {
                match session.play_turn(&state, &Move::place(Coord::from_index(index, 3))) {
                    Ok(report) => {
                        replies.extend(report.ai_moves);
                        state = report.state;
                    }
                    Err(_) => continue,
                }
            }
            replies
        };
        assert_eq!(play(3), play(3));
    }

    #[test]
    fn test_rng_state_resumes() {
        let mut session = Session::new(Game2048, SessionConfig::default());
        let state = session.new_game();
        let saved = session.rng_state();
        let a = session.play_turn(&state, &Direction::Down);
        let mut resumed = Session::new(Game2048, SessionConfig::default()).with_rng_state(&saved);
        let b = resumed.play_turn(&state, &Direction::Down);
        assert_eq!(a, b);
    }
}
