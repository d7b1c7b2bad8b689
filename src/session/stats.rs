//! Turn loop counters for diagnostics.

use serde::{Deserialize, Serialize};

/// Counters collected by a `Session` across turns.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnStats {
    /// Player turns completed.
    pub turns: u32,

    /// Player moves accepted.
    pub player_moves: u32,

    /// Player moves rejected by the engine.
    pub rejected_moves: u32,

    /// AI moves applied.
    pub ai_moves: u32,

    /// Most AI moves applied in response to one player move.
    pub longest_response: u16,

    /// Total time spent in turns (microseconds), pauses included.
    pub time_us: u64,
}

impl TurnStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all counters to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Average AI moves per completed turn.
    #[must_use]
    pub fn ai_moves_per_turn(&self) -> f64 {
        if self.turns == 0 {
            0.0
        } else {
            f64::from(self.ai_moves) / f64::from(self.turns)
        }
    }

    /// Share of submitted player moves that were rejected.
    #[must_use]
    pub fn rejection_rate(&self) -> f64 {
        let submitted = self.player_moves + self.rejected_moves;
        if submitted == 0 {
            0.0
        } else {
            f64::from(self.rejected_moves) / f64::from(submitted)
        }
    }
}
