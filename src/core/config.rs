//! Engine configuration types.
//!
//! - `Difficulty`: Tic-tac-toe opponent tier
//! - `AiConfig`: Knobs for the built-in opponents
//! - `SessionConfig`: Seed, pacing, and safety limits for the turn loop
//!
//! All configs are plain serde values with `Default` and `with_*` builders,
//! so callers can load them from whatever settings source they use.

use serde::{Deserialize, Serialize};

/// Opponent strength for tic-tac-toe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    /// Uniformly random legal move.
    Easy,
    /// Win, block, then take strategic squares.
    #[default]
    Medium,
    /// Exhaustive minimax; never loses.
    Hard,
}

/// Built-in opponent configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Tic-tac-toe opponent tier.
    pub difficulty: Difficulty,

    /// Probability of taking a free centre square in medium tic-tac-toe.
    pub center_weight: f64,

    /// Longest run of new tiles the Erudite opponent tries per turn.
    /// Search cost grows steeply with this value.
    pub erudite_max_tiles: usize,

    /// Letter the Erudite opponent assigns to a blank tile.
    pub blank_face: char,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            center_weight: 0.7,
            erudite_max_tiles: 3,
            blank_face: 'E',
        }
    }
}

impl AiConfig {
    /// Set the tic-tac-toe tier.
    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Set the Erudite search width.
    #[must_use]
    pub fn with_erudite_max_tiles(mut self, tiles: usize) -> Self {
        self.erudite_max_tiles = tiles.clamp(1, 7);
        self
    }
}

/// Turn loop configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Seed for every random choice in the session.
    pub seed: u64,

    /// Pause handed to the pacer before each AI move (milliseconds).
    pub think_delay_ms: u64,

    /// Upper bound on AI moves applied for one player move.
    /// A capture chain on an 8x8 board is far shorter than this.
    pub max_chain_steps: u32,

    /// Opponent configuration.
    pub ai: AiConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            think_delay_ms: 0,
            max_chain_steps: 32,
            ai: AiConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Set the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the thinking pause.
    #[must_use]
    pub fn with_think_delay_ms(mut self, ms: u64) -> Self {
        self.think_delay_ms = ms;
        self
    }

    /// Set the opponent configuration.
    #[must_use]
    pub fn with_ai(mut self, ai: AiConfig) -> Self {
        self.ai = ai;
        self
    }

    /// Shorthand for setting the tic-tac-toe tier.
    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.ai.difficulty = difficulty;
        self
    }
}
