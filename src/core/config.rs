//! Battle configuration parameters.

use serde::{Deserialize, Serialize};

/// Battle configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleConfig {
    /// Last battle turn. When the defender's half of this turn ends with
    /// both legions alive, the attacker loses on time.
    pub max_turns: u32,

    /// The only battle turn on which the defender may muster a
    /// reinforcement.
    pub reinforcement_turn: u32,

    /// Titan power used when the owning player's score does not set one.
    pub default_titan_power: u8,

    /// Pass straight through a Move phase with nothing to move and a
    /// Fight or Strikeback phase with nothing to strike.
    pub skip_empty_phases: bool,

    /// Resolve single-target forced strikes as soon as a Fight or
    /// Strikeback phase begins.
    pub auto_forced_strikes: bool,

    /// Seed for the default die source.
    pub seed: u64,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            max_turns: 7,
            reinforcement_turn: 4,
            default_titan_power: 6,
            skip_empty_phases: true,
            auto_forced_strikes: false,
            seed: 42,
        }
    }
}

impl BattleConfig {
    /// Set the last battle turn.
    #[must_use]
    pub fn with_max_turns(mut self, turns: u32) -> Self {
        self.max_turns = turns;
        self
    }

    /// Set the reinforcement turn.
    #[must_use]
    pub fn with_reinforcement_turn(mut self, turn: u32) -> Self {
        self.reinforcement_turn = turn;
        self
    }

    /// Set the default Titan power.
    #[must_use]
    pub fn with_default_titan_power(mut self, power: u8) -> Self {
        self.default_titan_power = power;
        self
    }

    /// Enable or disable empty-phase skipping.
    #[must_use]
    pub fn with_skip_empty_phases(mut self, skip: bool) -> Self {
        self.skip_empty_phases = skip;
        self
    }

    /// Enable or disable automatic forced strikes.
    #[must_use]
    pub fn with_auto_forced_strikes(mut self, auto: bool) -> Self {
        self.auto_forced_strikes = auto;
        self
    }

    /// Set the die seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
