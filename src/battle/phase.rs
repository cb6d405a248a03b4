//! Battle phases and the decisions a battle can pause on.
//!
//! ## Turn order
//!
//! A battle turn has two halves. The defender moves first:
//!
//! ```text
//! Recruit (defender) -> Move -> Fight -> Strikeback (attacker strikes back)
//! Summon  (attacker) -> Move -> Fight -> Strikeback (defender strikes back)
//! ```
//!
//! The turn number increments when the defender's Recruit phase begins.

use serde::{Deserialize, Serialize};

use super::carry::PenaltyOption;
use super::critter::CritterTag;

/// Current battle phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattlePhase {
    Summon,
    Recruit,
    Move,
    Fight,
    Strikeback,
}

impl BattlePhase {
    /// Fight and Strikeback both resolve strikes.
    #[must_use]
    pub const fn is_fight_phase(self) -> bool {
        matches!(self, BattlePhase::Fight | BattlePhase::Strikeback)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            BattlePhase::Summon => "Summon",
            BattlePhase::Recruit => "Recruit",
            BattlePhase::Move => "Move",
            BattlePhase::Fight => "Fight",
            BattlePhase::Strikeback => "Strikeback",
        }
    }
}

impl std::fmt::Display for BattlePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Progress toward the attacker's single angel summon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SummonState {
    /// No defender has died on the board yet.
    NoKills,
    /// A defender died; the next Summon phase may offer an angel.
    FirstBlood,
    /// The chance has passed, used or not.
    TooLate,
}

/// An angel or archangel the attacker may call in from another legion.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SummonOption {
    pub creature: String,
    /// Marker of the legion that gives up the creature.
    pub donor: String,
}

impl SummonOption {
    pub fn new(creature: impl Into<String>, donor: impl Into<String>) -> Self {
        Self {
            creature: creature.into(),
            donor: donor.into(),
        }
    }
}

/// A decision the battle is waiting on.
///
/// While one is pending, every other mutating call is rejected with
/// `BattleError::DecisionPending`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PendingDecision {
    /// The attacker may summon one of these, or decline.
    Summon { options: Vec<SummonOption> },
    /// The defender may muster one of these creatures, or decline.
    Reinforcement { options: Vec<String> },
    /// The striker must pick how to trade strike quality for carries.
    StrikePenalty {
        striker: CritterTag,
        target: CritterTag,
        options: Vec<PenaltyOption>,
    },
}
