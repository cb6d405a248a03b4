//! Battle error taxonomy.
//!
//! Every rejected action leaves the battle exactly as it was. Illegal
//! actions come back to the decision provider that requested them; the
//! engine never partially applies a request.

use thiserror::Error;

use super::side::Side;
use crate::battle::{BattlePhase, CritterTag};

#[derive(Error, Debug)]
pub enum BattleError {
    #[error("battle is already over")]
    BattleOver,

    #[error("{action} is not legal during the {phase} phase")]
    WrongPhase { action: &'static str, phase: BattlePhase },

    #[error("{side} may not act now; the {active} is active")]
    NotActiveSide { side: Side, active: Side },

    #[error("a decision is pending and must be answered first")]
    DecisionPending,

    #[error("no decision of that kind is pending")]
    NoDecisionPending,

    #[error("no critter with tag {0}")]
    UnknownCritter(CritterTag),

    #[error("no hex labelled {0:?} on this board")]
    UnknownHex(String),

    #[error("two critters start on {0}")]
    HexOccupied(String),

    #[error("unknown creature type {0:?}")]
    UnknownCreature(String),

    #[error("creature {0:?} cannot be summoned")]
    NotSummonable(String),

    #[error("no {0:?} left in the caretaker's stock")]
    OutOfStock(String),

    #[error("critter {tag} does not belong to the {side}")]
    NotOwnCritter { tag: CritterTag, side: Side },

    #[error("critter {tag} cannot move to {hex}")]
    IllegalMove { tag: CritterTag, hex: String },

    #[error("critter {tag} cannot strike {hex}")]
    IllegalStrike { tag: CritterTag, hex: String },

    #[error("critter {0} has already struck this turn")]
    AlreadyStruck(CritterTag),

    #[error("critter {tag} tried to strike an allied critter in {hex}")]
    AlliedTarget { tag: CritterTag, hex: String },

    #[error("forced strikes remain unresolved")]
    ForcedStrikesRemain,

    #[error("no carry damage is pending")]
    NoCarryPending,

    #[error("{0} is not an eligible carry target")]
    IllegalCarry(String),

    #[error("no strike penalty choice is pending")]
    NoPenaltyPending,

    #[error("penalty option {index} does not exist ({count} offered)")]
    UnknownPenaltyOption { index: usize, count: usize },

    #[error("battle did not finish within {0} steps")]
    Stalled(usize),

    #[error("snapshot encoding failed: {0}")]
    Snapshot(#[from] bincode::Error),
}

pub type Result<T> = std::result::Result<T, BattleError>;
