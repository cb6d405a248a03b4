//! Battle events and the final outcome reported to the enclosing game.

use serde::{Deserialize, Serialize};

use super::critter::CritterTag;
use super::phase::{BattlePhase, SummonOption};
use super::strike::StrikeReport;
use crate::core::{Side, SideMap};
use crate::terrain::HexId;

/// Something the enclosing game or a log may want to know about.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleEvent {
    PhaseStarted {
        phase: BattlePhase,
        active: Side,
        turn: u32,
    },
    CritterMoved {
        tag: CritterTag,
        from: HexId,
        to: HexId,
    },
    MoveUndone {
        tag: CritterTag,
        to: HexId,
    },
    Strike(StrikeReport),
    Carry {
        target: CritterTag,
        hits: u8,
        remaining: u8,
    },
    HexDamage {
        tag: CritterTag,
        hex: HexId,
        damage: u8,
    },
    CritterKilled {
        tag: CritterTag,
        creature: String,
        side: Side,
        hex: HexId,
    },
    FirstBlood,
    SummonAvailable {
        options: Vec<SummonOption>,
    },
    AngelSummoned {
        tag: CritterTag,
        option: SummonOption,
    },
    AngelReturned {
        option: SummonOption,
    },
    ReinforcementAvailable {
        options: Vec<String>,
    },
    ReinforcementRecruited {
        tag: CritterTag,
        creature: String,
    },
    ReinforcementUnwound {
        creature: String,
    },
    Conceded {
        side: Side,
    },
    PointsAwarded {
        side: Side,
        points: u32,
    },
    LegionEliminated {
        side: Side,
        marker: String,
    },
    PlayerEliminated {
        player: String,
        slayer: Option<String>,
    },
    TimeLoss,
    BattleOver {
        winner: Option<Side>,
    },
}

/// A player knocked out of the game by this battle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerElimination {
    pub player: String,
    /// Who gets the Titan kill; `None` when both Titans fell.
    pub slayer: Option<String>,
}

/// How a battle ended.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleOutcome {
    /// The side whose legion survives, if exactly one does.
    pub winner: Option<Side>,
    /// Markers of every legion removed from the game.
    pub eliminated_legions: Vec<String>,
    /// Points added to each side's score.
    pub points: SideMap<u32>,
    pub eliminated_players: Vec<PlayerElimination>,
    pub time_loss: bool,
    pub attacker_entered: bool,
    /// Turn on which the battle ended.
    pub turn: u32,
}

impl BattleOutcome {
    #[must_use]
    pub fn is_winner(&self, side: Side) -> bool {
        self.winner == Some(side)
    }

    #[must_use]
    pub fn is_player_eliminated(&self, player: &str) -> bool {
        self.eliminated_players.iter().any(|e| e.player == player)
    }
}
