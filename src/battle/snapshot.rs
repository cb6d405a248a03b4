//! Save and restore of a battle's full state.
//!
//! A `BattleSnapshot` holds plain data only: the board is recorded by its
//! master terrain and rebuilt on restore, and the creature catalog is
//! supplied again by the caller. Restoring a snapshot and continuing with
//! the same dice replays the battle exactly.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::carry::CarryState;
use super::critter::{Critter, TagAllocator};
use super::legion::BattleLegion;
use super::outcome::BattleOutcome;
use super::phase::{BattlePhase, PendingDecision, SummonState};
use super::state::Battle;
use crate::core::{BattleConfig, BattleError, Dice, DiceState, Result, Side, SideMap};
use crate::creature::{Caretaker, CreatureCatalog};
use crate::terrain::{MasterTerrain, TerrainBoard};

/// Serializable record of a battle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleSnapshot {
    pub master: MasterTerrain,
    pub config: BattleConfig,
    pub critters: Vec<Critter>,
    pub legions: SideMap<BattleLegion>,
    pub tags: TagAllocator,
    pub active: Side,
    pub turn: u32,
    pub phase: BattlePhase,
    pub summon_state: SummonState,
    pub drift_applied: bool,
    pub attacker_entered: bool,
    pub conceded: bool,
    pub eliminated: SideMap<bool>,
    pub over: bool,
    pub carry: CarryState,
    pub pending: Option<PendingDecision>,
    pub outcome: Option<BattleOutcome>,
    pub dice: DiceState,
    pub caretaker: Caretaker,
}

impl BattleSnapshot {
    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}

impl Battle {
    /// Capture the full battle state. Undrained events are not included.
    #[must_use]
    pub fn snapshot(&self) -> BattleSnapshot {
        BattleSnapshot {
            master: self.board.master(),
            config: self.config.clone(),
            critters: self.critters.iter().cloned().collect(),
            legions: self.legions.clone(),
            tags: self.tags.clone(),
            active: self.active,
            turn: self.turn,
            phase: self.phase,
            summon_state: self.summon_state,
            drift_applied: self.drift_applied,
            attacker_entered: self.attacker_entered,
            conceded: self.conceded,
            eliminated: self.eliminated.clone(),
            over: self.over,
            carry: self.carry.clone(),
            pending: self.pending.clone(),
            outcome: self.outcome.clone(),
            dice: self.dice.state(),
            caretaker: self.caretaker.clone(),
        }
    }

    /// Rebuild a battle from a snapshot.
    ///
    /// Fails with `UnknownCreature` if a critter refers to a creature the
    /// catalog does not have.
    pub fn restore(snapshot: BattleSnapshot, catalog: &Arc<CreatureCatalog>) -> Result<Battle> {
        if let Some(critter) = snapshot.critters.iter().find(|c| c.creature.index() >= catalog.len()) {
            return Err(BattleError::UnknownCreature(critter.creature.to_string()));
        }

        Ok(Battle {
            catalog: Arc::clone(catalog),
            board: Arc::new(TerrainBoard::new(snapshot.master)),
            config: snapshot.config,
            critters: snapshot.critters.into_iter().collect(),
            legions: snapshot.legions,
            tags: snapshot.tags,
            active: snapshot.active,
            turn: snapshot.turn,
            phase: snapshot.phase,
            summon_state: snapshot.summon_state,
            drift_applied: snapshot.drift_applied,
            attacker_entered: snapshot.attacker_entered,
            conceded: snapshot.conceded,
            eliminated: snapshot.eliminated,
            over: snapshot.over,
            carry: snapshot.carry,
            pending: snapshot.pending,
            events: Vec::new(),
            outcome: snapshot.outcome,
            dice: Dice::from_state(&snapshot.dice),
            caretaker: snapshot.caretaker,
        })
    }
}
