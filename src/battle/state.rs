//! The battle aggregate.
//!
//! `Battle` owns everything that changes during a fight: the critter
//! arena, both legions' bookkeeping, the phase machine, the carry context,
//! the caretaker and the dice. The board and the creature catalog are
//! shared read-only behind `Arc`s.
//!
//! ## Cloning
//!
//! The critter arena is an `im::Vector`, so `sandbox()` is cheap enough to
//! call once per search node. Operations live in sibling modules:
//!
//! - `movement`: legal moves and the Move phase
//! - `combat`: contact, dice, strike numbers and targets
//! - `carry`: carry discovery and penalty options
//! - `strike`: the Fight and Strikeback operations
//! - `lifecycle`: phase advancement, summons, reinforcements, concession
//! - `cleanup`: the dead sweep, elimination and time loss

use std::sync::Arc;

use im::Vector;

use super::carry::CarryState;
use super::critter::{Critter, CritterTag, TagAllocator};
use super::legion::BattleLegion;
use super::outcome::{BattleEvent, BattleOutcome};
use super::phase::{BattlePhase, PendingDecision, SummonState};
use crate::core::{BattleConfig, BattleError, Dice, Result, Side, SideMap};
use crate::creature::{Caretaker, CreatureCatalog, CreatureType};
use crate::terrain::{HexId, TerrainBoard};

/// A single battle between an attacking and a defending legion.
#[derive(Clone, Debug)]
pub struct Battle {
    pub(super) catalog: Arc<CreatureCatalog>,
    pub(super) board: Arc<TerrainBoard>,
    pub(super) config: BattleConfig,

    pub(super) critters: Vector<Critter>,
    pub(super) legions: SideMap<BattleLegion>,
    pub(super) tags: TagAllocator,

    pub(super) active: Side,
    pub(super) turn: u32,
    pub(super) phase: BattlePhase,
    pub(super) summon_state: SummonState,
    pub(super) drift_applied: bool,
    pub(super) attacker_entered: bool,
    pub(super) conceded: bool,
    pub(super) eliminated: SideMap<bool>,
    pub(super) over: bool,

    pub(super) carry: CarryState,
    pub(super) pending: Option<PendingDecision>,
    pub(super) events: Vec<BattleEvent>,
    pub(super) outcome: Option<BattleOutcome>,

    pub(super) dice: Dice,
    pub(super) caretaker: Caretaker,
}

impl Battle {
    // === Read access ===

    #[must_use]
    pub fn board(&self) -> &TerrainBoard {
        &self.board
    }

    #[must_use]
    pub fn catalog(&self) -> &CreatureCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    #[must_use]
    pub fn active_side(&self) -> Side {
        self.active
    }

    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    #[must_use]
    pub fn summon_state(&self) -> SummonState {
        self.summon_state
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.over
    }

    #[must_use]
    pub fn attacker_entered(&self) -> bool {
        self.attacker_entered
    }

    #[must_use]
    pub fn is_conceded(&self) -> bool {
        self.conceded
    }

    #[must_use]
    pub fn pending(&self) -> Option<&PendingDecision> {
        self.pending.as_ref()
    }

    #[must_use]
    pub fn legion(&self, side: Side) -> &BattleLegion {
        &self.legions[side]
    }

    #[must_use]
    pub fn caretaker(&self) -> &Caretaker {
        &self.caretaker
    }

    /// The result, once the battle is over.
    #[must_use]
    pub fn outcome(&self) -> Option<&BattleOutcome> {
        self.outcome.as_ref()
    }

    /// Drain the events recorded since the last call.
    pub fn take_events(&mut self) -> Vec<BattleEvent> {
        std::mem::take(&mut self.events)
    }

    /// Owned deep copy for what-if search.
    ///
    /// The copy draws from a forked die stream and starts with no pending
    /// events; nothing done to it reaches this battle.
    #[must_use]
    pub fn sandbox(&mut self) -> Battle {
        Battle {
            catalog: Arc::clone(&self.catalog),
            board: Arc::clone(&self.board),
            config: self.config.clone(),
            critters: self.critters.clone(),
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
            events: Vec::new(),
            outcome: self.outcome.clone(),
            dice: self.dice.fork(),
            caretaker: self.caretaker.clone(),
        }
    }

    // === Critters ===

    /// Every critter still in the battle, dead ones included until swept.
    pub fn critters(&self) -> impl Iterator<Item = &Critter> {
        self.critters.iter()
    }

    /// Critters of one side, in roster order.
    pub fn side_critters(&self, side: Side) -> impl Iterator<Item = &Critter> {
        self.critters.iter().filter(move |c| c.side == side)
    }

    pub fn living_critters(&self, side: Side) -> impl Iterator<Item = &Critter> {
        self.side_critters(side).filter(|c| !c.is_dead())
    }

    #[must_use]
    pub fn critter(&self, tag: CritterTag) -> Option<&Critter> {
        self.critters.iter().find(|c| c.tag == tag)
    }

    pub(super) fn critter_or_err(&self, tag: CritterTag) -> Result<&Critter> {
        self.critter(tag).ok_or(BattleError::UnknownCritter(tag))
    }

    pub(super) fn critter_mut(&mut self, tag: CritterTag) -> Option<&mut Critter> {
        self.critters.iter_mut().find(|c| c.tag == tag)
    }

    /// The critter on a hex, dead or alive.
    ///
    /// Entrances can hold several critters; the first one in roster order,
    /// defenders before attackers, is returned.
    #[must_use]
    pub fn critter_at(&self, hex: HexId) -> Option<&Critter> {
        self.side_critters(Side::Defender)
            .chain(self.side_critters(Side::Attacker))
            .find(|c| c.current == hex)
    }

    #[must_use]
    pub fn is_occupied(&self, hex: HexId) -> bool {
        self.critters.iter().any(|c| c.current == hex)
    }

    /// Static type data for a critter.
    #[must_use]
    pub fn creature_of(&self, critter: &Critter) -> &CreatureType {
        self.catalog.get(critter.creature)
    }

    /// Resolve a hex label on this battle's board.
    pub fn hex(&self, label: &str) -> Result<HexId> {
        self.board
            .hex_by_label(label)
            .ok_or_else(|| BattleError::UnknownHex(label.to_string()))
    }

    #[must_use]
    pub fn label(&self, hex: HexId) -> &str {
        self.board.label(hex)
    }

    /// Entrance hex of a side's legion.
    #[must_use]
    pub fn entrance_of(&self, side: Side) -> HexId {
        self.board.entrance(self.legions[side].entry_side)
    }

    // === Shared preconditions ===

    pub(super) fn ensure_live(&self) -> Result<()> {
        if self.over {
            return Err(BattleError::BattleOver);
        }
        if self.pending.is_some() {
            return Err(BattleError::DecisionPending);
        }
        Ok(())
    }

    pub(super) fn ensure_active(&self, side: Side) -> Result<()> {
        if side != self.active {
            return Err(BattleError::NotActiveSide {
                side,
                active: self.active,
            });
        }
        Ok(())
    }

    pub(super) fn ensure_own(&self, side: Side, tag: CritterTag) -> Result<&Critter> {
        let critter = self.critter_or_err(tag)?;
        if critter.side != side {
            return Err(BattleError::NotOwnCritter { tag, side });
        }
        Ok(critter)
    }
}
