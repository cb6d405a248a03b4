//! Construction of a battle from two legion specs.

use std::sync::Arc;

use im::Vector;
use rustc_hash::FxHashSet;
use tracing::{info, warn};

use super::carry::CarryState;
use super::critter::{Critter, TagAllocator};
use super::legion::{BattleLegion, LegionSpec};
use super::phase::{BattlePhase, SummonState};
use super::state::Battle;
use crate::core::{BattleConfig, BattleError, Dice, Result, Side, SideMap};
use crate::creature::{Caretaker, CreatureCatalog};
use crate::terrain::{MasterTerrain, TerrainBoard};

/// Sides an attacker may enter from.
const ATTACKER_ENTRY_SIDES: [u8; 3] = [1, 3, 5];

/// Builder for a `Battle`.
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use titan_battle::battle::{BattleBuilder, LegionSpec};
/// use titan_battle::creature::CreatureCatalog;
/// use titan_battle::terrain::MasterTerrain;
///
/// let catalog = Arc::new(CreatureCatalog::standard());
/// let battle = BattleBuilder::new(MasterTerrain::Plains, catalog)
///     .defender(LegionSpec::new("Bu01", "Blue").creature("Ogre"))
///     .attacker(LegionSpec::new("Rd01", "Red").creature("Troll"))
///     .build()
///     .unwrap();
///
/// assert_eq!(battle.turn(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct BattleBuilder {
    master: MasterTerrain,
    catalog: Arc<CreatureCatalog>,
    config: BattleConfig,
    defender: Option<LegionSpec>,
    attacker: Option<LegionSpec>,
    dice: Option<Dice>,
    caretaker: Option<Caretaker>,
    turn: u32,
    phase: BattlePhase,
    active: Side,
    tags: TagAllocator,
}

impl BattleBuilder {
    pub fn new(master: MasterTerrain, catalog: Arc<CreatureCatalog>) -> Self {
        Self {
            master,
            catalog,
            config: BattleConfig::default(),
            defender: None,
            attacker: None,
            dice: None,
            caretaker: None,
            turn: 1,
            phase: BattlePhase::Move,
            active: Side::Defender,
            tags: TagAllocator::new(),
        }
    }

    #[must_use]
    pub fn config(mut self, config: BattleConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn defender(mut self, spec: LegionSpec) -> Self {
        self.defender = Some(spec);
        self
    }

    #[must_use]
    pub fn attacker(mut self, spec: LegionSpec) -> Self {
        self.attacker = Some(spec);
        self
    }

    /// Die source. Defaults to one seeded from the config.
    #[must_use]
    pub fn dice(mut self, dice: Dice) -> Self {
        self.dice = Some(dice);
        self
    }

    /// Creature stock. Defaults to a full caretaker for the catalog.
    #[must_use]
    pub fn caretaker(mut self, caretaker: Caretaker) -> Self {
        self.caretaker = Some(caretaker);
        self
    }

    /// Start mid-battle, e.g. to set up a test position.
    #[must_use]
    pub fn starting_at(mut self, turn: u32, phase: BattlePhase, active: Side) -> Self {
        self.turn = turn;
        self.phase = phase;
        self.active = active;
        self
    }

    /// Share a tag allocator across battles so tags are never reused.
    #[must_use]
    pub fn tags(mut self, tags: TagAllocator) -> Self {
        self.tags = tags;
        self
    }

    pub fn build(self) -> Result<Battle> {
        let board = Arc::new(TerrainBoard::new(self.master));
        let defender = self.defender.unwrap_or_else(|| LegionSpec::new("defender", "defender"));
        let attacker = self.attacker.unwrap_or_else(|| LegionSpec::new("attacker", "attacker"));

        let attacker_side = if ATTACKER_ENTRY_SIDES.contains(&attacker.entry_side) {
            attacker.entry_side
        } else {
            warn!(entry_side = attacker.entry_side, "bad attacker entry side; using 3");
            3
        };
        let defender_side = (attacker_side + 3) % 6;

        let mut tags = self.tags;
        let mut critters = Vector::new();
        let mut placed = FxHashSet::default();
        for (side, spec, entry_side) in [
            (Side::Defender, &defender, defender_side),
            (Side::Attacker, &attacker, attacker_side),
        ] {
            let entrance = board.entrance(entry_side);
            for entry in &spec.roster {
                let id = self
                    .catalog
                    .by_name(&entry.creature)
                    .ok_or_else(|| BattleError::UnknownCreature(entry.creature.clone()))?;
                let creature = self.catalog.get(id);
                let hex = match &entry.hex {
                    Some(label) => board
                        .hex_by_label(label)
                        .ok_or_else(|| BattleError::UnknownHex(label.clone()))?,
                    None => entrance,
                };
                // Entrances hold a whole legion; board hexes hold one critter.
                if !board.is_entrance(hex) && !placed.insert(hex) {
                    warn!(hex = %board.label(hex), "two critters placed on one hex");
                    return Err(BattleError::HexOccupied(board.label(hex).to_string()));
                }

                let mut critter = Critter::new(tags.next_tag(), id, creature, side, hex);
                if creature.titan {
                    critter = critter.with_power(spec.titan_power.unwrap_or(self.config.default_titan_power));
                }
                critter.wound(entry.hits);
                critters.push_back(critter);
            }
        }

        let legions = SideMap::from_pair(
            BattleLegion::from_spec(&defender, defender_side),
            BattleLegion::from_spec(&attacker, attacker_side),
        );
        let caretaker = self.caretaker.unwrap_or_else(|| Caretaker::full(&self.catalog));
        let dice = self.dice.unwrap_or_else(|| Dice::seeded(self.config.seed));

        info!(
            terrain = %self.master,
            defender = %defender.marker,
            attacker = %attacker.marker,
            critters = critters.len(),
            "battle begins"
        );

        let mut battle = Battle {
            catalog: self.catalog,
            board,
            config: self.config,
            critters,
            legions,
            tags,
            active: self.active,
            turn: self.turn,
            phase: self.phase,
            summon_state: SummonState::NoKills,
            drift_applied: false,
            attacker_entered: false,
            conceded: false,
            eliminated: SideMap::with_value(false),
            over: false,
            carry: CarryState::default(),
            pending: None,
            events: Vec::new(),
            outcome: None,
            dice,
            caretaker,
        };
        battle.init();
        Ok(battle)
    }
}
