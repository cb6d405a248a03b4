//! # titan-battle
//!
//! The tactical battle engine of the Titan fantasy wargame: two legions
//! meet on a hex board and fight until one is gone or the attacker runs
//! out of time.
//!
//! ## Design Principles
//!
//! 1. **Caller-driven**: The engine is a sequential state machine. Every
//!    move, strike and carry is an explicit call, and a battle that needs a
//!    decision stops until it gets one.
//!
//! 2. **No ambient state**: The creature catalog and the board are passed
//!    in and shared read-only; the creature stock and the dice belong to
//!    the battle.
//!
//! 3. **Cheap sandboxes**: Critters live in persistent collections, so
//!    `Battle::sandbox()` gives search an owned copy at little cost.
//!
//! ## Modules
//!
//! - `core`: sides, dice, RNG, configuration, errors
//! - `hex`: coordinates, range and direction
//! - `terrain`: battle boards, hazards, line of sight
//! - `creature`: creature types, catalog, caretaker
//! - `battle`: critters, combat math, carries, the phase machine
//! - `rules`: decision providers and the battle runner

pub mod core;
pub mod hex;
pub mod terrain;
pub mod creature;
pub mod battle;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    BattleConfig, BattleError, Dice, DiceState, DieRoller, FixedDice, GameRng, GameRngState, Result, Side,
    SideMap,
};

pub use crate::hex::{Direction, HexCoord};

pub use crate::terrain::{HexId, MasterTerrain, Terrain, TerrainBoard};

pub use crate::creature::{Caretaker, CreatureCatalog, CreatureId, CreatureType};

pub use crate::battle::{
    Battle, BattleBuilder, BattleEvent, BattleOutcome, BattlePhase, BattleSnapshot, Critter, CritterTag,
    LegionSpec, PenaltyOption, PendingDecision, StrikeOutcome, StrikeReport, SummonOption,
};

pub use crate::rules::{BattleRunner, DecisionProvider, RandomProvider};
