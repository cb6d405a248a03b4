//! Core engine types: sides, dice, RNG, configuration, errors.
//!
//! This module contains the building blocks every other module leans on.
//! Nothing here knows about hexes or creatures.

pub mod side;
pub mod rng;
pub mod dice;
pub mod config;
pub mod error;

pub use side::{Side, SideMap};
pub use rng::{GameRng, GameRngState};
pub use dice::{Dice, DiceState, DieRoller, FixedDice, Rolls};
pub use config::BattleConfig;
pub use error::{BattleError, Result};
