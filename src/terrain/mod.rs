//! Static battle terrain.
//!
//! ## Key Types
//!
//! - `TerrainBoard`: the 27 board hexes plus six entrances, built once per
//!   battle from a `MasterTerrain`
//! - `Terrain` / `Hexside`: hex and edge hazards
//! - `NativeSet`: which hazards a creature ignores
//!
//! Line of sight and bramble counting live on the board as well; see
//! `TerrainBoard::is_los_blocked`.

pub mod board;
pub mod hazard;
pub mod hex;
pub mod sight;
pub mod templates;

pub use board::{TerrainBoard, OUT_OF_RANGE};
pub use hazard::{Hexside, Native, NativeSet, Terrain, IMPASSIBLE_COST, NORMAL_COST, SLOW_COST};
pub use hex::{BattleHex, HexId};
pub use sight::BIGNUM;
pub use templates::MasterTerrain;
