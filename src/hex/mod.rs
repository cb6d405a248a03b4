//! Hex coordinates and geometry for the battle map.

pub mod coord;
pub mod geometry;

pub use coord::{Direction, HexCoord};
