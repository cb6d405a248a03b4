//! A single hex of a battle board.

use serde::{Deserialize, Serialize};

use super::hazard::{Hexside, Terrain};
use crate::hex::{Direction, HexCoord};

/// Index of a hex within its `TerrainBoard`.
///
/// Ids are dense and stable for a given master terrain, so they can be
/// stored in snapshots and compared across sandboxes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HexId(pub u8);

impl HexId {
    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Static description of one hex.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BattleHex {
    pub id: HexId,
    pub coord: HexCoord,
    pub label: String,
    pub terrain: Terrain,
    pub elevation: u8,
    pub(crate) hexsides: [Hexside; 6],
    pub(crate) neighbors: [Option<HexId>; 6],
}

impl BattleHex {
    pub(crate) fn new(id: HexId, coord: HexCoord) -> Self {
        Self {
            id,
            coord,
            label: coord.label(),
            terrain: Terrain::Plains,
            elevation: 0,
            hexsides: [Hexside::None; 6],
            neighbors: [None; 6],
        }
    }

    #[must_use]
    pub fn is_entrance(&self) -> bool {
        self.coord.is_entrance()
    }

    /// The feature on this hex's own edge in `dir`.
    #[must_use]
    pub fn hexside(&self, dir: Direction) -> Hexside {
        self.hexsides[dir.index()]
    }

    #[must_use]
    pub fn neighbor(&self, dir: Direction) -> Option<HexId> {
        self.neighbors[dir.index()]
    }

    /// Any edge of this hex is a wall.
    #[must_use]
    pub fn has_wall(&self) -> bool {
        self.hexsides.contains(&Hexside::Wall)
    }
}
