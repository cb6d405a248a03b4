//! The static battle board.
//!
//! A `TerrainBoard` is built once per battle from a `MasterTerrain`
//! layout and never changes afterwards. Battles share it through an
//! `Arc`, so sandboxes and snapshots never copy it.
//!
//! ## Entrances
//!
//! Each of the six entrance hexes links one way onto the board edge: an
//! entrance lists its board neighbours, but no board hex lists an
//! entrance. Movement therefore only ever leaves an entrance.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::hazard::{Hexside, Native, NativeSet, Terrain, IMPASSIBLE_COST, NORMAL_COST, SLOW_COST};
use super::hex::{BattleHex, HexId};
use super::templates::MasterTerrain;
use crate::hex::{geometry, Direction, HexCoord};

/// Range reported for hexes that cannot be measured against each other.
pub const OUT_OF_RANGE: u32 = 99;

/// Rows in use per column, inclusive.
const COLUMNS: [(i8, i8); 6] = [(2, 4), (1, 4), (1, 5), (0, 5), (1, 5), (1, 4)];

/// One-way entrance links: `(direction, x, y)` for each entry side.
const ENTRANCE_LINKS: [&[(usize, i8, i8)]; 6] = [
    &[(3, 3, 0), (4, 4, 1), (5, 5, 1)],
    &[(3, 5, 1), (4, 5, 2), (5, 5, 3), (0, 5, 4)],
    &[(4, 5, 4), (5, 4, 5), (0, 3, 5)],
    &[(5, 3, 5), (0, 2, 5), (1, 1, 4), (2, 0, 4)],
    &[(0, 0, 4), (1, 0, 3), (2, 0, 2)],
    &[(1, 0, 2), (2, 1, 1), (3, 2, 1), (4, 3, 0)],
];

/// Immutable battle board.
#[derive(Clone, Debug)]
pub struct TerrainBoard {
    master: MasterTerrain,
    hexes: Vec<BattleHex>,
    by_label: FxHashMap<String, HexId>,
    by_coord: FxHashMap<HexCoord, HexId>,
    entrances: [HexId; 6],
    start_list: SmallVec<[HexId; 7]>,
}

impl TerrainBoard {
    /// Build the board for a master terrain.
    ///
    /// ```
    /// use titan_battle::terrain::{MasterTerrain, Terrain, TerrainBoard};
    ///
    /// let board = TerrainBoard::new(MasterTerrain::Jungle);
    /// let d3 = board.hex_by_label("D3").unwrap();
    /// assert_eq!(board.hex(d3).terrain, Terrain::Tree);
    /// assert_eq!(board.board_hexes().count(), 27);
    /// ```
    #[must_use]
    pub fn new(master: MasterTerrain) -> Self {
        let layout = master.layout();
        let mut hexes = Vec::with_capacity(33);
        let mut by_coord = FxHashMap::default();

        for (x, &(low, high)) in COLUMNS.iter().enumerate() {
            for y in low..=high {
                let coord = HexCoord::new(x as i8, y);
                let id = HexId::new(hexes.len() as u8);
                by_coord.insert(coord, id);
                hexes.push(BattleHex::new(id, coord));
            }
        }

        for &(x, y, terrain, elevation) in layout.features {
            if let Some(&id) = by_coord.get(&HexCoord::new(x, y)) {
                let hex = &mut hexes[id.index()];
                hex.terrain = terrain;
                hex.elevation = elevation;
            }
        }
        for &(x, y, sides) in layout.sides {
            if let Some(&id) = by_coord.get(&HexCoord::new(x, y)) {
                for (dir, code) in sides.chars().take(6).enumerate() {
                    hexes[id.index()].hexsides[dir] = Hexside::from_code(code);
                }
            }
        }

        // Board adjacency, computed before entrances exist so that stepping
        // off the west edge never lands on an entrance coordinate.
        for hex in hexes.iter_mut() {
            for dir in Direction::ALL {
                hex.neighbors[dir.index()] = by_coord.get(&hex.coord.step(dir)).copied();
            }
        }

        let mut entrances = [HexId::new(0); 6];
        for (side, links) in ENTRANCE_LINKS.iter().enumerate() {
            let coord = HexCoord::entrance(side as u8);
            let id = HexId::new(hexes.len() as u8);
            let mut hex = BattleHex::new(id, coord);
            for &(dir, x, y) in links.iter() {
                hex.neighbors[dir] = by_coord.get(&HexCoord::new(x, y)).copied();
            }
            by_coord.insert(coord, id);
            hexes.push(hex);
            entrances[side] = id;
        }

        let start_list = if layout.tower {
            let centre = by_coord[&HexCoord::new(3, 2)];
            let mut list: SmallVec<[HexId; 7]> = SmallVec::new();
            list.push(centre);
            list.extend(hexes[centre.index()].neighbors.iter().flatten().copied());
            list
        } else {
            SmallVec::new()
        };

        let by_label = hexes.iter().map(|h| (h.label.clone(), h.id)).collect();

        Self {
            master,
            hexes,
            by_label,
            by_coord,
            entrances,
            start_list,
        }
    }

    #[must_use]
    pub fn master(&self) -> MasterTerrain {
        self.master
    }

    #[must_use]
    pub fn hex(&self, id: HexId) -> &BattleHex {
        &self.hexes[id.index()]
    }

    #[must_use]
    pub fn hex_by_label(&self, label: &str) -> Option<HexId> {
        self.by_label.get(label).copied()
    }

    #[must_use]
    pub fn hex_at(&self, coord: HexCoord) -> Option<HexId> {
        self.by_coord.get(&coord).copied()
    }

    #[must_use]
    pub fn label(&self, id: HexId) -> &str {
        &self.hexes[id.index()].label
    }

    /// Every hex, entrances included.
    pub fn hexes(&self) -> impl Iterator<Item = &BattleHex> {
        self.hexes.iter()
    }

    /// On-board hexes only.
    pub fn board_hexes(&self) -> impl Iterator<Item = &BattleHex> {
        self.hexes.iter().filter(|h| !h.is_entrance())
    }

    #[must_use]
    pub fn is_entrance(&self, id: HexId) -> bool {
        self.hex(id).is_entrance()
    }

    /// The entrance hex for an entry side, taken modulo 6.
    #[must_use]
    pub fn entrance(&self, side: u8) -> HexId {
        self.entrances[(side % 6) as usize]
    }

    /// Hexes a defender may reach on the first turn of a tower battle.
    /// Empty for every other terrain.
    #[must_use]
    pub fn start_list(&self) -> &[HexId] {
        &self.start_list
    }

    #[must_use]
    pub fn neighbor(&self, id: HexId, dir: Direction) -> Option<HexId> {
        self.hex(id).neighbor(dir)
    }

    #[must_use]
    pub fn hexside(&self, id: HexId, dir: Direction) -> Hexside {
        self.hex(id).hexside(dir)
    }

    /// The feature on the neighbour's matching edge, seen from this hex.
    #[must_use]
    pub fn opposite_hexside(&self, id: HexId, dir: Direction) -> Hexside {
        self.neighbor(id, dir)
            .map_or(Hexside::None, |n| self.hexside(n, dir.opposite()))
    }

    /// A cliff on either side of this edge.
    #[must_use]
    pub fn is_cliff(&self, id: HexId, dir: Direction) -> bool {
        self.hexside(id, dir) == Hexside::Cliff || self.opposite_hexside(id, dir) == Hexside::Cliff
    }

    #[must_use]
    pub fn elevation(&self, id: HexId) -> u8 {
        self.hex(id).elevation
    }

    #[must_use]
    pub fn terrain(&self, id: HexId) -> Terrain {
        self.hex(id).terrain
    }

    /// Titan range between two hexes.
    ///
    /// An entrance measures one more than its closest board neighbour when
    /// `allow_entrance` is set, and `OUT_OF_RANGE` otherwise.
    #[must_use]
    pub fn range(&self, a: HexId, b: HexId, allow_entrance: bool) -> u32 {
        let (ha, hb) = (self.hex(a), self.hex(b));
        if ha.is_entrance() || hb.is_entrance() {
            if !allow_entrance {
                return OUT_OF_RANGE;
            }
            let (entrance, other) = if ha.is_entrance() { (ha, b) } else { (hb, a) };
            let nearest = entrance
                .neighbors
                .iter()
                .flatten()
                .map(|&n| self.range(n, other, false))
                .min()
                .unwrap_or(OUT_OF_RANGE);
            return (nearest + 1).min(OUT_OF_RANGE);
        }
        geometry::range(ha.coord, hb.coord)
    }

    /// Direction from `a` toward `b`; `None` for the same hex or an entrance.
    #[must_use]
    pub fn direction(&self, a: HexId, b: HexId, prefer_left: bool) -> Option<Direction> {
        geometry::direction(self.hex(a).coord, self.hex(b).coord, prefer_left)
    }

    /// Movement points needed to step into `id` across its `came_from`
    /// edge, for a creature with the given nativity.
    ///
    /// Occupancy is the caller's concern. For fliers this is the cost of
    /// landing, not of flying over.
    #[must_use]
    pub fn entry_cost(&self, id: HexId, came_from: Direction, natives: NativeSet, flier: bool) -> u32 {
        let hex = self.hex(id);
        let native = natives.is_native_to(hex.terrain);

        if hex.terrain.is_native_only() && !native {
            return IMPASSIBLE_COST;
        }
        if self.is_cliff(id, came_from) && !flier {
            return IMPASSIBLE_COST;
        }

        let hexside = hex.hexside(came_from);
        let climbs = hexside == Hexside::Wall
            || (hexside == Hexside::Slope && !natives.contains(Native::Slope));
        if climbs && !flier {
            let below = hex.neighbor(came_from).map_or(0, |n| self.elevation(n));
            if hex.elevation > below {
                return SLOW_COST;
            }
        }

        if hex.terrain.slows_non_natives() && !native {
            return SLOW_COST;
        }
        if hex.terrain == Terrain::Sand && !native && !flier {
            return SLOW_COST;
        }
        NORMAL_COST
    }

    #[must_use]
    pub fn can_be_flown_over(&self, id: HexId, flier: bool) -> bool {
        flier && !self.terrain(id).blocks_flying()
    }

    /// Damage this hex deals each Fight phase to an occupant.
    #[must_use]
    pub fn damage_to(&self, id: HexId, natives: NativeSet) -> u8 {
        let terrain = self.terrain(id);
        if natives.is_native_to(terrain) {
            0
        } else {
            terrain.damage_to_non_natives()
        }
    }
}
