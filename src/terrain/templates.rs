//! The eleven battle lands and their fixed layouts.
//!
//! Layouts list only what differs from bare plains. Hexside strings give
//! one character per direction, north first: `d` dune, `c` cliff, `s`
//! slope, `w` wall, `r` river, space for nothing.

use serde::{Deserialize, Serialize};

use super::hazard::Terrain;

/// Master-board terrain a battle is fought in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MasterTerrain {
    Plains,
    Woods,
    Desert,
    Brush,
    Jungle,
    Marsh,
    Swamp,
    Hills,
    Mountains,
    Tundra,
    Tower,
}

/// Hazard placed on one hex: `(x, y, terrain, elevation)`.
pub(crate) type Feature = (i8, i8, Terrain, u8);

/// Hexsides of one hex: `(x, y, sides)`.
pub(crate) type Sides = (i8, i8, &'static str);

/// Fixed layout of a battle land.
pub(crate) struct Layout {
    pub features: &'static [Feature],
    pub sides: &'static [Sides],
    pub tower: bool,
}

impl MasterTerrain {
    pub const ALL: [MasterTerrain; 11] = [
        MasterTerrain::Plains,
        MasterTerrain::Woods,
        MasterTerrain::Desert,
        MasterTerrain::Brush,
        MasterTerrain::Jungle,
        MasterTerrain::Marsh,
        MasterTerrain::Swamp,
        MasterTerrain::Hills,
        MasterTerrain::Mountains,
        MasterTerrain::Tundra,
        MasterTerrain::Tower,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            MasterTerrain::Plains => "Plains",
            MasterTerrain::Woods => "Woods",
            MasterTerrain::Desert => "Desert",
            MasterTerrain::Brush => "Brush",
            MasterTerrain::Jungle => "Jungle",
            MasterTerrain::Marsh => "Marsh",
            MasterTerrain::Swamp => "Swamp",
            MasterTerrain::Hills => "Hills",
            MasterTerrain::Mountains => "Mountains",
            MasterTerrain::Tundra => "Tundra",
            MasterTerrain::Tower => "Tower",
        }
    }

    pub(crate) const fn layout(self) -> Layout {
        match self {
            MasterTerrain::Plains => Layout {
                features: &[],
                sides: &[],
                tower: false,
            },
            MasterTerrain::Woods => Layout {
                features: WOODS,
                sides: &[],
                tower: false,
            },
            MasterTerrain::Desert => Layout {
                features: DESERT,
                sides: DESERT_SIDES,
                tower: false,
            },
            MasterTerrain::Brush => Layout {
                features: BRUSH,
                sides: &[],
                tower: false,
            },
            MasterTerrain::Jungle => Layout {
                features: JUNGLE,
                sides: &[],
                tower: false,
            },
            MasterTerrain::Marsh => Layout {
                features: MARSH,
                sides: &[],
                tower: false,
            },
            MasterTerrain::Swamp => Layout {
                features: SWAMP,
                sides: &[],
                tower: false,
            },
            MasterTerrain::Hills => Layout {
                features: HILLS,
                sides: HILLS_SIDES,
                tower: false,
            },
            MasterTerrain::Mountains => Layout {
                features: MOUNTAINS,
                sides: MOUNTAINS_SIDES,
                tower: false,
            },
            MasterTerrain::Tundra => Layout {
                features: TUNDRA,
                sides: &[],
                tower: false,
            },
            MasterTerrain::Tower => Layout {
                features: TOWER,
                sides: TOWER_SIDES,
                tower: true,
            },
        }
    }
}

impl std::fmt::Display for MasterTerrain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

use Terrain::{Bog, Bramble, Drift, Plains, Sand, Tower, Tree, Volcano};

const WOODS: &[Feature] = &[
    (0, 2, Tree, 1),
    (2, 3, Tree, 1),
    (3, 5, Tree, 1),
    (4, 1, Tree, 1),
    (4, 3, Tree, 1),
];

const DESERT: &[Feature] = &[
    (0, 3, Sand, 0),
    (0, 4, Sand, 0),
    (1, 3, Sand, 0),
    (3, 0, Sand, 0),
    (3, 1, Sand, 0),
    (3, 2, Sand, 0),
    (3, 5, Sand, 0),
    (4, 1, Sand, 0),
    (4, 2, Sand, 0),
    (4, 5, Sand, 0),
    (5, 1, Sand, 0),
];

const DESERT_SIDES: &[Sides] = &[
    (0, 3, "dd    "),
    (1, 3, "dddc  "),
    (3, 1, "    d "),
    (3, 2, "  dccd"),
    (3, 5, "d    d"),
    (4, 2, "  dd  "),
    (4, 5, "cd   d"),
];

const BRUSH: &[Feature] = &[
    (0, 2, Bramble, 0),
    (1, 3, Bramble, 0),
    (2, 2, Bramble, 0),
    (3, 1, Bramble, 0),
    (3, 4, Bramble, 0),
    (3, 5, Bramble, 0),
    (4, 3, Bramble, 0),
    (5, 1, Bramble, 0),
];

const JUNGLE: &[Feature] = &[
    (0, 3, Bramble, 0),
    (2, 1, Bramble, 0),
    (2, 3, Bramble, 0),
    (2, 5, Bramble, 0),
    (3, 2, Bramble, 0),
    (4, 4, Bramble, 0),
    (5, 1, Bramble, 0),
    (1, 1, Tree, 1),
    (3, 3, Tree, 1),
    (5, 2, Tree, 1),
];

const MARSH: &[Feature] = &[
    (0, 2, Bog, 0),
    (2, 3, Bog, 0),
    (2, 4, Bog, 0),
    (3, 1, Bog, 0),
    (4, 3, Bog, 0),
    (4, 5, Bog, 0),
];

const SWAMP: &[Feature] = &[
    (1, 3, Bog, 0),
    (2, 1, Bog, 0),
    (3, 3, Bog, 0),
    (3, 5, Bog, 0),
    (5, 3, Bog, 0),
    (2, 2, Tree, 1),
    (2, 4, Tree, 1),
    (4, 2, Tree, 1),
];

const HILLS: &[Feature] = &[
    (2, 2, Tree, 1),
    (2, 4, Tree, 1),
    (5, 3, Tree, 1),
    (1, 2, Plains, 1),
    (1, 4, Plains, 1),
    (3, 0, Plains, 1),
    (3, 4, Plains, 1),
    (4, 3, Plains, 1),
];

const HILLS_SIDES: &[Sides] = &[
    (1, 2, "ssssss"),
    (1, 4, "sss  s"),
    (3, 0, "  sss "),
    (3, 4, "ssssss"),
    (4, 3, "ssssss"),
];

const MOUNTAINS: &[Feature] = &[
    (3, 2, Volcano, 2),
    (0, 4, Plains, 1),
    (1, 1, Plains, 1),
    (1, 3, Plains, 1),
    (2, 2, Plains, 1),
    (2, 5, Plains, 1),
    (3, 1, Plains, 1),
    (3, 3, Plains, 1),
    (4, 1, Plains, 1),
    (4, 2, Plains, 1),
    (4, 3, Plains, 1),
    (5, 2, Plains, 1),
    (5, 4, Plains, 1),
    (1, 4, Plains, 2),
    (2, 1, Plains, 2),
    (3, 0, Plains, 2),
    (5, 1, Plains, 2),
    (5, 3, Plains, 2),
];

const MOUNTAINS_SIDES: &[Sides] = &[
    (0, 4, "s     "),
    (1, 1, "   ss "),
    (1, 3, "sss  s"),
    (1, 4, "scs  s"),
    (2, 1, "  sss "),
    (2, 2, "   ss "),
    (2, 5, "sss   "),
    (3, 0, "  ss  "),
    (3, 2, "sssscs"),
    (3, 3, "  ssss"),
    (4, 3, "   s  "),
    (5, 1, "   sss"),
    (5, 3, "s  scs"),
    (5, 4, "    ss"),
];

const TUNDRA: &[Feature] = &[
    (0, 4, Drift, 0),
    (1, 3, Drift, 0),
    (2, 1, Drift, 0),
    (2, 2, Drift, 0),
    (2, 4, Drift, 0),
    (3, 3, Drift, 0),
    (4, 2, Drift, 0),
    (4, 5, Drift, 0),
    (5, 3, Drift, 0),
];

const TOWER: &[Feature] = &[
    (2, 2, Tower, 1),
    (2, 3, Tower, 1),
    (3, 1, Tower, 1),
    (3, 2, Tower, 2),
    (3, 3, Tower, 1),
    (4, 2, Tower, 1),
    (4, 3, Tower, 1),
];

const TOWER_SIDES: &[Sides] = &[
    (2, 2, "w   ww"),
    (2, 3, "   www"),
    (3, 1, "ww   w"),
    (3, 2, "wwwwww"),
    (3, 3, "  www "),
    (4, 2, "www   "),
    (4, 3, " www  "),
];
