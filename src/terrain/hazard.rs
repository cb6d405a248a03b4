//! Hex terrains, hexside features and creature nativity.
//!
//! ## Terrain
//!
//! What fills a hex. Terrain drives entry cost, line of sight, flying
//! and drift damage.
//!
//! ## Hexside
//!
//! What sits on one edge of a hex. Cliffs matter from either side; the
//! other features are recorded on the higher hex only.
//!
//! ## NativeSet
//!
//! A compact bitset of the hazards a creature is native to.

use serde::{Deserialize, Serialize};

/// Movement cost of an ordinary hex.
pub const NORMAL_COST: u32 = 1;
/// Movement cost of a slowing hex. Slowdowns never stack past this.
pub const SLOW_COST: u32 = 2;
/// Any cost at or above this is impassable.
pub const IMPASSIBLE_COST: u32 = 99;

/// Hazard filling a battle hex.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    #[default]
    Plains,
    Bramble,
    Sand,
    Tree,
    Bog,
    Volcano,
    Drift,
    Tower,
    Lake,
    Stone,
}

impl Terrain {
    /// Only natives may enter at all.
    #[must_use]
    pub const fn is_native_only(self) -> bool {
        matches!(
            self,
            Terrain::Lake | Terrain::Tree | Terrain::Bog | Terrain::Volcano | Terrain::Stone
        )
    }

    #[must_use]
    pub const fn blocks_line_of_sight(self) -> bool {
        matches!(self, Terrain::Tree | Terrain::Stone)
    }

    #[must_use]
    pub const fn blocks_flying(self) -> bool {
        matches!(self, Terrain::Stone)
    }

    /// Costs a non-native the full slow rate.
    #[must_use]
    pub const fn slows_non_natives(self) -> bool {
        matches!(self, Terrain::Bramble | Terrain::Drift)
    }

    /// Damage dealt to each non-native occupant in its Fight phase.
    #[must_use]
    pub const fn damage_to_non_natives(self) -> u8 {
        match self {
            Terrain::Drift => 1,
            _ => 0,
        }
    }

    /// The nativity that lets a creature ignore this terrain.
    #[must_use]
    pub const fn native(self) -> Option<Native> {
        match self {
            Terrain::Bramble => Some(Native::Bramble),
            Terrain::Sand => Some(Native::Sand),
            Terrain::Tree => Some(Native::Tree),
            Terrain::Bog => Some(Native::Bog),
            Terrain::Volcano => Some(Native::Volcano),
            Terrain::Drift => Some(Native::Drift),
            Terrain::Lake => Some(Native::Water),
            Terrain::Stone => Some(Native::Stone),
            Terrain::Plains | Terrain::Tower => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Terrain::Plains => "Plains",
            Terrain::Bramble => "Bramble",
            Terrain::Sand => "Sand",
            Terrain::Tree => "Tree",
            Terrain::Bog => "Bog",
            Terrain::Volcano => "Volcano",
            Terrain::Drift => "Drift",
            Terrain::Tower => "Tower",
            Terrain::Lake => "Lake",
            Terrain::Stone => "Stone",
        }
    }
}

impl std::fmt::Display for Terrain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Feature on one edge of a hex.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hexside {
    #[default]
    None,
    Dune,
    Cliff,
    Slope,
    Wall,
    River,
}

impl Hexside {
    /// Counts toward line-of-sight obstruction.
    #[must_use]
    pub const fn is_obstacle(self) -> bool {
        !matches!(self, Hexside::None | Hexside::River)
    }

    /// Template shorthand: `d`une, `c`liff, `s`lope, `w`all, `r`iver.
    #[must_use]
    pub const fn from_code(code: char) -> Hexside {
        match code {
            'd' => Hexside::Dune,
            'c' => Hexside::Cliff,
            's' => Hexside::Slope,
            'w' => Hexside::Wall,
            'r' => Hexside::River,
            _ => Hexside::None,
        }
    }
}

/// A hazard a creature can be native to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Native {
    Bramble,
    Drift,
    Bog,
    Sand,
    Dune,
    Slope,
    Volcano,
    River,
    Stone,
    Tree,
    Water,
}

impl Native {
    const fn bit(self) -> u16 {
        1 << (self as u8)
    }
}

/// Set of nativities.
///
/// ```
/// use titan_battle::terrain::{Native, NativeSet};
///
/// let lion = NativeSet::of(&[Native::Sand, Native::Dune]);
/// assert!(lion.contains(Native::Dune));
/// assert!(!lion.contains(Native::Bog));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NativeSet(u16);

impl NativeSet {
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    #[must_use]
    pub fn of(natives: &[Native]) -> Self {
        natives.iter().fold(Self::empty(), |set, &n| set.with(n))
    }

    #[must_use]
    pub const fn with(self, native: Native) -> Self {
        Self(self.0 | native.bit())
    }

    #[must_use]
    pub const fn contains(self, native: Native) -> bool {
        self.0 & native.bit() != 0
    }

    /// Native to the given terrain. Plains and tower hexes have no
    /// nativity, so nobody is native there.
    #[must_use]
    pub fn is_native_to(self, terrain: Terrain) -> bool {
        terrain.native().is_some_and(|n| self.contains(n))
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}
