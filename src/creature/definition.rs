//! Creature types - static creature data.
//!
//! `CreatureType` holds what every creature of a kind shares: power,
//! skill, nativity and special abilities. Per-battle state (position,
//! wounds, struck flag) lives on `Critter`.

use serde::{Deserialize, Serialize};

use crate::terrain::{Native, NativeSet, Terrain};

/// Index of a creature type within its `CreatureCatalog`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CreatureId(pub u16);

impl CreatureId {
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CreatureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Creature({})", self.0)
    }
}

/// Static creature definition.
///
/// ## Example
///
/// ```
/// use titan_battle::creature::CreatureType;
/// use titan_battle::terrain::Native;
///
/// let lion = CreatureType::new("Lion", 5, 3)
///     .native_to(Native::Sand)
///     .native_to(Native::Dune);
///
/// assert_eq!(lion.point_value(), 15);
/// assert!(lion.natives.contains(Native::Dune));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureType {
    pub name: String,
    pub power: u8,
    pub skill: u8,
    pub natives: NativeSet,
    /// Copies in the caretaker's stock at the start of a game.
    pub max_count: u32,
    pub lord: bool,
    pub demilord: bool,
    pub immortal: bool,
    pub titan: bool,
    pub summonable: bool,
    pub rangestriker: bool,
    pub flier: bool,
    pub magic_missile: bool,
}

impl CreatureType {
    /// A plain mortal creature with no abilities.
    #[must_use]
    pub fn new(name: impl Into<String>, power: u8, skill: u8) -> Self {
        Self {
            name: name.into(),
            power,
            skill,
            natives: NativeSet::empty(),
            max_count: 0,
            lord: false,
            demilord: false,
            immortal: false,
            titan: false,
            summonable: false,
            rangestriker: false,
            flier: false,
            magic_missile: false,
        }
    }

    #[must_use]
    pub fn native_to(mut self, native: Native) -> Self {
        self.natives = self.natives.with(native);
        self
    }

    #[must_use]
    pub fn with_max_count(mut self, count: u32) -> Self {
        self.max_count = count;
        self
    }

    /// Lords are immortal: they return to stock when killed.
    #[must_use]
    pub fn lord(mut self) -> Self {
        self.lord = true;
        self.immortal = true;
        self
    }

    #[must_use]
    pub fn demilord(mut self) -> Self {
        self.demilord = true;
        self.immortal = true;
        self
    }

    /// A Titan counts as a lord but is never returned to stock.
    #[must_use]
    pub fn titan(mut self) -> Self {
        self.titan = true;
        self.lord = true;
        self
    }

    #[must_use]
    pub fn summonable(mut self) -> Self {
        self.summonable = true;
        self
    }

    #[must_use]
    pub fn rangestriker(mut self) -> Self {
        self.rangestriker = true;
        self
    }

    #[must_use]
    pub fn flier(mut self) -> Self {
        self.flier = true;
        self
    }

    /// Magic missile rangestrikes ignore range-2, lord and LOS limits.
    #[must_use]
    pub fn magic_missile(mut self) -> Self {
        self.magic_missile = true;
        self.rangestriker()
    }

    #[must_use]
    pub fn is_native_to(&self, terrain: Terrain) -> bool {
        self.natives.is_native_to(terrain)
    }

    #[must_use]
    pub fn is_water_dwelling(&self) -> bool {
        self.natives.contains(Native::Water)
    }

    /// Kill value: power times skill.
    #[must_use]
    pub fn point_value(&self) -> u32 {
        self.power as u32 * self.skill as u32
    }
}

impl std::fmt::Display for CreatureType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}-{})", self.name, self.power, self.skill)
    }
}
