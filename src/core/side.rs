//! Battle sides and per-side data storage.
//!
//! ## Side
//!
//! Every battle has exactly two participants: the defending legion, which
//! holds the master hex, and the attacking legion, which entered it.
//!
//! ## SideMap
//!
//! Fixed two-slot storage indexed by `Side`, used for legions, elimination
//! flags and points.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two legions in a battle.
///
/// The defender is index 0 and the attacker index 1, which is also the
/// order critters are scanned in when looking up a hex.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    Defender,
    Attacker,
}

impl Side {
    /// Both sides, defender first.
    pub const ALL: [Side; 2] = [Side::Defender, Side::Attacker];

    /// Slot index (defender 0, attacker 1).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Side::Defender => 0,
            Side::Attacker => 1,
        }
    }

    /// The other side.
    ///
    /// ```
    /// use titan_battle::core::Side;
    ///
    /// assert_eq!(Side::Attacker.opponent(), Side::Defender);
    /// assert_eq!(Side::Defender.opponent().opponent(), Side::Defender);
    /// ```
    #[must_use]
    pub const fn opponent(self) -> Side {
        match self {
            Side::Defender => Side::Attacker,
            Side::Attacker => Side::Defender,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Defender => write!(f, "defender"),
            Side::Attacker => write!(f, "attacker"),
        }
    }
}

/// Per-side data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use titan_battle::core::{Side, SideMap};
///
/// let mut points: SideMap<u32> = SideMap::with_value(0);
/// points[Side::Attacker] += 24;
///
/// assert_eq!(points[Side::Attacker], 24);
/// assert_eq!(points[Side::Defender], 0);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideMap<T> {
    data: [T; 2],
}

impl<T> SideMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(factory: impl Fn(Side) -> T) -> Self {
        Self {
            data: [factory(Side::Defender), factory(Side::Attacker)],
        }
    }

    /// Create a map from explicit defender and attacker values.
    pub fn from_pair(defender: T, attacker: T) -> Self {
        Self {
            data: [defender, attacker],
        }
    }

    /// Create a map with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::from_pair(value.clone(), value)
    }

    /// Get a reference to one side's data.
    #[must_use]
    pub fn get(&self, side: Side) -> &T {
        &self.data[side.index()]
    }

    /// Get a mutable reference to one side's data.
    pub fn get_mut(&mut self, side: Side) -> &mut T {
        &mut self.data[side.index()]
    }

    /// Iterate over (Side, &T) pairs, defender first.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        Side::ALL.into_iter().zip(self.data.iter())
    }

    /// Iterate over (Side, &mut T) pairs, defender first.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Side, &mut T)> {
        Side::ALL.into_iter().zip(self.data.iter_mut())
    }
}

impl<T> Index<Side> for SideMap<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        self.get(side)
    }
}

impl<T> IndexMut<Side> for SideMap<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        self.get_mut(side)
    }
}
