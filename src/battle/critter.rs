//! Critters - creatures taking part in a battle.
//!
//! A `Critter` is one creature of a legion with its own battle state:
//! position, wounds and whether it has struck this phase. Static data
//! (power, skill, nativity) stays on the `CreatureType` in the catalog.
//!
//! ## Lifecycle
//!
//! Critters are created on their legion's entrance hex when the battle is
//! built, summoned or reinforced. A critter is dead once its hits reach
//! its power, but it stays in the battle (and keeps blocking its hex)
//! until the dead sweep at the end of a Move or Strikeback phase.

use serde::{Deserialize, Serialize};

use crate::core::Side;
use crate::creature::{CreatureId, CreatureType};
use crate::terrain::HexId;

/// Unique critter identifier.
///
/// Tags come from a `TagAllocator` and are never reused by it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CritterTag(pub u32);

impl CritterTag {
    #[must_use]
    pub const fn new(tag: u32) -> Self {
        Self(tag)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CritterTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out critter tags in increasing order.
///
/// An enclosing game keeps one allocator for the whole run and passes it
/// to each battle so tags stay unique across battles.
///
/// ```
/// use titan_battle::battle::TagAllocator;
///
/// let mut tags = TagAllocator::new();
/// let a = tags.next_tag();
/// let b = tags.next_tag();
/// assert_ne!(a, b);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagAllocator {
    next: u32,
}

impl TagAllocator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue after tags already handed out elsewhere.
    #[must_use]
    pub fn starting_at(next: u32) -> Self {
        Self { next }
    }

    pub fn next_tag(&mut self) -> CritterTag {
        let tag = CritterTag(self.next);
        self.next += 1;
        tag
    }

    /// The tag the next call will return.
    #[must_use]
    pub fn peek(&self) -> CritterTag {
        CritterTag(self.next)
    }
}

/// How a critter joined the battle.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Origin {
    /// Part of the legion when the battle began.
    Roster,
    /// Summoned by the attacker from another legion.
    Summoned { donor: String },
    /// Mustered by the defender mid-battle.
    Reinforcement,
}

/// A creature in battle.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Critter {
    pub tag: CritterTag,
    pub creature: CreatureId,
    pub side: Side,
    /// Power for this battle. Equals the creature's power except for
    /// Titans, whose power grows with their owner's score.
    pub power: u8,
    pub skill: u8,
    pub hits: u8,
    pub struck: bool,
    pub current: HexId,
    /// Where the critter began this Move phase.
    pub starting: HexId,
    pub origin: Origin,
}

impl Critter {
    /// A fresh critter standing on `hex`.
    #[must_use]
    pub fn new(tag: CritterTag, id: CreatureId, creature: &CreatureType, side: Side, hex: HexId) -> Self {
        Self {
            tag,
            creature: id,
            side,
            power: creature.power,
            skill: creature.skill,
            hits: 0,
            struck: false,
            current: hex,
            starting: hex,
            origin: Origin::Roster,
        }
    }

    #[must_use]
    pub fn with_power(mut self, power: u8) -> Self {
        self.power = power;
        self
    }

    #[must_use]
    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = origin;
        self
    }

    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.hits >= self.power
    }

    /// Hits left before death.
    #[must_use]
    pub fn remaining(&self) -> u8 {
        self.power.saturating_sub(self.hits)
    }

    /// Apply damage and return the excess beyond what killed it.
    ///
    /// ```
    /// use titan_battle::battle::{Critter, CritterTag};
    /// use titan_battle::core::Side;
    /// use titan_battle::creature::{CreatureId, CreatureType};
    /// use titan_battle::terrain::HexId;
    ///
    /// let ogre = CreatureType::new("Ogre", 6, 2);
    /// let mut critter = Critter::new(CritterTag(1), CreatureId(0), &ogre, Side::Attacker, HexId(0));
    /// assert_eq!(critter.wound(4), 0);
    /// assert_eq!(critter.wound(5), 3);
    /// assert!(critter.is_dead());
    /// ```
    pub fn wound(&mut self, damage: u8) -> u8 {
        let taken = damage.min(self.remaining());
        self.hits += taken;
        damage - taken
    }

    pub fn set_dead(&mut self) {
        self.hits = self.power;
    }

    #[must_use]
    pub fn has_moved(&self) -> bool {
        self.current != self.starting
    }

    pub fn commit_move(&mut self) {
        self.starting = self.current;
    }

    pub fn undo_move(&mut self) {
        self.current = self.starting;
    }

    /// Kill value: battle power times skill.
    #[must_use]
    pub fn point_value(&self) -> u32 {
        self.power as u32 * self.skill as u32
    }
}
