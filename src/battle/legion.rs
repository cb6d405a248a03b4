//! Legions in battle.
//!
//! `LegionSpec` is what the enclosing game hands the builder: a roster
//! plus the legion's summon and recruit rights. `BattleLegion` is the
//! per-battle bookkeeping kept for each side once the critters exist.

use serde::{Deserialize, Serialize};

use super::phase::SummonOption;

/// One roster entry: a creature name and an optional starting position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub creature: String,
    /// Hex label to start on instead of the entrance.
    pub hex: Option<String>,
    pub hits: u8,
}

/// A legion as supplied by the enclosing game.
///
/// ## Example
///
/// ```
/// use titan_battle::battle::LegionSpec;
///
/// let legion = LegionSpec::new("Rd03", "Red")
///     .creature("Titan")
///     .creature("Ogre")
///     .titan_power(7)
///     .entry_side(5);
///
/// assert_eq!(legion.roster.len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegionSpec {
    pub marker: String,
    pub owner: String,
    pub roster: Vec<RosterEntry>,
    /// Attacker entry side. Ignored for the defender.
    pub entry_side: u8,
    pub titan_power: Option<u8>,
    /// Angels the attacker may summon, with their donors.
    pub summonables: Vec<SummonOption>,
    /// Creatures the defender may muster as a reinforcement.
    pub recruits: Vec<String>,
}

impl LegionSpec {
    pub fn new(marker: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            owner: owner.into(),
            roster: Vec::new(),
            entry_side: 3,
            titan_power: None,
            summonables: Vec::new(),
            recruits: Vec::new(),
        }
    }

    #[must_use]
    pub fn creature(mut self, name: impl Into<String>) -> Self {
        self.roster.push(RosterEntry {
            creature: name.into(),
            hex: None,
            hits: 0,
        });
        self
    }

    /// Add a creature already standing on a board hex.
    #[must_use]
    pub fn creature_at(mut self, name: impl Into<String>, hex: impl Into<String>) -> Self {
        self.roster.push(RosterEntry {
            creature: name.into(),
            hex: Some(hex.into()),
            hits: 0,
        });
        self
    }

    /// Wound the most recently added creature.
    #[must_use]
    pub fn with_hits(mut self, hits: u8) -> Self {
        if let Some(entry) = self.roster.last_mut() {
            entry.hits = hits;
        }
        self
    }

    #[must_use]
    pub fn entry_side(mut self, side: u8) -> Self {
        self.entry_side = side;
        self
    }

    #[must_use]
    pub fn titan_power(mut self, power: u8) -> Self {
        self.titan_power = Some(power);
        self
    }

    #[must_use]
    pub fn summonable(mut self, creature: impl Into<String>, donor: impl Into<String>) -> Self {
        self.summonables.push(SummonOption::new(creature, donor));
        self
    }

    #[must_use]
    pub fn recruit(mut self, creature: impl Into<String>) -> Self {
        self.recruits.push(creature.into());
        self
    }
}

/// Per-side battle bookkeeping.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleLegion {
    pub marker: String,
    pub owner: String,
    pub entry_side: u8,
    /// Points earned by this legion's kills so far.
    pub tally: u32,
    pub summonables: Vec<SummonOption>,
    pub summoned: bool,
    pub recruits: Vec<String>,
    /// Name of the reinforcement mustered this battle, if any.
    pub recruited: Option<String>,
    /// The owner's Titan has died in this battle.
    pub titan_eliminated: bool,
}

impl BattleLegion {
    pub(crate) fn from_spec(spec: &LegionSpec, entry_side: u8) -> Self {
        Self {
            marker: spec.marker.clone(),
            owner: spec.owner.clone(),
            entry_side,
            tally: 0,
            summonables: spec.summonables.clone(),
            summoned: false,
            recruits: spec.recruits.clone(),
            recruited: None,
            titan_eliminated: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_builder() {
        let spec = LegionSpec::new("Bu03", "Blue")
            .creature_at("Gargoyle", "D3")
            .with_hits(3)
            .creature("Ogre")
            .recruit("Troll")
            .summonable("Angel", "Bu07");

        assert_eq!(spec.roster[0].hex.as_deref(), Some("D3"));
        assert_eq!(spec.roster[0].hits, 3);
        assert_eq!(spec.roster[1].hits, 0);
        assert_eq!(spec.recruits, vec!["Troll".to_string()]);
        assert_eq!(spec.summonables[0].donor, "Bu07");
    }

    #[test]
    fn test_from_spec() {
        let spec = LegionSpec::new("Rd01", "Red").creature("Titan");
        let legion = BattleLegion::from_spec(&spec, 1);
        assert_eq!(legion.entry_side, 1);
        assert_eq!(legion.tally, 0);
        assert!(!legion.titan_eliminated);
    }
}
