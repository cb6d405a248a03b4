//! Creature catalog for type lookup.
//!
//! The `CreatureCatalog` is built once and shared read-only by every
//! battle, usually behind an `Arc`. There is no global registry.

use rustc_hash::FxHashMap;

use super::definition::{CreatureId, CreatureType};
use crate::terrain::Native;

/// Registry of creature types.
///
/// ## Example
///
/// ```
/// use titan_battle::creature::{CreatureCatalog, CreatureType};
///
/// let mut catalog = CreatureCatalog::new();
/// let imp = catalog.register(CreatureType::new("Imp", 2, 3));
///
/// assert_eq!(catalog.get(imp).name, "Imp");
/// assert_eq!(catalog.by_name("Imp"), Some(imp));
/// ```
#[derive(Clone, Debug, Default)]
pub struct CreatureCatalog {
    types: Vec<CreatureType>,
    by_name: FxHashMap<String, CreatureId>,
}

impl CreatureCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a creature type and return its id.
    ///
    /// Panics if a type with the same name already exists.
    pub fn register(&mut self, creature: CreatureType) -> CreatureId {
        if self.by_name.contains_key(&creature.name) {
            panic!("Creature {:?} already registered", creature.name);
        }
        let id = CreatureId::new(self.types.len() as u16);
        self.by_name.insert(creature.name.clone(), id);
        self.types.push(creature);
        id
    }

    /// Get a creature type by id.
    ///
    /// Ids only come from this catalog, so a miss is a caller bug.
    #[must_use]
    pub fn get(&self, id: CreatureId) -> &CreatureType {
        &self.types[id.index()]
    }

    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<CreatureId> {
        self.by_name.get(name).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CreatureId, &CreatureType)> {
        self.types
            .iter()
            .enumerate()
            .map(|(i, c)| (CreatureId::new(i as u16), c))
    }

    /// Creatures a legion may summon into battle.
    pub fn summonables(&self) -> impl Iterator<Item = (CreatureId, &CreatureType)> {
        self.iter().filter(|(_, c)| c.summonable)
    }

    /// The default creature list.
    #[must_use]
    pub fn standard() -> Self {
        use Native::*;

        let mut catalog = Self::new();
        let types = [
            CreatureType::new("Angel", 6, 4).lord().flier().summonable().with_max_count(18),
            CreatureType::new("Archangel", 9, 4).lord().flier().summonable().with_max_count(6),
            CreatureType::new("Behemoth", 8, 3).native_to(Bramble).with_max_count(18),
            CreatureType::new("Centaur", 3, 4).with_max_count(25),
            CreatureType::new("Colossus", 10, 4)
                .native_to(Drift)
                .native_to(Slope)
                .with_max_count(10),
            CreatureType::new("Cyclops", 9, 2).native_to(Bramble).with_max_count(28),
            CreatureType::new("Dragon", 9, 3)
                .flier()
                .rangestriker()
                .native_to(Volcano)
                .native_to(Slope)
                .with_max_count(18),
            CreatureType::new("Gargoyle", 4, 3).flier().native_to(Bramble).with_max_count(21),
            CreatureType::new("Giant", 7, 4).rangestriker().native_to(Drift).with_max_count(18),
            CreatureType::new("Gorgon", 6, 3)
                .flier()
                .rangestriker()
                .native_to(Bramble)
                .with_max_count(25),
            CreatureType::new("Griffon", 5, 4)
                .flier()
                .native_to(Sand)
                .native_to(Dune)
                .with_max_count(18),
            CreatureType::new("Guardian", 12, 2).flier().demilord().with_max_count(6),
            CreatureType::new("Hydra", 10, 3)
                .rangestriker()
                .native_to(Sand)
                .native_to(Dune)
                .native_to(Bog)
                .with_max_count(10),
            CreatureType::new("Lion", 5, 3).native_to(Sand).native_to(Dune).with_max_count(28),
            CreatureType::new("Minotaur", 4, 4).rangestriker().native_to(Slope).with_max_count(21),
            CreatureType::new("Ogre", 6, 2).native_to(Bog).with_max_count(25),
            CreatureType::new("Ranger", 4, 4)
                .flier()
                .rangestriker()
                .native_to(Bog)
                .with_max_count(28),
            CreatureType::new("Serpent", 18, 2).native_to(Bramble).with_max_count(10),
            CreatureType::new("Titan", 6, 4).titan().with_max_count(1),
            CreatureType::new("Troll", 8, 2).native_to(Bog).native_to(Drift).with_max_count(28),
            CreatureType::new("Unicorn", 6, 4).native_to(Slope).with_max_count(12),
            CreatureType::new("Warbear", 6, 3).native_to(Drift).with_max_count(21),
            CreatureType::new("Warlock", 5, 4).magic_missile().demilord().with_max_count(6),
            CreatureType::new("Wyvern", 7, 3).flier().native_to(Bog).with_max_count(18),
        ];
        for creature in types {
            catalog.register(creature);
        }
        catalog
    }
}
