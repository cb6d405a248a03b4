//! Creature stock.
//!
//! The caretaker tracks how many of each creature remain available to
//! recruit or summon, and how many have died for good. A battle owns one
//! and hands it back to the enclosing game when it ends.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::catalog::CreatureCatalog;
use super::definition::CreatureType;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caretaker {
    available: FxHashMap<String, u32>,
    dead: FxHashMap<String, u32>,
}

impl Caretaker {
    /// Empty stock. Creatures never seen start at their catalog maximum.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Full stock of every catalog creature.
    #[must_use]
    pub fn full(catalog: &CreatureCatalog) -> Self {
        let available = catalog
            .iter()
            .map(|(_, c)| (c.name.clone(), c.max_count))
            .collect();
        Self {
            available,
            dead: FxHashMap::default(),
        }
    }

    /// Force the count for one creature.
    pub fn set_available(&mut self, name: &str, count: u32) {
        self.available.insert(name.to_string(), count);
    }

    /// Copies left in stock.
    #[must_use]
    pub fn available(&self, creature: &CreatureType) -> u32 {
        self.available
            .get(&creature.name)
            .copied()
            .unwrap_or(creature.max_count)
    }

    /// Take one from stock. Returns false, leaving the stock unchanged,
    /// when none are left.
    pub fn take_one(&mut self, creature: &CreatureType) -> bool {
        let count = self.available(creature);
        if count == 0 {
            warn!(creature = %creature.name, "caretaker stock exhausted");
            return false;
        }
        if count == 1 {
            debug!(creature = %creature.name, "last one taken from stock");
        }
        self.available.insert(creature.name.clone(), count - 1);
        true
    }

    /// Return one to stock.
    pub fn put_one_back(&mut self, creature: &CreatureType) {
        let count = self.available(creature);
        self.available.insert(creature.name.clone(), count + 1);
    }

    /// Record a permanent death.
    pub fn put_dead(&mut self, creature: &CreatureType) {
        *self.dead.entry(creature.name.clone()).or_insert(0) += 1;
    }

    #[must_use]
    pub fn dead_count(&self, creature: &CreatureType) -> u32 {
        self.dead.get(&creature.name).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_and_return() {
        let ogre = CreatureType::new("Ogre", 6, 2).with_max_count(2);
        let mut caretaker = Caretaker::new();

        assert_eq!(caretaker.available(&ogre), 2);
        assert!(caretaker.take_one(&ogre));
        assert!(caretaker.take_one(&ogre));
        assert!(!caretaker.take_one(&ogre));
        assert_eq!(caretaker.available(&ogre), 0);

        caretaker.put_one_back(&ogre);
        assert_eq!(caretaker.available(&ogre), 1);
    }

    #[test]
    fn test_dead_count() {
        let troll = CreatureType::new("Troll", 8, 2);
        let mut caretaker = Caretaker::new();
        caretaker.put_dead(&troll);
        caretaker.put_dead(&troll);
        assert_eq!(caretaker.dead_count(&troll), 2);
    }

    #[test]
    fn test_full_stock() {
        let catalog = CreatureCatalog::standard();
        let caretaker = Caretaker::full(&catalog);
        let angel = catalog.get(catalog.by_name("Angel").unwrap());
        assert_eq!(caretaker.available(angel), 18);
    }
}
