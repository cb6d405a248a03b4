//! Creature types, the catalog and the caretaker's stock.

pub mod caretaker;
pub mod catalog;
pub mod definition;

pub use caretaker::Caretaker;
pub use catalog::CreatureCatalog;
pub use definition::{CreatureId, CreatureType};
