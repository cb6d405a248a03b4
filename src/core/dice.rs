//! Die roll sources.
//!
//! The battle never calls a global random function. It owns a `Dice`
//! value, which is either a seeded `GameRng` or a `FixedDice` sequence
//! substituted by tests and replays.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::rng::{GameRng, GameRngState};

/// Rolls of a single strike. Most strikes roll a dozen dice or fewer.
pub type Rolls = SmallVec<[u8; 12]>;

/// A source of six-sided die rolls.
pub trait DieRoller {
    /// Roll one die, returning a value in `1..=6`.
    fn roll(&mut self) -> u8;

    /// Roll `count` dice.
    fn roll_dice(&mut self, count: usize) -> Rolls {
        (0..count).map(|_| self.roll()).collect()
    }
}

/// A fixed die sequence that repeats once exhausted.
///
/// ```
/// use titan_battle::core::{DieRoller, FixedDice};
///
/// let mut dice = FixedDice::new(vec![4, 3, 1, 6, 5, 2]);
/// assert_eq!(dice.roll_dice(8).as_slice(), &[4, 3, 1, 6, 5, 2, 4, 3]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedDice {
    sequence: Vec<u8>,
    position: usize,
}

impl FixedDice {
    /// Create a fixed source.
    ///
    /// Panics if the sequence is empty or holds a value outside `1..=6`.
    pub fn new(sequence: Vec<u8>) -> Self {
        assert!(!sequence.is_empty(), "Fixed dice need at least one roll");
        assert!(
            sequence.iter().all(|r| (1..=6).contains(r)),
            "Fixed dice rolls must be in 1..=6"
        );
        Self {
            sequence,
            position: 0,
        }
    }

    /// Number of dice rolled so far.
    #[must_use]
    pub fn rolled(&self) -> usize {
        self.position
    }
}

impl DieRoller for FixedDice {
    fn roll(&mut self) -> u8 {
        let value = self.sequence[self.position % self.sequence.len()];
        self.position += 1;
        value
    }
}

/// The die source a battle owns.
#[derive(Clone, Debug)]
pub enum Dice {
    Seeded(GameRng),
    Fixed(FixedDice),
}

impl Dice {
    /// Uniform dice from a seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Dice::Seeded(GameRng::new(seed))
    }

    /// A fixed repeating sequence.
    pub fn fixed(sequence: Vec<u8>) -> Self {
        Dice::Fixed(FixedDice::new(sequence))
    }

    /// Independent source for a sandbox copy.
    ///
    /// Seeded dice fork; fixed dice continue from the same position.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        match self {
            Dice::Seeded(rng) => Dice::Seeded(rng.fork()),
            Dice::Fixed(fixed) => Dice::Fixed(fixed.clone()),
        }
    }

    #[must_use]
    pub fn state(&self) -> DiceState {
        match self {
            Dice::Seeded(rng) => DiceState::Seeded(rng.state()),
            Dice::Fixed(fixed) => DiceState::Fixed(fixed.clone()),
        }
    }

    #[must_use]
    pub fn from_state(state: &DiceState) -> Self {
        match state {
            DiceState::Seeded(rng) => Dice::Seeded(GameRng::from_state(rng)),
            DiceState::Fixed(fixed) => Dice::Fixed(fixed.clone()),
        }
    }
}

impl DieRoller for Dice {
    fn roll(&mut self) -> u8 {
        match self {
            Dice::Seeded(rng) => rng.roll(),
            Dice::Fixed(fixed) => fixed.roll(),
        }
    }
}

/// Serializable form of `Dice`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiceState {
    Seeded(GameRngState),
    Fixed(FixedDice),
}
