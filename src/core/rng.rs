//! Seeded ChaCha8 streams for dice and random decision providers.
//!
//! A battle's dice and every provider draw from separate streams, so a
//! provider's choices never shift the die rolls of a replay. A stream's
//! position is a single word counter, which makes snapshots cheap.
//!
//! ```
//! use titan_battle::core::{DieRoller, GameRng};
//!
//! let mut dice = GameRng::new(42);
//! let mut what_if = dice.fork();
//!
//! let mut again = GameRng::new(42);
//! assert_eq!(what_if.roll_dice(6), again.fork().roll_dice(6));
//! ```

use std::hash::{Hash, Hasher};

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};

use super::dice::DieRoller;

/// Golden-ratio step between fork seeds.
const FORK_STEP: u64 = 0x9E37_79B9_7F4A_7C15;

/// A reproducible random stream.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    forks: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            forks: 0,
        }
    }

    /// Split off an independent stream. The n-th fork of a given seed is
    /// always the same stream.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.forks += 1;
        Self::new(self.seed.wrapping_add(self.forks.wrapping_mul(FORK_STEP)))
    }

    /// A stream derived from this seed and a name, untouched by draws on
    /// this one.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let mut hasher = FxHasher::default();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Uniform index in `range`. Panics on an empty range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// True with the given probability.
    pub fn gen_bool(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability)
    }

    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.inner)
    }

    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            forks: self.forks,
        }
    }

    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut rng = Self::new(state.seed);
        rng.inner.set_word_pos(state.word_pos);
        rng.forks = state.forks;
        rng
    }
}

impl DieRoller for GameRng {
    fn roll(&mut self) -> u8 {
        self.inner.gen_range(1..=6)
    }
}

/// Where a `GameRng` stands: its seed, how far it has been drawn, and
/// how many forks it has handed out.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    pub word_pos: u128,
    pub forks: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_rolls() {
        let mut a = GameRng::new(42);
        let mut b = GameRng::new(42);
        assert_eq!(a.roll_dice(50), b.roll_dice(50));
    }

    #[test]
    fn test_rolls_are_die_faces() {
        let mut rng = GameRng::new(7);
        let rolls = rng.roll_dice(600);
        assert!(rolls.iter().all(|&r| (1..=6).contains(&r)));
        for face in 1..=6u8 {
            assert!(rolls.contains(&face), "face {face} never rolled");
        }
    }

    #[test]
    fn test_forks_differ_from_parent_and_each_other() {
        let mut rng = GameRng::new(42);
        let mut first = rng.fork();
        let mut second = rng.fork();

        let parent = rng.roll_dice(20);
        let a = first.roll_dice(20);
        let b = second.roll_dice(20);
        assert_ne!(parent, a);
        assert_ne!(a, b);
    }

    #[test]
    fn test_context_stream_ignores_parent_draws() {
        let mut rng = GameRng::new(9);
        let mut before = rng.for_context("provider");
        rng.roll_dice(30);
        let mut after = rng.for_context("provider");
        assert_eq!(before.roll_dice(10), after.roll_dice(10));

        let mut other = rng.for_context("other");
        assert_ne!(GameRng::new(9).for_context("provider").roll_dice(10), other.roll_dice(10));
    }

    #[test]
    fn test_restore_resumes_mid_stream() {
        let mut rng = GameRng::new(42);
        rng.roll_dice(100);
        let state = rng.state();
        let expected = rng.roll_dice(10);

        let mut restored = GameRng::from_state(&state);
        assert_eq!(restored.roll_dice(10), expected);

        let json = serde_json::to_string(&state).unwrap();
        let decoded: GameRngState = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, state);
    }
}
