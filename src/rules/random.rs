//! Uniform-random decisions, for rollouts and soak tests.

use super::provider::DecisionProvider;
use crate::battle::{Battle, CritterTag, PenaltyOption, SummonOption};
use crate::core::GameRng;
use crate::terrain::HexId;

/// Picks uniformly among legal options.
///
/// Critters waiting on an entrance always move, since staying there is
/// fatal. Everything else, including passing, is a coin flip.
#[derive(Clone, Debug)]
pub struct RandomProvider {
    rng: GameRng,
}

impl RandomProvider {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed).for_context("random-provider"),
        }
    }

    #[must_use]
    pub fn from_rng(rng: GameRng) -> Self {
        Self { rng }
    }

    fn pick<T: Copy>(&mut self, options: &[T]) -> Option<T> {
        self.rng.choose(options).copied()
    }
}

impl DecisionProvider for RandomProvider {
    fn choose_move(&mut self, battle: &Battle, critter: CritterTag, moves: &[HexId]) -> Option<HexId> {
        let on_entrance = battle
            .critter(critter)
            .is_some_and(|c| battle.board().is_entrance(c.current));
        if on_entrance || self.rng.gen_bool(0.8) {
            self.pick(moves)
        } else {
            None
        }
    }

    fn choose_strike(&mut self, _battle: &Battle, _critter: CritterTag, targets: &[HexId]) -> Option<HexId> {
        self.pick(targets)
    }

    fn choose_penalty(&mut self, _battle: &Battle, options: &[PenaltyOption]) -> usize {
        self.rng.gen_range_usize(0..options.len().max(1))
    }

    fn choose_carry(&mut self, _battle: &Battle, _damage: u8, targets: &[HexId]) -> Option<HexId> {
        self.pick(targets)
    }

    fn choose_summon(&mut self, _battle: &Battle, options: &[SummonOption]) -> Option<SummonOption> {
        self.rng.choose(options).cloned()
    }

    fn choose_reinforcement(&mut self, _battle: &Battle, options: &[String]) -> Option<String> {
        self.rng.choose(options).cloned()
    }
}
