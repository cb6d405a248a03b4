//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use titan_battle::battle::{Battle, BattleBuilder, CritterTag, LegionSpec, PenaltyOption, SummonOption};
use titan_battle::core::{BattleConfig, Side};
use titan_battle::creature::CreatureCatalog;
use titan_battle::rules::DecisionProvider;
use titan_battle::terrain::{HexId, MasterTerrain};

/// The die sequence used by fixed-dice tests.
pub const FIXED_ROLLS: [u8; 6] = [4, 3, 1, 6, 5, 2];

/// Route engine logs to the test harness. Filter with `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn catalog() -> Arc<CreatureCatalog> {
    Arc::new(CreatureCatalog::standard())
}

/// Config that keeps the battle in the phase a test sets up.
pub fn no_skip() -> BattleConfig {
    BattleConfig::default().with_skip_empty_phases(false)
}

pub fn builder(master: MasterTerrain) -> BattleBuilder {
    init_tracing();
    BattleBuilder::new(master, catalog())
}

/// Tag of the critter standing on `label`.
pub fn tag_at(battle: &Battle, label: &str) -> CritterTag {
    let hex = battle.hex(label).unwrap();
    battle.critter_at(hex).unwrap().tag
}

pub fn hex(battle: &Battle, label: &str) -> HexId {
    battle.hex(label).unwrap()
}

/// A two-creature skirmish on open ground.
pub fn plains_skirmish() -> Battle {
    builder(MasterTerrain::Plains)
        .defender(LegionSpec::new("Bu01", "Blue").creature("Ogre").creature("Centaur"))
        .attacker(LegionSpec::new("Rd01", "Red").creature("Troll").creature("Lion"))
        .build()
        .unwrap()
}

/// Steps off the entrance as far from the enemy as it can, then never
/// moves or strikes again unless forced.
pub struct Skulker;

impl DecisionProvider for Skulker {
    fn choose_move(&mut self, battle: &Battle, critter: CritterTag, moves: &[HexId]) -> Option<HexId> {
        let me = battle.critter(critter)?;
        if !battle.board().is_entrance(me.current) {
            return None;
        }
        let enemies: Vec<HexId> = battle.living_critters(me.side.opponent()).map(|c| c.current).collect();
        moves.iter().copied().max_by_key(|&m| {
            enemies
                .iter()
                .map(|&e| battle.board().range(m, e, true))
                .min()
                .unwrap_or(u32::MAX)
        })
    }

    fn choose_strike(&mut self, _battle: &Battle, _critter: CritterTag, _targets: &[HexId]) -> Option<HexId> {
        None
    }

    fn choose_penalty(&mut self, _battle: &Battle, options: &[PenaltyOption]) -> usize {
        options.len() - 1
    }

    fn choose_carry(&mut self, _battle: &Battle, _damage: u8, _targets: &[HexId]) -> Option<HexId> {
        None
    }

    fn choose_summon(&mut self, _battle: &Battle, _options: &[SummonOption]) -> Option<SummonOption> {
        None
    }

    fn choose_reinforcement(&mut self, _battle: &Battle, _options: &[String]) -> Option<String> {
        None
    }

    fn auto_forced_strikes(&self) -> bool {
        false
    }
}

pub fn side_count(battle: &Battle, side: Side) -> usize {
    battle.living_critters(side).count()
}
