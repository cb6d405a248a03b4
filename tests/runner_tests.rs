//! Whole battles played by providers.

mod common;

use common::{builder, side_count, Skulker};
use titan_battle::battle::{Battle, BattleEvent, LegionSpec};
use titan_battle::core::{BattleConfig, BattleError, Side};
use titan_battle::rules::{BattleRunner, RandomProvider};
use titan_battle::terrain::MasterTerrain;

fn full_legions(master: MasterTerrain, seed: u64) -> Battle {
    builder(master)
        .config(BattleConfig::default().with_seed(seed))
        .defender(
            LegionSpec::new("Bu04", "Blue")
                .creature("Titan")
                .creature("Hydra")
                .creature("Gorgon")
                .creature("Ogre")
                .creature("Centaur")
                .creature("Warlock")
                .recruit("Troll"),
        )
        .attacker(
            LegionSpec::new("Rd06", "Red")
                .creature("Colossus")
                .creature("Ranger")
                .creature("Cyclops")
                .creature("Lion")
                .creature("Griffon")
                .summonable("Angel", "Rd02")
                .entry_side(5),
        )
        .build()
        .unwrap()
}

// ============================================================================
// Random play
// ============================================================================

#[test]
fn test_random_battles_finish_on_every_terrain() {
    for (i, master) in MasterTerrain::ALL.into_iter().enumerate() {
        let seed = 100 + i as u64;
        let mut battle = full_legions(master, seed);
        let outcome = BattleRunner::new()
            .run(&mut battle, &mut RandomProvider::new(seed), &mut RandomProvider::new(seed + 1))
            .unwrap();

        assert!(battle.is_over(), "{master} did not finish");
        assert!(!outcome.eliminated_legions.is_empty(), "{master}: nobody eliminated");
        if let Some(winner) = outcome.winner {
            assert!(side_count(&battle, winner) > 0 || outcome.time_loss);
            assert!(!outcome.eliminated_legions.contains(&battle.legion(winner).marker));
        }
        assert!(outcome.turn <= battle.config().max_turns + 1);
    }
}

#[test]
fn test_same_seeds_same_battle() {
    let play = |seed: u64| {
        let mut battle = full_legions(MasterTerrain::Jungle, seed);
        let outcome = BattleRunner::new()
            .run(&mut battle, &mut RandomProvider::new(7), &mut RandomProvider::new(8))
            .unwrap();
        (outcome, battle.take_events())
    };

    let (first, first_events) = play(3);
    let (second, second_events) = play(3);
    assert_eq!(first, second);
    assert_eq!(first_events, second_events);
    assert!(first_events
        .iter()
        .any(|e| matches!(e, BattleEvent::BattleOver { .. })));
}

// ============================================================================
// Step cap
// ============================================================================

#[test]
fn test_step_cap_reports_stall() {
    let mut battle = full_legions(MasterTerrain::Plains, 1);
    let err = BattleRunner::new()
        .with_max_steps(1)
        .run(&mut battle, &mut RandomProvider::new(1), &mut RandomProvider::new(2))
        .unwrap_err();
    assert!(matches!(err, BattleError::Stalled(1)));
}

#[test]
fn test_finished_battle_returns_outcome() {
    let mut battle = full_legions(MasterTerrain::Plains, 4);
    battle.concede(Side::Defender).unwrap();
    assert!(battle.is_over());

    let outcome = BattleRunner::new()
        .with_max_steps(0)
        .run(&mut battle, &mut Skulker, &mut Skulker)
        .unwrap();
    assert!(outcome.is_winner(Side::Attacker));
    assert!(outcome.is_player_eliminated("Blue"));
}
