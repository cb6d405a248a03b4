//! Carry discovery, strike penalties and fixed-dice strike resolution.

mod common;

use proptest::prelude::*;
use titan_battle::battle::{Battle, BattleEvent, BattlePhase, LegionSpec, StrikeOutcome};
use titan_battle::core::{BattleError, Dice, Side};
use titan_battle::terrain::MasterTerrain;

use common::{builder, hex, no_skip, tag_at, FIXED_ROLLS};

/// A hydra in the Desert hemmed in by two centaurs, a lion and a colossus.
fn desert_hydra() -> Battle {
    desert_hydra_rolling(Dice::fixed(FIXED_ROLLS.to_vec()))
}

fn desert_hydra_rolling(dice: Dice) -> Battle {
    builder(MasterTerrain::Desert)
        .config(no_skip())
        .starting_at(2, BattlePhase::Fight, Side::Defender)
        .dice(dice)
        .attacker(
            LegionSpec::new("Rd03", "Red")
                .entry_side(5)
                .creature_at("Centaur", "C5")
                .creature_at("Centaur", "D6")
                .creature_at("Lion", "E4")
                .creature_at("Colossus", "C4"),
        )
        .defender(LegionSpec::new("Bu03", "Blue").creature_at("Hydra", "D5"))
        .build()
        .unwrap()
}

/// A colossus on the Plains against a wounded gargoyle and two ogres.
fn plains_colossus() -> Battle {
    plains_colossus_rolling(Dice::fixed(FIXED_ROLLS.to_vec()))
}

fn plains_colossus_rolling(dice: Dice) -> Battle {
    builder(MasterTerrain::Plains)
        .config(no_skip())
        .starting_at(3, BattlePhase::Fight, Side::Attacker)
        .dice(dice)
        .attacker(
            LegionSpec::new("Rd03", "Red")
                .entry_side(5)
                .creature_at("Warlock", "A3")
                .creature_at("Warlock", "B4")
                .creature_at("Colossus", "E3"),
        )
        .defender(
            LegionSpec::new("Bu03", "Blue")
                .creature_at("Gargoyle", "D3")
                .with_hits(3)
                .creature_at("Ogre", "E2")
                .with_hits(5)
                .creature_at("Ogre", "F2")
                .with_hits(5),
        )
        .build()
        .unwrap()
}

fn carry_counts(battle: &Battle, striker: &str, target: &str) -> (usize, usize) {
    let striker = battle.critter_at(hex(battle, striker)).unwrap();
    let target = battle.critter_at(hex(battle, target)).unwrap();
    let plan = battle.find_carries(striker, target);
    (plan.free_targets.len(), plan.options.len())
}

// =============================================================================
// Strike Math
// =============================================================================

#[test]
fn test_hydra_dice_and_strike_numbers() {
    let battle = desert_hydra();
    let hydra = tag_at(&battle, "D5");

    let targets = battle.strike_targets(hydra, true).unwrap();
    assert_eq!(targets.len(), 4);

    let expected = [("C5", 10, 5), ("D6", 10, 5), ("E4", 10, 4), ("C4", 12, 5)];
    for (label, dice, strike_number) in expected {
        let preview = battle.preview_strike(hydra, hex(&battle, label)).unwrap();
        assert_eq!(preview.dice, dice, "dice against {}", label);
        assert_eq!(preview.strike_number, strike_number, "strike number against {}", label);
        assert!(!preview.rangestrike);
    }
}

#[test]
fn test_colossus_dice_and_strike_numbers() {
    let battle = plains_colossus();
    let colossus = tag_at(&battle, "E3");

    let expected = [("D3", 10, 3), ("E2", 10, 2), ("F2", 10, 2)];
    for (label, dice, strike_number) in expected {
        let preview = battle.preview_strike(colossus, hex(&battle, label)).unwrap();
        assert_eq!((preview.dice, preview.strike_number), (dice, strike_number), "{}", label);
    }
}

// =============================================================================
// Carry Discovery
// =============================================================================

#[test]
fn test_hydra_carries() {
    let battle = desert_hydra();

    assert_eq!(carry_counts(&battle, "D5", "C5"), (3, 0));
    assert_eq!(carry_counts(&battle, "D5", "D6"), (3, 0));
    assert_eq!(carry_counts(&battle, "D5", "E4"), (0, 2));
    assert_eq!(carry_counts(&battle, "D5", "C4"), (0, 0));
}

#[test]
fn test_colossus_carries() {
    let battle = plains_colossus();

    assert_eq!(carry_counts(&battle, "E3", "D3"), (2, 0));
    assert_eq!(carry_counts(&battle, "E3", "E2"), (1, 2));
    assert_eq!(carry_counts(&battle, "E3", "F2"), (1, 2));

    let colossus = battle.critter_at(hex(&battle, "E3")).unwrap();
    let ogre = battle.critter_at(hex(&battle, "E2")).unwrap();
    let plan = battle.find_carries(colossus, ogre);
    // The harder strike number comes first and reaches both other targets.
    assert_eq!(plan.options[0].strike_number, 3);
    assert_eq!(plan.options[0].carry_targets.len(), 2);
    assert_eq!(plan.options[1].strike_number, 2);
    assert_eq!(plan.options[1].carry_targets.len(), 1);
}

// =============================================================================
// Strike Resolution
// =============================================================================

#[test]
fn test_fixed_dice_strike_and_carries() {
    let mut battle = plains_colossus();
    let colossus = tag_at(&battle, "E3");
    let (d3, e2, f2) = (hex(&battle, "D3"), hex(&battle, "E2"), hex(&battle, "F2"));

    let StrikeOutcome::Resolved(report) = battle.strike(Side::Attacker, colossus, d3).unwrap() else {
        panic!("no penalty choice expected against the gargoyle");
    };
    // 4 3 1 6 5 2 4 3 1 6 against a 3.
    assert_eq!(report.rolls.as_slice(), &[4, 3, 1, 6, 5, 2, 4, 3, 1, 6]);
    assert_eq!(report.hits, 7);
    assert!(report.killed);
    assert_eq!(report.carry, 6);
    assert_eq!(battle.carry_damage(), 6);
    assert_eq!(battle.carry_targets().len(), 2);

    assert_eq!(battle.apply_carry(Side::Attacker, e2).unwrap(), 1);
    assert_eq!(battle.carry_damage(), 5);
    assert_eq!(battle.carry_targets(), &[f2]);
    assert_eq!(battle.apply_carry(Side::Attacker, f2).unwrap(), 1);

    // Carries never exceed the primary strike's hits.
    assert_eq!(battle.carry_damage(), 0);
    assert!(battle.carry_targets().is_empty());
    assert!(battle.living_critters(Side::Defender).next().is_none());
}

#[test]
fn test_penalty_choice_pauses_strike() {
    let mut battle = plains_colossus();
    let colossus = tag_at(&battle, "E3");
    let e2 = hex(&battle, "E2");

    let StrikeOutcome::AwaitingPenalty(options) = battle.strike(Side::Attacker, colossus, e2).unwrap() else {
        panic!("penalty choice expected against an ogre");
    };
    assert_eq!(options.len(), 2);
    assert!(battle.pending().is_some());

    // Nothing else is legal until the choice is made.
    let err = battle.done_with_strikes(Side::Attacker).unwrap_err();
    assert!(matches!(err, BattleError::DecisionPending));
    let err = battle.choose_penalty(Side::Attacker, 5).unwrap_err();
    assert!(matches!(err, BattleError::UnknownPenaltyOption { index: 5, count: 2 }));

    let report = battle.choose_penalty(Side::Attacker, 0).unwrap();
    assert_eq!(report.strike_number, 3);
    assert_eq!(report.hits, 7);
    assert_eq!(report.carry, 6);
    assert_eq!(battle.carry_targets().len(), 2);
    assert!(battle.pending().is_none());
}

#[test]
fn test_carry_rejections() {
    let mut battle = plains_colossus();
    let colossus = tag_at(&battle, "E3");
    let (d3, b4) = (hex(&battle, "D3"), hex(&battle, "B4"));

    let err = battle.apply_carry(Side::Attacker, d3).unwrap_err();
    assert!(matches!(err, BattleError::NoCarryPending));

    battle.strike(Side::Attacker, colossus, d3).unwrap();
    let err = battle.apply_carry(Side::Attacker, b4).unwrap_err();
    assert!(matches!(err, BattleError::IllegalCarry(_)));
    assert_eq!(battle.carry_damage(), 6);

    let err = battle.strike(Side::Attacker, colossus, d3).unwrap_err();
    assert!(matches!(err, BattleError::AlreadyStruck(_)));
}

#[test]
fn test_second_strike_reports_already_struck_for_any_target() {
    let mut battle = plains_colossus();
    let colossus = tag_at(&battle, "E3");
    battle.strike(Side::Attacker, colossus, hex(&battle, "D3")).unwrap();

    // An ally, an empty hex and a living enemy all give the same answer.
    for label in ["B4", "A1", "E2"] {
        let err = battle.strike(Side::Attacker, colossus, hex(&battle, label)).unwrap_err();
        assert!(matches!(err, BattleError::AlreadyStruck(tag) if tag == colossus), "{}", label);
    }
}

#[test]
fn test_excess_without_carry_targets_reports_no_carry() {
    // Twelve dice against the colossus, but the neighbours only draw ten,
    // which cannot beat its ten remaining hits.
    let mut battle = desert_hydra_rolling(Dice::fixed(vec![6]));
    let hydra = tag_at(&battle, "D5");

    let StrikeOutcome::Resolved(report) = battle.strike(Side::Defender, hydra, hex(&battle, "C4")).unwrap() else {
        panic!("no penalty choice expected against the colossus");
    };
    assert_eq!(report.hits, 12);
    assert!(report.killed);
    assert!(report.carry_targets.is_empty());
    assert_eq!(report.carry, 0);
    assert_eq!(battle.carry_damage(), 0);

    let events = battle.take_events();
    assert!(events
        .iter()
        .any(|e| matches!(e, BattleEvent::Strike(r) if r.carry == 0 && r.hits == 12)));
}

#[test]
fn test_strike_validation() {
    let mut battle = plains_colossus();
    let colossus = tag_at(&battle, "E3");
    let warlock = tag_at(&battle, "A3");

    let err = battle.strike(Side::Defender, colossus, hex(&battle, "D3")).unwrap_err();
    assert!(matches!(err, BattleError::NotActiveSide { .. }));

    let err = battle.strike(Side::Attacker, colossus, hex(&battle, "B4")).unwrap_err();
    assert!(matches!(err, BattleError::AlliedTarget { .. }));

    let err = battle.strike(Side::Attacker, colossus, hex(&battle, "A1")).unwrap_err();
    assert!(matches!(err, BattleError::IllegalStrike { .. }));

    // Out of reach.
    let err = battle.strike(Side::Attacker, warlock, hex(&battle, "F2")).unwrap_err();
    assert!(matches!(err, BattleError::IllegalStrike { .. }));
}

// =============================================================================
// Full Exchange
// =============================================================================

#[test]
fn test_wiped_defender_loses_after_strikeback() {
    let mut battle = plains_colossus();
    let colossus = tag_at(&battle, "E3");
    let (d3, e2, f2) = (hex(&battle, "D3"), hex(&battle, "E2"), hex(&battle, "F2"));

    battle.strike(Side::Attacker, colossus, d3).unwrap();
    battle.apply_carry(Side::Attacker, e2).unwrap();
    battle.apply_carry(Side::Attacker, f2).unwrap();
    battle.done_with_strikes(Side::Attacker).unwrap();

    // The dead still strike back before they are swept.
    assert_eq!(battle.phase(), BattlePhase::Strikeback);
    assert_eq!(battle.active_side(), Side::Defender);
    assert!(battle.is_forced_strike_remaining());
    let err = battle.done_with_strikes(Side::Defender).unwrap_err();
    assert!(matches!(err, BattleError::ForcedStrikesRemain));

    battle.make_forced_strikes(false).unwrap();
    assert!(!battle.is_forced_strike_remaining());
    battle.done_with_strikes(Side::Defender).unwrap();

    assert!(battle.is_over());
    let outcome = battle.outcome().unwrap();
    assert!(outcome.is_winner(Side::Attacker));
    assert_eq!(outcome.eliminated_legions, vec!["Bu03".to_string()]);
    // Gargoyle 4x3 plus two ogres at 6x2.
    assert_eq!(outcome.points[Side::Attacker], 36);

    let events = battle.take_events();
    let killed = events
        .iter()
        .filter(|e| matches!(e, BattleEvent::CritterKilled { side: Side::Defender, .. }))
        .count();
    assert_eq!(killed, 3);
    assert!(events.iter().any(|e| matches!(e, BattleEvent::BattleOver { winner: Some(Side::Attacker) })));
}

// =============================================================================
// Conservation
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Carries only ever pass on what the primary target could not absorb,
    /// and never more than the dice rolled.
    #[test]
    fn prop_carries_never_exceed_hits(
        rolls in prop::collection::vec(1u8..=6, 1..12),
        at_ogre in any::<bool>(),
        option in 0usize..2,
    ) {
        let mut battle = plains_colossus_rolling(Dice::fixed(rolls.clone()));
        let colossus = tag_at(&battle, "E3");
        let target_hex = hex(&battle, if at_ogre { "E2" } else { "D3" });
        let prior = battle.critter_at(target_hex).unwrap().remaining();

        let report = match battle.strike(Side::Attacker, colossus, target_hex).unwrap() {
            StrikeOutcome::Resolved(report) => report,
            StrikeOutcome::AwaitingPenalty(options) => {
                prop_assert!(at_ogre);
                battle.choose_penalty(Side::Attacker, option.min(options.len() - 1)).unwrap()
            }
        };

        let expected_hits = (0..report.dice as usize)
            .filter(|&i| rolls[i % rolls.len()] >= report.strike_number)
            .count() as u8;
        prop_assert_eq!(report.hits, expected_hits);
        prop_assert!(report.hits <= report.dice);
        prop_assert_eq!(report.carry, report.hits.saturating_sub(prior));
        prop_assert_eq!(battle.carry_damage(), report.carry);

        let mut carried = 0u8;
        while let Some(&next) = battle.carry_targets().first() {
            if battle.carry_damage() == 0 {
                break;
            }
            carried += battle.apply_carry(Side::Attacker, next).unwrap();
        }
        prop_assert!(carried <= report.carry);
        prop_assert!(report.hits.min(prior) + carried <= report.hits);
        prop_assert!(report.hits.min(prior) + carried <= report.dice);
    }
}
