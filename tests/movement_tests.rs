//! Move phase integration tests.

mod common;

use titan_battle::battle::{BattleEvent, BattlePhase, LegionSpec};
use titan_battle::core::{BattleError, Side};
use titan_battle::hex::Direction;
use titan_battle::terrain::{MasterTerrain, TerrainBoard, IMPASSIBLE_COST, NORMAL_COST, SLOW_COST};

use common::{builder, hex, no_skip, plains_skirmish, tag_at};

// =============================================================================
// Legal Moves
// =============================================================================

#[test]
fn test_entering_critter_has_board_moves() {
    let battle = plains_skirmish();
    let ogre = battle.side_critters(Side::Defender).next().unwrap().tag;

    let moves = battle.legal_moves(ogre, false).unwrap();
    assert!(!moves.is_empty());
    assert!(moves.iter().all(|&h| !battle.board().is_entrance(h)));
    assert!(battle.mobile_critters().contains(&ogre));
}

#[test]
fn test_engaged_critter_cannot_move() {
    let battle = builder(MasterTerrain::Plains)
        .config(no_skip())
        .starting_at(2, BattlePhase::Move, Side::Defender)
        .defender(LegionSpec::new("Bu01", "Blue").creature_at("Ogre", "D4"))
        .attacker(LegionSpec::new("Rd01", "Red").creature_at("Troll", "D5"))
        .build()
        .unwrap();

    let ogre = tag_at(&battle, "D4");
    assert!(battle.is_in_contact(ogre).unwrap());
    assert!(battle.legal_moves(ogre, false).unwrap().is_empty());
    assert!(battle.mobile_critters().is_empty());
}

#[test]
fn test_moves_exclude_current_hex_and_respect_skill() {
    let battle = builder(MasterTerrain::Plains)
        .config(no_skip())
        .starting_at(2, BattlePhase::Move, Side::Defender)
        .defender(LegionSpec::new("Bu01", "Blue").creature_at("Ogre", "D4"))
        .attacker(LegionSpec::new("Rd01", "Red").creature_at("Troll", "A1"))
        .build()
        .unwrap();

    let ogre = tag_at(&battle, "D4");
    let d4 = hex(&battle, "D4");
    let moves = battle.legal_moves(ogre, false).unwrap();
    assert!(!moves.contains(&d4));
    // Skill 2 on open ground: never more than two steps away.
    for &m in &moves {
        assert!(battle.board().range(d4, m, false) <= 3, "{}", battle.label(m));
    }
    assert!(moves.contains(&hex(&battle, "D5")));
    assert!(moves.contains(&hex(&battle, "D6")));
}

#[test]
fn test_tower_defender_starts_in_the_keep() {
    let battle = builder(MasterTerrain::Tower)
        .defender(LegionSpec::new("Bu01", "Blue").creature("Ogre").creature("Centaur"))
        .attacker(LegionSpec::new("Rd01", "Red").creature("Troll"))
        .build()
        .unwrap();

    let ogre = battle.side_critters(Side::Defender).next().unwrap().tag;
    let moves = battle.legal_moves(ogre, false).unwrap();
    assert_eq!(moves.len(), battle.board().start_list().len());
    assert!(moves.iter().all(|h| battle.board().start_list().contains(h)));
}

// =============================================================================
// Fliers
// =============================================================================

#[test]
fn test_flier_passes_over_a_ring_of_allies() {
    // D6 has only three neighbours, all taken.
    let ringed = |creature: &str| {
        builder(MasterTerrain::Plains)
            .config(no_skip())
            .starting_at(2, BattlePhase::Move, Side::Defender)
            .defender(
                LegionSpec::new("Bu01", "Blue")
                    .creature_at(creature, "D6")
                    .creature_at("Ogre", "C5")
                    .creature_at("Ogre", "D5")
                    .creature_at("Ogre", "E5"),
            )
            .attacker(LegionSpec::new("Rd01", "Red").creature_at("Troll", "A1"))
            .build()
            .unwrap()
    };

    let battle = ringed("Troll");
    assert!(battle.legal_moves(tag_at(&battle, "D6"), false).unwrap().is_empty());

    let battle = ringed("Gargoyle");
    let moves = battle.legal_moves(tag_at(&battle, "D6"), false).unwrap();
    for label in ["D4", "D3", "C4", "E4"] {
        assert!(moves.contains(&hex(&battle, label)), "{}", label);
    }
    for label in ["C5", "D5", "E5"] {
        assert!(!moves.contains(&hex(&battle, label)), "{}", label);
    }
}

#[test]
fn test_flier_crosses_cliff_a_walker_cannot() {
    // A cliff runs between B1 and C2 in the Mountains.
    let from_c2 = |creature: &str| {
        builder(MasterTerrain::Mountains)
            .config(no_skip())
            .starting_at(2, BattlePhase::Move, Side::Defender)
            .defender(LegionSpec::new("Bu01", "Blue").creature_at(creature, "C2"))
            .attacker(LegionSpec::new("Rd01", "Red").creature_at("Troll", "E5"))
            .build()
            .unwrap()
    };

    let battle = from_c2("Ogre");
    let b1 = hex(&battle, "B1");
    assert!(!battle.legal_moves(tag_at(&battle, "C2"), false).unwrap().contains(&b1));

    let battle = from_c2("Gargoyle");
    assert!(battle.legal_moves(tag_at(&battle, "C2"), false).unwrap().contains(&b1));
}

#[test]
fn test_landing_costs() {
    let catalog = common::catalog();
    let natives = |name: &str| catalog.get(catalog.by_name(name).unwrap()).natives;

    // Cliffs stop walkers but not fliers.
    let mountains = TerrainBoard::new(MasterTerrain::Mountains);
    let b1 = mountains.hex_by_label("B1").unwrap();
    assert_eq!(mountains.entry_cost(b1, Direction::NorthEast, natives("Ogre"), false), IMPASSIBLE_COST);
    assert_eq!(mountains.entry_cost(b1, Direction::NorthEast, natives("Angel"), true), NORMAL_COST);
    // Climbing a slope is slow on foot only.
    assert_eq!(mountains.entry_cost(b1, Direction::SouthEast, natives("Ogre"), false), SLOW_COST);
    assert_eq!(mountains.entry_cost(b1, Direction::SouthEast, natives("Angel"), true), NORMAL_COST);

    // Fliers land on sand at full speed but still wade into bramble.
    let desert = TerrainBoard::new(MasterTerrain::Desert);
    let a2 = desert.hex_by_label("A2").unwrap();
    assert_eq!(desert.entry_cost(a2, Direction::South, natives("Ogre"), false), SLOW_COST);
    assert_eq!(desert.entry_cost(a2, Direction::South, natives("Angel"), true), NORMAL_COST);

    let brush = TerrainBoard::new(MasterTerrain::Brush);
    let d5 = brush.hex_by_label("D5").unwrap();
    assert_eq!(brush.entry_cost(d5, Direction::North, natives("Angel"), true), SLOW_COST);
    assert_eq!(brush.entry_cost(d5, Direction::North, natives("Gargoyle"), true), NORMAL_COST);
}

// =============================================================================
// Move Operations
// =============================================================================

#[test]
fn test_move_and_undo() {
    let mut battle = plains_skirmish();
    let ogre = battle.side_critters(Side::Defender).next().unwrap().tag;
    let entrance = battle.entrance_of(Side::Defender);
    let target = battle.legal_moves(ogre, false).unwrap()[0];

    battle.do_move(Side::Defender, ogre, target).unwrap();
    assert_eq!(battle.critter(ogre).unwrap().current, target);
    assert!(battle.critter(ogre).unwrap().has_moved());
    assert!(battle.legal_moves(ogre, false).unwrap().is_empty());

    battle.undo_move(Side::Defender, ogre).unwrap();
    assert_eq!(battle.critter(ogre).unwrap().current, entrance);

    let events = battle.take_events();
    assert!(events.iter().any(|e| matches!(e, BattleEvent::CritterMoved { tag, .. } if *tag == ogre)));
    assert!(events.iter().any(|e| matches!(e, BattleEvent::MoveUndone { tag, .. } if *tag == ogre)));
}

#[test]
fn test_undo_all_moves() {
    let mut battle = plains_skirmish();
    let tags: Vec<_> = battle.side_critters(Side::Defender).map(|c| c.tag).collect();
    for &tag in &tags {
        let target = *battle.legal_moves(tag, false).unwrap().last().unwrap();
        battle.do_move(Side::Defender, tag, target).unwrap();
    }
    battle.undo_all_moves(Side::Defender).unwrap();
    let entrance = battle.entrance_of(Side::Defender);
    assert!(battle.side_critters(Side::Defender).all(|c| c.current == entrance));
}

#[test]
fn test_null_move_is_allowed() {
    let mut battle = plains_skirmish();
    let ogre = battle.side_critters(Side::Defender).next().unwrap().tag;
    let entrance = battle.entrance_of(Side::Defender);
    battle.do_move(Side::Defender, ogre, entrance).unwrap();
    assert!(!battle.critter(ogre).unwrap().has_moved());
}

#[test]
fn test_illegal_moves_change_nothing() {
    let mut battle = plains_skirmish();
    let ogre = battle.side_critters(Side::Defender).next().unwrap().tag;
    let troll = battle.side_critters(Side::Attacker).next().unwrap().tag;
    let before = battle.snapshot();

    // Far side of the board, out of an ogre's reach.
    let far = battle
        .board()
        .board_hexes()
        .map(|h| h.id)
        .find(|&h| !battle.legal_moves(ogre, false).unwrap().contains(&h))
        .unwrap();
    let err = battle.do_move(Side::Defender, ogre, far).unwrap_err();
    assert!(matches!(err, BattleError::IllegalMove { .. }));

    let err = battle.do_move(Side::Attacker, troll, far).unwrap_err();
    assert!(matches!(err, BattleError::NotActiveSide { .. }));

    let err = battle.do_move(Side::Defender, troll, far).unwrap_err();
    assert!(matches!(err, BattleError::NotOwnCritter { .. }));

    let err = battle.strike(Side::Defender, ogre, far).unwrap_err();
    assert!(matches!(err, BattleError::WrongPhase { .. }));

    assert_eq!(battle.snapshot(), before);
}

#[test]
fn test_done_with_moves_kills_stragglers() {
    let mut battle = plains_skirmish();
    let ogre = battle.side_critters(Side::Defender).next().unwrap().tag;
    let target = battle.legal_moves(ogre, false).unwrap()[0];
    battle.do_move(Side::Defender, ogre, target).unwrap();

    battle.done_with_moves(Side::Defender).unwrap();

    // The centaur stayed on the entrance and is gone.
    assert_eq!(battle.living_critters(Side::Defender).count(), 1);
    assert_eq!(battle.critter(ogre).unwrap().starting, target);
    assert!(battle
        .take_events()
        .iter()
        .any(|e| matches!(e, BattleEvent::CritterKilled { creature, .. } if creature == "Centaur")));
    // Nothing can strike yet, so play passes to the attacker's Move.
    assert_eq!(battle.phase(), BattlePhase::Move);
    assert_eq!(battle.active_side(), Side::Attacker);
    assert_eq!(battle.turn(), 1);
}

#[test]
fn test_attacker_entered_after_its_move() {
    let mut battle = builder(MasterTerrain::Plains)
        .starting_at(1, BattlePhase::Move, Side::Attacker)
        .defender(LegionSpec::new("Bu01", "Blue").creature_at("Ogre", "A1"))
        .attacker(LegionSpec::new("Rd01", "Red").creature("Troll"))
        .build()
        .unwrap();
    assert!(!battle.attacker_entered());

    let troll = battle.side_critters(Side::Attacker).next().unwrap().tag;
    let target = battle.legal_moves(troll, false).unwrap()[0];
    battle.do_move(Side::Attacker, troll, target).unwrap();
    battle.done_with_moves(Side::Attacker).unwrap();
    assert!(battle.attacker_entered());
}
