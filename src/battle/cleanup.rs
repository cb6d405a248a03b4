//! The dead sweep, elimination checks and time loss.

use tracing::{error, info};

use super::critter::{Critter, Origin};
use super::outcome::{BattleEvent, BattleOutcome, PlayerElimination};
use super::phase::{SummonOption, SummonState};
use super::state::Battle;
use crate::core::{Side, SideMap};

impl Battle {
    /// Remove dead critters, settling points, stock and first blood.
    ///
    /// Afterwards `eliminated` marks each side with no living critter or
    /// whose owner's Titan has died.
    pub(super) fn remove_dead_critters(&mut self) {
        let mut eliminated = SideMap::with_value(true);
        let mut dead = Vec::new();
        for side in Side::ALL {
            for critter in self.side_critters(side) {
                if critter.is_dead() {
                    dead.push(critter.clone());
                } else {
                    eliminated[side] = false;
                }
            }
        }

        for critter in &dead {
            self.cleanup_dead_critter(critter);
        }
        self.critters = self.critters.iter().filter(|c| !c.is_dead()).cloned().collect();

        for side in Side::ALL {
            if self.legions[side].titan_eliminated {
                eliminated[side] = true;
            }
        }
        self.eliminated = eliminated;
    }

    fn cleanup_dead_critter(&mut self, critter: &Critter) {
        let side = critter.side;
        let creature = self.catalog.get(critter.creature).clone();
        let on_entrance = self.board.is_entrance(critter.current);
        let mut back_to_stock = true;

        info!(critter = %critter.tag, creature = %creature.name, side = %side, "critter removed");
        self.events.push(BattleEvent::CritterKilled {
            tag: critter.tag,
            creature: creature.name.clone(),
            side,
            hex: critter.current,
        });

        // After turn 1, late arrivals left off-board are undone rather
        // than scored.
        let unwound = on_entrance && self.turn > 1 && critter.origin != Origin::Roster;
        if unwound {
            match &critter.origin {
                Origin::Summoned { donor } => {
                    let option = SummonOption::new(creature.name.clone(), donor.clone());
                    let legion = &mut self.legions[Side::Attacker];
                    legion.summoned = false;
                    legion.summonables.push(option.clone());
                    info!(creature = %creature.name, donor = %donor, "summon undone");
                    self.events.push(BattleEvent::AngelReturned { option });
                    back_to_stock = false;
                }
                Origin::Reinforcement => {
                    self.legions[Side::Defender].recruited = None;
                    self.caretaker.put_one_back(&creature);
                    info!(creature = %creature.name, "reinforcement undone");
                    self.events.push(BattleEvent::ReinforcementUnwound {
                        creature: creature.name.clone(),
                    });
                    back_to_stock = false;
                }
                Origin::Roster => {}
            }
        } else {
            let scorer = side.opponent();
            self.legions[scorer].tally += critter.point_value();
            if side == Side::Defender && self.summon_state == SummonState::NoKills && !on_entrance {
                info!("first blood");
                self.summon_state = SummonState::FirstBlood;
                self.events.push(BattleEvent::FirstBlood);
            }
        }

        if creature.titan {
            self.legions[side].titan_eliminated = true;
            info!(owner = %self.legions[side].owner, "titan slain");
        } else if back_to_stock {
            if creature.immortal {
                self.caretaker.put_one_back(&creature);
            } else {
                self.caretaker.put_dead(&creature);
            }
        }
    }

    /// Decide whether the sweep ended the battle.
    pub(super) fn check_for_elimination(&mut self) {
        let mut outcome = self.base_outcome();
        let titan_dead = SideMap::new(|side| self.legions[side].titan_eliminated);
        let elim = self.eliminated.clone();

        if titan_dead[Side::Attacker] && titan_dead[Side::Defender] {
            for side in [Side::Defender, Side::Attacker] {
                self.eliminate_player(&mut outcome, side, None);
            }
        } else if let Some(loser) = Side::ALL.into_iter().find(|&s| titan_dead[s]) {
            let survivor = loser.opponent();
            let slayer = self.legions[survivor].owner.clone();
            if elim[survivor] {
                self.eliminate_legion(&mut outcome, survivor);
            } else {
                self.award_tally(&mut outcome, survivor);
                outcome.winner = Some(survivor);
            }
            self.eliminate_player(&mut outcome, loser, Some(slayer));
        } else if elim[Side::Attacker] && elim[Side::Defender] {
            self.eliminate_legion(&mut outcome, Side::Attacker);
            self.eliminate_legion(&mut outcome, Side::Defender);
        } else if let Some(loser) = Side::ALL.into_iter().rev().find(|&s| elim[s]) {
            let survivor = loser.opponent();
            self.award_tally(&mut outcome, survivor);
            self.eliminate_legion(&mut outcome, loser);
            outcome.winner = Some(survivor);
        } else {
            return;
        }

        self.finish(outcome);
    }

    /// The attacker ran out of turns.
    pub(super) fn time_loss(&mut self) {
        info!(turn = self.turn, "time loss: attacker eliminated");
        self.events.push(BattleEvent::TimeLoss);

        let mut outcome = self.base_outcome();
        outcome.time_loss = true;
        outcome.winner = Some(Side::Defender);
        self.eliminate_legion(&mut outcome, Side::Attacker);

        let has_titan = self
            .living_critters(Side::Attacker)
            .any(|c| self.creature_of(c).titan);
        if has_titan {
            let slayer = self.legions[Side::Defender].owner.clone();
            self.eliminate_player(&mut outcome, Side::Attacker, Some(slayer));
        }
        self.finish(outcome);
    }

    fn base_outcome(&self) -> BattleOutcome {
        BattleOutcome {
            attacker_entered: self.attacker_entered,
            turn: self.turn,
            ..BattleOutcome::default()
        }
    }

    fn award_tally(&mut self, outcome: &mut BattleOutcome, side: Side) {
        let points = self.legions[side].tally;
        outcome.points[side] += points;
        info!(side = %side, points, "points awarded");
        self.events.push(BattleEvent::PointsAwarded { side, points });
    }

    fn eliminate_legion(&mut self, outcome: &mut BattleOutcome, side: Side) {
        let marker = self.legions[side].marker.clone();
        info!(marker = %marker, "legion eliminated");
        outcome.eliminated_legions.push(marker.clone());
        self.events.push(BattleEvent::LegionEliminated { side, marker });
    }

    fn eliminate_player(&mut self, outcome: &mut BattleOutcome, side: Side, slayer: Option<String>) {
        let player = self.legions[side].owner.clone();
        info!(player = %player, slayer = ?slayer, "player eliminated");
        if !outcome.eliminated_legions.contains(&self.legions[side].marker) {
            self.eliminate_legion(outcome, side);
        }
        outcome.eliminated_players.push(PlayerElimination {
            player: player.clone(),
            slayer: slayer.clone(),
        });
        self.events.push(BattleEvent::PlayerEliminated { player, slayer });
    }

    fn finish(&mut self, outcome: BattleOutcome) {
        if self.over {
            error!("battle finished twice");
            return;
        }
        self.over = true;
        self.pending = None;
        self.leave_carry_mode();
        info!(winner = ?outcome.winner, turn = outcome.turn, "battle over");
        self.events.push(BattleEvent::BattleOver {
            winner: outcome.winner,
        });
        self.outcome = Some(outcome);
    }
}
