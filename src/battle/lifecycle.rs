//! The phase machine, summons, reinforcements and concession.
//!
//! Every phase has a setup step run on entry. A setup that returns `true`
//! asks the machine to move straight on, which is how empty phases are
//! skipped. The machine stops at the first phase that needs a decision.

use tracing::{debug, info, warn};

use super::critter::{Critter, Origin};
use super::outcome::BattleEvent;
use super::phase::{BattlePhase, PendingDecision, SummonOption, SummonState};
use super::state::Battle;
use crate::core::{BattleError, Result, Side};

/// Most creatures a legion may hold.
pub const MAX_LEGION_SIZE: usize = 7;

impl Battle {
    /// Run setup for the phase the battle was built in.
    pub(super) fn init(&mut self) {
        self.push_phase_event();
        if self.setup_phase() {
            self.advance_phase();
        }
    }

    pub(super) fn advance_phase(&mut self) {
        loop {
            if self.over {
                return;
            }
            let again = match self.phase {
                BattlePhase::Summon | BattlePhase::Recruit => self.enter(BattlePhase::Move),
                BattlePhase::Move => {
                    if self.active == Side::Attacker && !self.conceded {
                        self.attacker_entered = true;
                    }
                    self.enter(BattlePhase::Fight)
                }
                BattlePhase::Fight => {
                    self.active = self.active.opponent();
                    self.drift_applied = false;
                    self.enter(BattlePhase::Strikeback)
                }
                BattlePhase::Strikeback => {
                    self.remove_dead_critters();
                    self.check_for_elimination();
                    if self.over {
                        return;
                    }
                    if self.active == Side::Attacker {
                        self.enter(BattlePhase::Summon)
                    } else {
                        self.turn += 1;
                        if self.turn > self.config.max_turns {
                            self.time_loss();
                            return;
                        }
                        self.enter(BattlePhase::Recruit)
                    }
                }
            };
            if !again {
                return;
            }
        }
    }

    fn enter(&mut self, phase: BattlePhase) -> bool {
        self.phase = phase;
        info!(phase = %phase, active = %self.active, turn = self.turn, "battle phase");
        self.push_phase_event();
        self.setup_phase()
    }

    fn push_phase_event(&mut self) {
        self.events.push(BattleEvent::PhaseStarted {
            phase: self.phase,
            active: self.active,
            turn: self.turn,
        });
    }

    fn setup_phase(&mut self) -> bool {
        match self.phase {
            BattlePhase::Summon => self.setup_summon(),
            BattlePhase::Recruit => self.setup_recruit(),
            BattlePhase::Move => self.setup_move(),
            BattlePhase::Fight | BattlePhase::Strikeback => self.setup_fight(),
        }
    }

    fn setup_summon(&mut self) -> bool {
        let mut advance = true;
        if self.summon_state == SummonState::FirstBlood {
            if self.can_summon() {
                let options = self.legions[Side::Attacker].summonables.clone();
                info!(options = options.len(), "attacker may summon");
                self.events.push(BattleEvent::SummonAvailable {
                    options: options.clone(),
                });
                self.pending = Some(PendingDecision::Summon { options });
                advance = false;
            }
            // Only one chance per battle.
            self.summon_state = SummonState::TooLate;
        }
        advance
    }

    fn setup_recruit(&mut self) -> bool {
        if self.turn == self.config.reinforcement_turn && self.can_recruit() {
            let options = self.recruit_options();
            info!(options = options.len(), "defender may muster a reinforcement");
            self.events.push(BattleEvent::ReinforcementAvailable {
                options: options.clone(),
            });
            self.pending = Some(PendingDecision::Reinforcement { options });
            return false;
        }
        true
    }

    fn setup_move(&mut self) -> bool {
        if self.config.skip_empty_phases && self.mobile_critters().is_empty() {
            debug!(side = %self.active, "nothing can move; skipping Move");
            self.finish_moves();
            return true;
        }
        false
    }

    fn setup_fight(&mut self) -> bool {
        self.apply_drift_damage();
        if self.config.auto_forced_strikes {
            self.resolve_forced_strikes(false);
            if self.pending.is_some() {
                return false;
            }
        }
        if self.config.skip_empty_phases && !self.carry.is_active() && self.critters_with_targets().is_empty() {
            debug!(side = %self.active, phase = %self.phase, "nothing can strike; skipping");
            self.commit_strikes();
            return true;
        }
        false
    }

    /// Drift damage, once per Fight phase.
    fn apply_drift_damage(&mut self) {
        if self.phase != BattlePhase::Fight || self.drift_applied {
            return;
        }
        self.drift_applied = true;

        let mut damaged = Vec::new();
        for critter in self.critters.iter() {
            let natives = self.catalog.get(critter.creature).natives;
            let damage = self.board.damage_to(critter.current, natives);
            if damage > 0 {
                damaged.push((critter.tag, critter.current, damage));
            }
        }
        for (tag, hex, damage) in damaged {
            if let Some(critter) = self.critter_mut(tag) {
                critter.wound(damage);
            }
            info!(critter = %tag, damage, "critter takes hex damage");
            self.events.push(BattleEvent::HexDamage { tag, hex, damage });
        }
    }

    // === Summon and reinforcement ===

    /// The attacker has not summoned yet, has room, and has a donor.
    #[must_use]
    pub fn can_summon(&self) -> bool {
        let legion = &self.legions[Side::Attacker];
        !legion.summoned
            && !legion.summonables.is_empty()
            && self.living_critters(Side::Attacker).count() < MAX_LEGION_SIZE
    }

    /// The defender has not recruited yet, has room, and has something in
    /// stock to recruit.
    #[must_use]
    pub fn can_recruit(&self) -> bool {
        let legion = &self.legions[Side::Defender];
        legion.recruited.is_none()
            && self.living_critters(Side::Defender).count() < MAX_LEGION_SIZE
            && !self.recruit_options().is_empty()
    }

    fn recruit_options(&self) -> Vec<String> {
        self.legions[Side::Defender]
            .recruits
            .iter()
            .filter(|name| {
                self.catalog
                    .by_name(name)
                    .is_some_and(|id| self.caretaker.available(self.catalog.get(id)) > 0)
            })
            .cloned()
            .collect()
    }

    /// Answer a pending summon. `None` declines.
    pub fn summon_angel(&mut self, choice: Option<SummonOption>) -> Result<()> {
        if self.over {
            return Err(BattleError::BattleOver);
        }
        let Some(PendingDecision::Summon { options }) = &self.pending else {
            return Err(BattleError::NoDecisionPending);
        };

        if let Some(option) = choice {
            if !options.contains(&option) {
                warn!(creature = %option.creature, donor = %option.donor, "summon not on offer");
                return Err(BattleError::NotSummonable(option.creature));
            }
            let id = self
                .catalog
                .by_name(&option.creature)
                .ok_or_else(|| BattleError::UnknownCreature(option.creature.clone()))?;

            let tag = self.tags.next_tag();
            let entrance = self.entrance_of(Side::Attacker);
            let critter = Critter::new(tag, id, self.catalog.get(id), Side::Attacker, entrance).with_origin(
                Origin::Summoned {
                    donor: option.donor.clone(),
                },
            );
            self.critters.push_back(critter);

            let legion = &mut self.legions[Side::Attacker];
            legion.summoned = true;
            if let Some(pos) = legion.summonables.iter().position(|o| *o == option) {
                legion.summonables.remove(pos);
            }
            info!(critter = %tag, creature = %option.creature, donor = %option.donor, "angel summoned");
            self.events.push(BattleEvent::AngelSummoned { tag, option });
        } else {
            info!("attacker declines to summon");
        }

        self.pending = None;
        if self.phase == BattlePhase::Summon {
            self.advance_phase();
        }
        Ok(())
    }

    /// Answer a pending reinforcement. `None` declines.
    pub fn recruit_reinforcement(&mut self, choice: Option<&str>) -> Result<()> {
        if self.over {
            return Err(BattleError::BattleOver);
        }
        let Some(PendingDecision::Reinforcement { options }) = &self.pending else {
            return Err(BattleError::NoDecisionPending);
        };

        if let Some(name) = choice {
            if !options.iter().any(|o| o == name) {
                warn!(creature = name, "reinforcement not on offer");
                return Err(BattleError::UnknownCreature(name.to_string()));
            }
            let id = self
                .catalog
                .by_name(name)
                .ok_or_else(|| BattleError::UnknownCreature(name.to_string()))?;
            if !self.caretaker.take_one(self.catalog.get(id)) {
                return Err(BattleError::OutOfStock(name.to_string()));
            }

            let tag = self.tags.next_tag();
            let entrance = self.entrance_of(Side::Defender);
            let critter = Critter::new(tag, id, self.catalog.get(id), Side::Defender, entrance)
                .with_origin(Origin::Reinforcement);
            self.critters.push_back(critter);
            self.legions[Side::Defender].recruited = Some(name.to_string());

            info!(critter = %tag, creature = name, "reinforcement mustered");
            self.events.push(BattleEvent::ReinforcementRecruited {
                tag,
                creature: name.to_string(),
            });
        } else {
            info!("defender declines to reinforce");
        }

        self.pending = None;
        if self.phase == BattlePhase::Recruit {
            self.advance_phase();
        }
        Ok(())
    }

    // === Concession ===

    /// Give up: every critter on `side` dies. The battle moves on at once
    /// if the conceding side is active.
    pub fn concede(&mut self, side: Side) -> Result<()> {
        if self.over {
            return Err(BattleError::BattleOver);
        }
        info!(side = %side, marker = %self.legions[side].marker, "legion concedes");
        self.conceded = true;
        for critter in self.critters.iter_mut() {
            if critter.side == side {
                critter.set_dead();
            }
        }
        self.events.push(BattleEvent::Conceded { side });

        if side == self.active {
            self.pending = None;
            self.leave_carry_mode();
            self.advance_phase();
        }
        Ok(())
    }
}
