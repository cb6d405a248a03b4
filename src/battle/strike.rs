//! Fight and Strikeback operations.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::carry::{CarryPlan, CarryTargets, PenaltyOption};
use super::critter::CritterTag;
use super::outcome::BattleEvent;
use super::phase::PendingDecision;
use super::state::Battle;
use crate::core::{BattleError, DieRoller, Result, Rolls, Side};
use crate::terrain::HexId;

/// A rolled strike.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrikeReport {
    pub striker: CritterTag,
    pub target: CritterTag,
    pub dice: u8,
    pub strike_number: u8,
    pub rolls: Rolls,
    pub hits: u8,
    pub killed: bool,
    /// Damage left over for carries; zero when no carry is possible.
    pub carry: u8,
    pub carry_targets: CarryTargets,
}

/// What a call to `strike` did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StrikeOutcome {
    Resolved(StrikeReport),
    /// The striker must choose one of these with `choose_penalty` before
    /// the dice are rolled.
    AwaitingPenalty(Vec<PenaltyOption>),
}

impl Battle {
    fn ensure_fight_phase(&self, action: &'static str, side: Side) -> Result<()> {
        if self.over {
            return Err(BattleError::BattleOver);
        }
        if !self.phase.is_fight_phase() {
            return Err(BattleError::WrongPhase {
                action,
                phase: self.phase,
            });
        }
        self.ensure_active(side)
    }

    /// Strike the critter on `target_hex`.
    pub fn strike(&mut self, side: Side, tag: CritterTag, target_hex: HexId) -> Result<StrikeOutcome> {
        self.ensure_live()?;
        self.ensure_fight_phase("strike", side)?;
        let striker = self.ensure_own(side, tag)?;
        if striker.struck {
            warn!(striker = %tag, "critter tried to strike twice");
            return Err(BattleError::AlreadyStruck(tag));
        }
        let hex_label = || self.label(target_hex).to_string();

        let Some(target) = self.critter_at(target_hex) else {
            warn!(striker = %tag, hex = %hex_label(), "strike at an empty hex");
            return Err(BattleError::IllegalStrike { tag, hex: hex_label() });
        };
        if target.side == striker.side {
            warn!(striker = %tag, hex = %hex_label(), "strike at an ally");
            return Err(BattleError::AlliedTarget { tag, hex: hex_label() });
        }
        if !self.find_strikes(striker, true).contains(&target_hex) {
            warn!(striker = %tag, hex = %hex_label(), "illegal strike rejected");
            return Err(BattleError::IllegalStrike { tag, hex: hex_label() });
        }

        self.begin_strike(tag, target_hex)
            .ok_or_else(|| BattleError::IllegalStrike {
                tag,
                hex: self.label(target_hex).to_string(),
            })
    }

    /// Compute odds and carries, then roll or pause for a penalty choice.
    /// `None` if either critter has gone.
    fn begin_strike(&mut self, tag: CritterTag, target_hex: HexId) -> Option<StrikeOutcome> {
        self.leave_carry_mode();

        let striker = self.critter(tag)?;
        let target = self.critter_at(target_hex)?;
        let dice = self.dice_for(striker, target);
        let strike_number = self.strike_number_for(striker, target);
        let carry_possible = self.num_in_contact(striker, false) >= 2 && dice > target.remaining();
        let plan = if carry_possible {
            self.find_carries(striker, target)
        } else {
            CarryPlan::default()
        };
        let target_tag = target.tag;

        if !plan.options.is_empty() {
            info!(striker = %tag, options = plan.options.len(), "strike penalty choice required");
            self.pending = Some(PendingDecision::StrikePenalty {
                striker: tag,
                target: target_tag,
                options: plan.options.clone(),
            });
            return Some(StrikeOutcome::AwaitingPenalty(plan.options));
        }

        Some(StrikeOutcome::Resolved(self.roll_strike(
            tag,
            target_tag,
            dice,
            strike_number,
            carry_possible,
            plan.free_targets,
        )))
    }

    /// Pick one of the offered penalty options and roll the strike.
    pub fn choose_penalty(&mut self, side: Side, index: usize) -> Result<StrikeReport> {
        self.ensure_fight_phase("choose a strike penalty", side)?;
        let Some(PendingDecision::StrikePenalty {
            striker,
            target,
            options,
        }) = &self.pending
        else {
            return Err(BattleError::NoPenaltyPending);
        };
        let Some(option) = options.get(index) else {
            warn!(index, count = options.len(), "unknown penalty option");
            return Err(BattleError::UnknownPenaltyOption {
                index,
                count: options.len(),
            });
        };

        let (striker, target, option) = (*striker, *target, option.clone());
        self.pending = None;
        info!(striker = %striker, option = %option, "strike penalty chosen");
        let carry_possible = !option.carry_targets.is_empty();
        Ok(self.roll_strike(
            striker,
            target,
            option.dice,
            option.strike_number,
            carry_possible,
            option.carry_targets,
        ))
    }

    fn roll_strike(
        &mut self,
        striker: CritterTag,
        target: CritterTag,
        dice: u8,
        strike_number: u8,
        carry_possible: bool,
        carry_targets: CarryTargets,
    ) -> StrikeReport {
        let rolls = self.dice.roll_dice(dice as usize);
        let hits = rolls.iter().filter(|&&r| r >= strike_number).count() as u8;

        let (excess, killed) = match self.critter_mut(target) {
            Some(victim) => {
                let excess = victim.wound(hits);
                (excess, victim.is_dead())
            }
            None => (0, false),
        };
        if let Some(attacker) = self.critter_mut(striker) {
            attacker.struck = true;
        }
        let carry = if carry_possible && !carry_targets.is_empty() { excess } else { 0 };

        info!(
            striker = %striker,
            target = %target,
            strike_number,
            rolls = ?rolls.as_slice(),
            hits,
            carry,
            "strike"
        );

        self.carry.striker = Some(striker);
        self.carry.damage = carry;
        self.carry.targets = carry_targets.clone();
        if !self.carry.is_active() {
            self.carry.clear();
        } else {
            info!(carry, targets = self.carry.targets.len(), "carries available");
        }

        let report = StrikeReport {
            striker,
            target,
            dice,
            strike_number,
            rolls,
            hits,
            killed,
            carry,
            carry_targets,
        };
        self.events.push(BattleEvent::Strike(report.clone()));
        report
    }

    /// Put pending carry damage on the critter at `hex`. Returns the hits
    /// it took.
    pub fn apply_carry(&mut self, side: Side, hex: HexId) -> Result<u8> {
        self.ensure_live()?;
        self.ensure_fight_phase("carry", side)?;
        if !self.carry.is_active() {
            return Err(BattleError::NoCarryPending);
        }
        if !self.carry.targets.contains(&hex) {
            warn!(hex = %self.label(hex), "illegal carry rejected");
            return Err(BattleError::IllegalCarry(self.label(hex).to_string()));
        }

        let damage = self.carry.damage;
        let Some(target) = self.critter_at(hex).map(|c| c.tag) else {
            return Err(BattleError::IllegalCarry(self.label(hex).to_string()));
        };
        let remaining = self.critter_mut(target).map_or(damage, |c| c.wound(damage));
        let dealt = damage - remaining;

        self.carry.damage = remaining;
        self.carry.targets.retain(|h| *h != hex);
        info!(target = %target, dealt, remaining, "damage carries");
        self.events.push(BattleEvent::Carry {
            target,
            hits: dealt,
            remaining,
        });

        if !self.carry.is_active() {
            self.leave_carry_mode();
        }
        Ok(dealt)
    }

    /// Resolve every strike with exactly one choice, repeating while kills
    /// keep narrowing other critters down to a single target.
    ///
    /// Stops early if a strike needs a penalty choice.
    pub fn make_forced_strikes(&mut self, include_rangestrikes: bool) -> Result<()> {
        self.ensure_live()?;
        let active = self.active;
        self.ensure_fight_phase("make forced strikes", active)?;
        self.resolve_forced_strikes(include_rangestrikes);
        Ok(())
    }

    pub(super) fn resolve_forced_strikes(&mut self, include_rangestrikes: bool) {
        loop {
            let mut repeat = false;
            let strikers: Vec<CritterTag> = self.side_critters(self.active).map(|c| c.tag).collect();
            for tag in strikers {
                let Some(striker) = self.critter(tag) else {
                    continue;
                };
                let targets = self.find_strikes(striker, include_rangestrikes);
                if targets.len() != 1 {
                    continue;
                }
                let target_hex = targets[0];
                match self.begin_strike(tag, target_hex) {
                    Some(StrikeOutcome::Resolved(report)) => repeat |= report.killed,
                    Some(StrikeOutcome::AwaitingPenalty(_)) => return,
                    None => {}
                }
            }
            if !repeat {
                return;
            }
        }
    }

    /// End this side's strikes. Rejected while forced strikes remain.
    pub fn done_with_strikes(&mut self, side: Side) -> Result<()> {
        self.ensure_live()?;
        self.ensure_fight_phase("finish strikes", side)?;
        if self.is_forced_strike_remaining() {
            warn!(side = %side, "done with strikes while forced strikes remain");
            return Err(BattleError::ForcedStrikesRemain);
        }
        self.leave_carry_mode();
        self.commit_strikes();
        self.advance_phase();
        Ok(())
    }

    pub(super) fn commit_strikes(&mut self) {
        let active = self.active;
        for critter in self.critters.iter_mut() {
            if critter.side == active {
                critter.struck = false;
            }
        }
    }
}
