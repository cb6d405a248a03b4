//! Drive a battle to completion with one decision provider per side.
//!
//! The runner uses only the public `Battle` operations, so anything it
//! does a UI could do by hand. Each call into the battle counts as one
//! step; a battle that needs more than `max_steps` is reported as stalled.

use tracing::{debug, info};

use super::provider::DecisionProvider;
use crate::battle::{Battle, BattleOutcome, BattlePhase, PendingDecision, StrikeOutcome};
use crate::core::{BattleError, Result, Side};

const DEFAULT_MAX_STEPS: usize = 10_000;

/// Plays both sides of a battle through their providers.
#[derive(Clone, Debug)]
pub struct BattleRunner {
    pub max_steps: usize,
}

impl Default for BattleRunner {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

impl BattleRunner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_steps(mut self, steps: usize) -> Self {
        self.max_steps = steps;
        self
    }

    /// Play until the battle ends and return its outcome.
    pub fn run(
        &self,
        battle: &mut Battle,
        defender: &mut dyn DecisionProvider,
        attacker: &mut dyn DecisionProvider,
    ) -> Result<BattleOutcome> {
        let mut steps = 0;
        while !battle.is_over() {
            let active = battle.active_side();
            let provider: &mut dyn DecisionProvider = match active {
                Side::Defender => &mut *defender,
                Side::Attacker => &mut *attacker,
            };

            if let Some(pending) = battle.pending().cloned() {
                self.tick(&mut steps)?;
                Self::answer(battle, active, provider, pending)?;
                continue;
            }

            match battle.phase() {
                BattlePhase::Summon | BattlePhase::Recruit => return Err(BattleError::NoDecisionPending),
                BattlePhase::Move => self.play_moves(battle, active, provider, &mut steps)?,
                BattlePhase::Fight | BattlePhase::Strikeback => {
                    self.play_strikes(battle, active, provider, &mut steps)?
                }
            }
        }

        let outcome = battle.outcome().cloned().unwrap_or_default();
        info!(winner = ?outcome.winner, steps, "battle run complete");
        Ok(outcome)
    }

    fn tick(&self, steps: &mut usize) -> Result<()> {
        *steps += 1;
        if *steps > self.max_steps {
            return Err(BattleError::Stalled(self.max_steps));
        }
        Ok(())
    }

    fn answer(
        battle: &mut Battle,
        side: Side,
        provider: &mut dyn DecisionProvider,
        pending: PendingDecision,
    ) -> Result<()> {
        match pending {
            PendingDecision::Summon { options } => {
                let choice = provider.choose_summon(battle, &options);
                battle.summon_angel(choice)
            }
            PendingDecision::Reinforcement { options } => {
                let choice = provider.choose_reinforcement(battle, &options);
                battle.recruit_reinforcement(choice.as_deref())
            }
            PendingDecision::StrikePenalty { options, .. } => {
                let index = provider.choose_penalty(battle, &options);
                battle.choose_penalty(side, index)?;
                Ok(())
            }
        }
    }

    fn play_moves(
        &self,
        battle: &mut Battle,
        side: Side,
        provider: &mut dyn DecisionProvider,
        steps: &mut usize,
    ) -> Result<()> {
        for tag in battle.mobile_critters() {
            let moves = battle.legal_moves(tag, false)?;
            if moves.is_empty() {
                continue;
            }
            if let Some(hex) = provider.choose_move(battle, tag, &moves) {
                self.tick(steps)?;
                battle.do_move(side, tag, hex)?;
            }
        }
        self.tick(steps)?;
        battle.done_with_moves(side)
    }

    fn play_strikes(
        &self,
        battle: &mut Battle,
        side: Side,
        provider: &mut dyn DecisionProvider,
        steps: &mut usize,
    ) -> Result<()> {
        if provider.auto_forced_strikes() {
            self.tick(steps)?;
            battle.make_forced_strikes(false)?;
            if battle.pending().is_some() {
                return Ok(());
            }
        }

        loop {
            self.resolve_carries(battle, side, provider, steps)?;
            let mut struck = false;
            for tag in battle.critters_with_targets() {
                let targets = battle.strike_targets(tag, true)?;
                if targets.is_empty() {
                    continue;
                }
                let forced = battle.is_in_contact(tag)?;
                let hex = match provider.choose_strike(battle, tag, &targets) {
                    Some(hex) => hex,
                    None if forced => targets[0],
                    None => continue,
                };

                self.tick(steps)?;
                struck = true;
                if let StrikeOutcome::AwaitingPenalty(options) = battle.strike(side, tag, hex)? {
                    self.tick(steps)?;
                    let index = provider.choose_penalty(battle, &options);
                    battle.choose_penalty(side, index)?;
                }
                self.resolve_carries(battle, side, provider, steps)?;
            }
            if !struck || !battle.is_forced_strike_remaining() {
                break;
            }
            debug!(side = %side, "forced strikes remain; another round");
        }

        self.tick(steps)?;
        battle.done_with_strikes(side)
    }

    fn resolve_carries(
        &self,
        battle: &mut Battle,
        side: Side,
        provider: &mut dyn DecisionProvider,
        steps: &mut usize,
    ) -> Result<()> {
        while battle.carry_damage() > 0 && !battle.carry_targets().is_empty() {
            let targets = battle.carry_targets().to_vec();
            let Some(hex) = provider.choose_carry(battle, battle.carry_damage(), &targets) else {
                break;
            };
            self.tick(steps)?;
            battle.apply_carry(side, hex)?;
        }
        Ok(())
    }
}
