//! Carries: excess strike damage passed on to other adjacent enemies.
//!
//! A strike can carry only when the striker is engaged with two or more
//! living enemies and rolls more dice than the primary target has hits
//! left. Each other adjacent enemy is then either a free carry target
//! (striking it would need no worse dice or strike number) or is grouped
//! into a `PenaltyOption` under the worse `(dice, strike number)` pair it
//! would need. When any penalty option exists, the striker picks one
//! before rolling; a no-penalty option is always among them.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use super::critter::{Critter, CritterTag};
use super::state::Battle;
use crate::hex::Direction;
use crate::terrain::{HexId, Hexside};

/// Hexes eligible to receive carried damage.
pub type CarryTargets = SmallVec<[HexId; 6]>;

/// Strike at worse odds in exchange for more carry targets.
///
/// Options order by dice ascending, then strike number descending, so the
/// harshest trade comes first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenaltyOption {
    pub dice: u8,
    pub strike_number: u8,
    pub carry_targets: CarryTargets,
}

impl PenaltyOption {
    #[must_use]
    pub fn new(dice: u8, strike_number: u8) -> Self {
        Self {
            dice,
            strike_number,
            carry_targets: CarryTargets::new(),
        }
    }

    pub fn add_carry_target(&mut self, hex: HexId) {
        if !self.carry_targets.contains(&hex) {
            self.carry_targets.push(hex);
            self.carry_targets.sort_unstable();
        }
    }

    fn sort_key(&self) -> (u8, std::cmp::Reverse<u8>) {
        (self.dice, std::cmp::Reverse(self.strike_number))
    }
}

impl PartialOrd for PenaltyOption {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PenaltyOption {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.sort_key()
            .cmp(&other.sort_key())
            .then_with(|| self.carry_targets.cmp(&other.carry_targets))
    }
}

impl std::fmt::Display for PenaltyOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} dice at strike number {}, {} carry target(s)",
            self.dice,
            self.strike_number,
            self.carry_targets.len()
        )
    }
}

/// Result of carry discovery for one prospective strike.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CarryPlan {
    /// Targets reachable at the strike's own dice and strike number.
    pub free_targets: CarryTargets,
    /// Empty unless some target needs a penalty.
    pub options: Vec<PenaltyOption>,
}

/// Carry damage waiting to be assigned after a strike.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarryState {
    pub striker: Option<CritterTag>,
    pub damage: u8,
    pub targets: CarryTargets,
}

impl CarryState {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.damage > 0 && !self.targets.is_empty()
    }

    pub fn clear(&mut self) {
        self.striker = None;
        self.damage = 0;
        self.targets.clear();
    }
}

impl Battle {
    /// Hexes that may receive the pending carry damage.
    #[must_use]
    pub fn carry_targets(&self) -> &[HexId] {
        &self.carry.targets
    }

    #[must_use]
    pub fn carry_damage(&self) -> u8 {
        self.carry.damage
    }

    /// Work out where a strike on `target` could carry.
    #[must_use]
    pub fn find_carries(&self, striker: &Critter, target: &Critter) -> CarryPlan {
        let mut plan = CarryPlan::default();
        let dice = self.dice_for(striker, target);
        if dice <= target.remaining() {
            return plan;
        }
        let strike_number = self.strike_number_for(striker, target);

        for dir in Direction::ALL {
            if !self.possible_carry_to_dir(striker.current, target.current, dir) {
                continue;
            }
            let Some(neighbor) = self.board.neighbor(striker.current, dir) else {
                continue;
            };
            let Some(victim) = self.critter_at(neighbor) else {
                continue;
            };
            if victim.side == striker.side || victim.is_dead() {
                continue;
            }

            // No bonus carries: a victim never gets easier odds than the target.
            let victim_dice = self.dice_for(striker, victim).min(dice);
            let victim_number = self.strike_number_for(striker, victim).max(strike_number);
            if victim_dice <= target.remaining() {
                continue;
            }

            if victim_dice == dice && victim_number == strike_number {
                if !plan.free_targets.contains(&neighbor) {
                    plan.free_targets.push(neighbor);
                }
            } else if let Some(option) = plan
                .options
                .iter_mut()
                .find(|o| o.dice == victim_dice && o.strike_number == victim_number)
            {
                option.add_carry_target(neighbor);
            } else {
                let mut option = PenaltyOption::new(victim_dice, victim_number);
                option.add_carry_target(neighbor);
                plan.options.push(option);
            }
        }

        plan.free_targets.sort_unstable();
        if !plan.options.is_empty() {
            plan.options.push(PenaltyOption::new(dice, strike_number));
            for option in &mut plan.options {
                for &hex in &plan.free_targets {
                    option.add_carry_target(hex);
                }
            }
            plan.options.sort();
        }

        debug!(
            striker = %striker.tag,
            target = %target.tag,
            free = plan.free_targets.len(),
            options = plan.options.len(),
            "carry discovery"
        );
        plan
    }

    /// Terrain-only test for carrying from the striker's hex in `dir`.
    ///
    /// A strike that does not itself go up across a dune cannot carry up
    /// across one.
    fn possible_carry_to_dir(&self, hex: HexId, target_hex: HexId, dir: Direction) -> bool {
        match self.board.neighbor(hex, dir) {
            None => return false,
            Some(neighbor) if neighbor == target_hex => return false,
            Some(_) => {}
        }
        if self.board.is_cliff(hex, dir) {
            return false;
        }
        let strike_side = self
            .board
            .direction(target_hex, hex, false)
            .map_or(Hexside::None, |back| self.board.hexside(target_hex, back));
        !(self.board.opposite_hexside(hex, dir) == Hexside::Dune && strike_side != Hexside::Dune)
    }

    pub(super) fn leave_carry_mode(&mut self) {
        if self.carry.damage > 0 || !self.carry.targets.is_empty() {
            debug!("leaving carry mode");
        }
        self.carry.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_penalty_option_order() {
        let mut options = vec![
            PenaltyOption::new(10, 2),
            PenaltyOption::new(8, 4),
            PenaltyOption::new(10, 3),
        ];
        options.sort();
        let keys: Vec<_> = options.iter().map(|o| (o.dice, o.strike_number)).collect();
        assert_eq!(keys, vec![(8, 4), (10, 3), (10, 2)]);
    }

    #[test]
    fn test_carry_targets_dedupe() {
        let mut option = PenaltyOption::new(6, 4);
        option.add_carry_target(HexId(5));
        option.add_carry_target(HexId(2));
        option.add_carry_target(HexId(5));
        assert_eq!(option.carry_targets.as_slice(), &[HexId(2), HexId(5)]);
    }

    #[test]
    fn test_carry_state() {
        let mut carry = CarryState {
            striker: Some(CritterTag(1)),
            damage: 2,
            targets: CarryTargets::new(),
        };
        assert!(!carry.is_active());
        carry.targets.push(HexId(3));
        assert!(carry.is_active());
        carry.clear();
        assert_eq!(carry, CarryState::default());
    }
}
