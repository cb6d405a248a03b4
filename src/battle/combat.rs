//! Combat math: contact, dice, strike numbers and strike targets.
//!
//! ## Strike number
//!
//! `4 - attacker skill + defender skill`, capped at 6 so a six always
//! hits. Attacker skill is adjusted for terrain:
//!
//! | Situation | Adjustment |
//! |-----------|------------|
//! | non-native striking out of bramble | -1 |
//! | striking down across a wall | +1 |
//! | striking up a wall, or up a slope as a non-native | -1 |
//! | rangestrike at range 4 | -1 |
//! | rangestrike across bramble, non-native | -1 per hex |
//! | rangestrike up into a walled hex | -1 per level |
//! | rangestrike into a volcano | -1 |
//!
//! Magic missile rangestrikes take none of the rangestrike penalties.
//! A target native to bramble or stone it stands in, struck by a
//! non-native, adds one to the strike number unless the strike is a magic
//! missile; a tree native adds one only against melee.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use super::critter::{Critter, CritterTag};
use super::phase::BattlePhase;
use super::state::Battle;
use crate::core::{BattleError, Result};
use crate::hex::Direction;
use crate::terrain::{HexId, Hexside, Native, Terrain};

/// Hex sets returned by move and strike queries.
pub type HexList = SmallVec<[HexId; 8]>;

/// Dice and strike number of a strike that has not been rolled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrikePreview {
    pub dice: u8,
    pub strike_number: u8,
    pub rangestrike: bool,
}

impl Battle {
    /// Enemies adjacent to a critter across non-cliff edges.
    ///
    /// Critters on an entrance are never in contact.
    #[must_use]
    pub fn num_in_contact(&self, critter: &Critter, count_dead: bool) -> usize {
        let hex = critter.current;
        if self.board.is_entrance(hex) {
            return 0;
        }
        Direction::ALL
            .into_iter()
            .filter(|&dir| !self.board.is_cliff(hex, dir))
            .filter_map(|dir| self.board.neighbor(hex, dir))
            .filter_map(|n| self.critter_at(n))
            .filter(|other| other.side != critter.side && (count_dead || !other.is_dead()))
            .count()
    }

    #[must_use]
    pub fn in_contact(&self, critter: &Critter, count_dead: bool) -> bool {
        self.num_in_contact(critter, count_dead) > 0
    }

    /// Is this critter engaged with a living enemy?
    pub fn is_in_contact(&self, tag: CritterTag) -> Result<bool> {
        let critter = self.critter_or_err(tag)?;
        Ok(self.in_contact(critter, false))
    }

    /// Hexes this critter may strike now.
    ///
    /// Adjacent enemies come first; a rangestriker with no adjacent enemy,
    /// dead or alive, may instead target any living enemy it can reach,
    /// but only on its own side's Fight phase. A critter killed this turn
    /// still strikes until it is swept.
    pub fn strike_targets(&self, tag: CritterTag, include_rangestrikes: bool) -> Result<HexList> {
        let critter = self.critter_or_err(tag)?;
        Ok(self.find_strikes(critter, include_rangestrikes))
    }

    pub(super) fn find_strikes(&self, critter: &Critter, include_rangestrikes: bool) -> HexList {
        let mut targets = HexList::new();
        if critter.struck || self.board.is_entrance(critter.current) {
            return targets;
        }

        let hex = critter.current;
        let mut adjacent_enemy = false;
        for dir in Direction::ALL {
            if self.board.is_cliff(hex, dir) {
                continue;
            }
            let Some(neighbor) = self.board.neighbor(hex, dir) else {
                continue;
            };
            if let Some(other) = self.critter_at(neighbor) {
                if other.side != critter.side {
                    adjacent_enemy = true;
                    if !other.is_dead() {
                        targets.push(neighbor);
                    }
                }
            }
        }

        if include_rangestrikes
            && !adjacent_enemy
            && self.creature_of(critter).rangestriker
            && self.phase != BattlePhase::Strikeback
            && critter.side == self.active
        {
            for target in self.living_critters(critter.side.opponent()) {
                if self.is_rangestrike_possible(critter, target) {
                    targets.push(target.current);
                }
            }
        }
        targets
    }

    /// Range, LOS and target restrictions on a rangestrike.
    #[must_use]
    pub fn is_rangestrike_possible(&self, striker: &Critter, target: &Critter) -> bool {
        let range = self.board.range(striker.current, target.current, false);
        if range > striker.skill as u32 {
            return false;
        }
        if self.creature_of(striker).magic_missile {
            return true;
        }
        !(range < 3
            || self.creature_of(target).lord
            || self.board.is_los_blocked(striker.current, target.current, |h| self.is_occupied(h)))
    }

    /// Dice rolled when `striker` strikes `target`.
    #[must_use]
    pub fn dice_for(&self, striker: &Critter, target: &Critter) -> u8 {
        let natives = self.creature_of(striker).natives;
        let hex = striker.current;
        let volcano_bonus = natives.contains(Native::Volcano) && self.board.terrain(hex) == Terrain::Volcano;

        let mut dice = striker.power as i32;
        if !self.in_contact(striker, true) {
            dice /= 2;
            if volcano_bonus {
                dice += 2;
            }
            return dice.max(0) as u8;
        }

        if volcano_bonus {
            dice += 2;
        }
        if let Some(dir) = self.board.direction(hex, target.current, false) {
            let hexside = self.board.hexside(hex, dir);
            let dune_native = natives.contains(Native::Dune);
            if hexside == Hexside::Dune && dune_native {
                dice += 2;
            } else if hexside == Hexside::Slope && natives.contains(Native::Slope) {
                dice += 1;
            } else if !dune_native && self.board.opposite_hexside(hex, dir) == Hexside::Dune {
                dice -= 1;
            }
        }
        dice.max(0) as u8
    }

    fn attacker_skill(&self, striker: &Critter, target: &Critter) -> i32 {
        let creature = self.creature_of(striker);
        let natives = creature.natives;
        let (hex, target_hex) = (striker.current, target.current);
        let mut skill = striker.skill as i32;

        if self.in_contact(striker, true) {
            if self.board.terrain(hex) == Terrain::Bramble && !natives.contains(Native::Bramble) {
                skill -= 1;
            }
            let (elevation, target_elevation) = (self.board.elevation(hex), self.board.elevation(target_hex));
            if elevation > target_elevation {
                let down = self
                    .board
                    .direction(hex, target_hex, false)
                    .map(|dir| self.board.hexside(hex, dir));
                if down == Some(Hexside::Wall) {
                    skill += 1;
                }
            } else if elevation < target_elevation {
                let up = self
                    .board
                    .direction(target_hex, hex, false)
                    .map(|dir| self.board.hexside(target_hex, dir));
                match up {
                    Some(Hexside::Slope) if !natives.contains(Native::Slope) => skill -= 1,
                    Some(Hexside::Wall) => skill -= 1,
                    _ => {}
                }
            }
        } else if !creature.magic_missile {
            if self.board.range(hex, target_hex, false) == 4 {
                skill -= 1;
            }
            if !natives.contains(Native::Bramble) {
                skill -= self.board.count_bramble_hexes(hex, target_hex, |h| self.is_occupied(h)) as i32;
            }
            // Each tower level climbed crosses one wall.
            if self.board.hex(target_hex).has_wall() {
                let deficit = self.board.elevation(target_hex) as i32 - self.board.elevation(hex) as i32;
                if deficit > 0 {
                    skill -= deficit;
                }
            }
            if self.board.terrain(target_hex) == Terrain::Volcano {
                skill -= 1;
            }
        }
        skill
    }

    /// Minimum roll that hits, in `1..=6`.
    #[must_use]
    pub fn strike_number_for(&self, striker: &Critter, target: &Critter) -> u8 {
        let rangestrike = !self.in_contact(striker, true);
        let striker_type = self.creature_of(striker);
        let target_type = self.creature_of(target);
        let magic_missile = rangestrike && striker_type.magic_missile;

        let mut strike_number = 4 - self.attacker_skill(striker, target) + target.skill as i32;

        let defended = |terrain: Terrain, native: Native| {
            self.board.terrain(target.current) == terrain
                && target_type.natives.contains(native)
                && !striker_type.natives.contains(native)
        };
        if defended(Terrain::Bramble, Native::Bramble) && !magic_missile {
            strike_number += 1;
        }
        if defended(Terrain::Stone, Native::Stone) && !magic_missile {
            strike_number += 1;
        }
        if defended(Terrain::Tree, Native::Tree) && !rangestrike {
            strike_number += 1;
        }

        strike_number.clamp(1, 6) as u8
    }

    /// Dice and strike number for a strike at the critter on `target_hex`,
    /// without rolling.
    pub fn preview_strike(&self, tag: CritterTag, target_hex: HexId) -> Result<StrikePreview> {
        let striker = self.critter_or_err(tag)?;
        let target = self
            .critter_at(target_hex)
            .ok_or_else(|| BattleError::IllegalStrike {
                tag,
                hex: self.label(target_hex).to_string(),
            })?;
        let preview = StrikePreview {
            dice: self.dice_for(striker, target),
            strike_number: self.strike_number_for(striker, target),
            rangestrike: !self.in_contact(striker, true),
        };
        debug!(striker = %tag, target = %self.label(target_hex), ?preview, "strike preview");
        Ok(preview)
    }

    /// Active critters that have at least one target.
    #[must_use]
    pub fn critters_with_targets(&self) -> Vec<CritterTag> {
        self.side_critters(self.active)
            .filter(|c| !self.find_strikes(c, true).is_empty())
            .map(|c| c.tag)
            .collect()
    }

    /// An active critter engaged with a living enemy has not struck yet.
    #[must_use]
    pub fn is_forced_strike_remaining(&self) -> bool {
        self.side_critters(self.active)
            .any(|c| !c.struck && self.in_contact(c, false))
    }
}
