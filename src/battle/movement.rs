//! Movement: legal destinations and the Move phase operations.
//!
//! A critter spends up to its skill in movement points, paying each hex's
//! entry cost. Fliers may also pass over any hex they can fly over for one
//! point, landing wherever the landing cost allows. A critter that has
//! already moved, or that starts engaged with a living enemy, may not move.

use rustc_hash::FxHashSet;
use tracing::{debug, info, warn};

use super::combat::HexList;
use super::critter::{Critter, CritterTag};
use super::outcome::BattleEvent;
use super::phase::BattlePhase;
use super::state::Battle;
use crate::core::{BattleError, Result, Side};
use crate::hex::Direction;
use crate::terrain::{HexId, IMPASSIBLE_COST};

impl Battle {
    /// Hexes this critter may move to now, its own hex excluded.
    ///
    /// With `ignore_mobile_allies`, same-side critters that are free to
    /// move are treated as already out of the way.
    pub fn legal_moves(&self, tag: CritterTag, ignore_mobile_allies: bool) -> Result<HexList> {
        let critter = self.critter_or_err(tag)?;
        Ok(self.show_moves(critter, ignore_mobile_allies))
    }

    fn show_moves(&self, critter: &Critter, ignore_mobile_allies: bool) -> HexList {
        let mut moves = HexList::new();
        if critter.has_moved() || self.in_contact(critter, false) {
            return moves;
        }

        let start_list = self.board.start_list();
        if !start_list.is_empty() && self.turn == 1 && self.active == Side::Defender {
            moves.extend(
                start_list
                    .iter()
                    .copied()
                    .filter(|&hex| ignore_mobile_allies || !self.is_occupied(hex)),
            );
        } else {
            let creature = self.creature_of(critter);
            let mut found = FxHashSet::default();
            self.find_moves(
                critter,
                critter.current,
                creature.flier,
                critter.skill as u32,
                None,
                ignore_mobile_allies,
                &mut found,
            );
            moves.extend(found);
        }

        moves.retain(|hex| *hex != critter.current);
        moves.sort_unstable();
        moves
    }

    /// Flood fill from `hex`, never stepping straight back the way it came.
    #[allow(clippy::too_many_arguments)]
    fn find_moves(
        &self,
        critter: &Critter,
        hex: HexId,
        flies: bool,
        moves_left: u32,
        came_from: Option<Direction>,
        ignore_mobile_allies: bool,
        found: &mut FxHashSet<HexId>,
    ) {
        let natives = self.creature_of(critter).natives;

        for dir in Direction::ALL {
            if Some(dir) == came_from {
                continue;
            }
            let Some(neighbor) = self.board.neighbor(hex, dir) else {
                continue;
            };
            let reverse = dir.opposite();

            let passable = match self.critter_at(neighbor) {
                None => true,
                Some(bogey) => {
                    ignore_mobile_allies && bogey.side == critter.side && !self.in_contact(bogey, false)
                }
            };
            let cost = if passable {
                self.board.entry_cost(neighbor, reverse, natives, flies)
            } else {
                IMPASSIBLE_COST
            };

            if cost != IMPASSIBLE_COST && cost <= moves_left {
                found.insert(neighbor);
                // Flying over is never dearer, so fliers need not walk on.
                if !flies && moves_left > cost {
                    self.find_moves(
                        critter,
                        neighbor,
                        flies,
                        moves_left - cost,
                        Some(reverse),
                        ignore_mobile_allies,
                        found,
                    );
                }
            }

            if flies && moves_left > 1 && self.board.can_be_flown_over(neighbor, flies) {
                self.find_moves(
                    critter,
                    neighbor,
                    flies,
                    moves_left - 1,
                    Some(reverse),
                    ignore_mobile_allies,
                    found,
                );
            }
        }
    }

    /// Active critters that have not moved, are not engaged, and have
    /// somewhere to go.
    #[must_use]
    pub fn mobile_critters(&self) -> Vec<CritterTag> {
        self.living_critters(self.active)
            .filter(|c| !self.show_moves(c, false).is_empty())
            .map(|c| c.tag)
            .collect()
    }

    fn ensure_move_phase(&self, side: Side) -> Result<()> {
        self.ensure_live()?;
        if self.phase != BattlePhase::Move {
            return Err(BattleError::WrongPhase {
                action: "move",
                phase: self.phase,
            });
        }
        self.ensure_active(side)
    }

    /// Move a critter. Moving to its own hex is an allowed null move.
    pub fn do_move(&mut self, side: Side, tag: CritterTag, hex: HexId) -> Result<()> {
        self.ensure_move_phase(side)?;
        let critter = self.ensure_own(side, tag)?;
        let from = critter.current;

        if hex == from {
            info!(critter = %tag, hex = %self.label(hex), "critter does not move");
            return Ok(());
        }
        if !self.show_moves(critter, false).contains(&hex) {
            warn!(
                critter = %tag,
                from = %self.label(from),
                to = %self.label(hex),
                "illegal move rejected"
            );
            return Err(BattleError::IllegalMove {
                tag,
                hex: self.label(hex).to_string(),
            });
        }

        if let Some(critter) = self.critter_mut(tag) {
            critter.current = hex;
        }
        info!(critter = %tag, from = %self.label(from), to = %self.label(hex), "critter moves");
        self.events.push(BattleEvent::CritterMoved { tag, from, to: hex });
        Ok(())
    }

    /// Return a critter to where it began this phase.
    pub fn undo_move(&mut self, side: Side, tag: CritterTag) -> Result<()> {
        self.ensure_move_phase(side)?;
        self.ensure_own(side, tag)?;
        if let Some(critter) = self.critter_mut(tag) {
            if critter.has_moved() {
                critter.undo_move();
                let to = critter.current;
                info!(critter = %tag, "move undone");
                self.events.push(BattleEvent::MoveUndone { tag, to });
            }
        }
        Ok(())
    }

    pub fn undo_all_moves(&mut self, side: Side) -> Result<()> {
        self.ensure_move_phase(side)?;
        let moved: Vec<CritterTag> = self
            .side_critters(side)
            .filter(|c| c.has_moved())
            .map(|c| c.tag)
            .collect();
        for tag in moved {
            self.undo_move(side, tag)?;
        }
        Ok(())
    }

    /// End the Move phase: critters left on the entrance die, moves are
    /// committed, and the battle advances.
    pub fn done_with_moves(&mut self, side: Side) -> Result<()> {
        self.ensure_move_phase(side)?;
        self.finish_moves();
        self.advance_phase();
        Ok(())
    }

    pub(super) fn finish_moves(&mut self) {
        let active = self.active;
        let board = &self.board;
        let mut stranded = 0;
        for critter in self.critters.iter_mut() {
            if critter.side == active && board.is_entrance(critter.current) && !critter.is_dead() {
                critter.set_dead();
                stranded += 1;
            }
        }
        if stranded > 0 {
            debug!(side = %active, stranded, "critters left off-board are killed");
        }
        self.remove_dead_critters();
        for critter in self.critters.iter_mut() {
            if critter.side == active {
                critter.commit_move();
            }
        }
    }
}
