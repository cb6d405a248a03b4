//! The decision-provider seam.
//!
//! A human interface or an AI policy answers the questions a battle asks
//! through this trait. The battle never depends on a concrete provider;
//! `BattleRunner` is the only caller.
//!
//! ## Implementation Notes
//!
//! - Every choice is offered from a list of legal options; returning
//!   something not on the list is an illegal action and the runner
//!   surfaces the battle's error.
//! - Providers receive `&Battle` and may query it freely, including
//!   taking a `snapshot()` for search.

use crate::battle::{Battle, CritterTag, PenaltyOption, SummonOption};
use crate::terrain::HexId;

/// Supplies the choices a battle needs from one side.
pub trait DecisionProvider {
    /// Where to move `critter`. `None` leaves it in place.
    fn choose_move(&mut self, battle: &Battle, critter: CritterTag, moves: &[HexId]) -> Option<HexId>;

    /// Which hex `critter` strikes. `None` passes; a critter engaged with
    /// a living enemy strikes its first target anyway.
    fn choose_strike(&mut self, battle: &Battle, critter: CritterTag, targets: &[HexId]) -> Option<HexId>;

    /// Index into `options` of the strike penalty to accept.
    fn choose_penalty(&mut self, battle: &Battle, options: &[PenaltyOption]) -> usize;

    /// Where to carry `damage`. `None` forfeits the rest of the carry.
    fn choose_carry(&mut self, battle: &Battle, damage: u8, targets: &[HexId]) -> Option<HexId>;

    /// Which angel to summon. `None` declines.
    fn choose_summon(&mut self, battle: &Battle, options: &[SummonOption]) -> Option<SummonOption>;

    /// Which reinforcement to muster. `None` declines.
    fn choose_reinforcement(&mut self, battle: &Battle, options: &[String]) -> Option<String>;

    /// Let the battle resolve single-target forced strikes before asking.
    fn auto_forced_strikes(&self) -> bool {
        true
    }
}
