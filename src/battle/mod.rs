//! The battle engine.
//!
//! A `Battle` is built by `BattleBuilder` and driven by discrete calls:
//! move, strike, choose a penalty, carry, summon, recruit, concede. Each
//! call is validated against the current phase and active side, and a
//! rejected call leaves the battle untouched.
//!
//! ## Phases
//!
//! ```text
//! Summon|Recruit -> Move -> Fight -> Strikeback -> Summon|Recruit -> ...
//! ```
//!
//! The active side moves and strikes in Move and Fight; the sides swap for
//! Strikeback. The turn number goes up after the defender's half-turn, and
//! the attacker loses on time once `max_turns` is passed.
//!
//! ## Decisions
//!
//! When the machine needs an answer that is not a plain move or strike
//! (a summon, a reinforcement, a strike penalty) it stops with
//! `Battle::pending()` set until the matching call is made.

pub mod builder;
pub mod carry;
mod cleanup;
pub mod combat;
pub mod critter;
pub mod legion;
mod lifecycle;
mod movement;
pub mod outcome;
pub mod phase;
pub mod snapshot;
mod state;
pub mod strike;

pub use builder::BattleBuilder;
pub use carry::{CarryPlan, CarryState, CarryTargets, PenaltyOption};
pub use combat::{HexList, StrikePreview};
pub use critter::{Critter, CritterTag, Origin, TagAllocator};
pub use legion::{BattleLegion, LegionSpec, RosterEntry};
pub use lifecycle::MAX_LEGION_SIZE;
pub use outcome::{BattleEvent, BattleOutcome, PlayerElimination};
pub use phase::{BattlePhase, PendingDecision, SummonOption, SummonState};
pub use snapshot::BattleSnapshot;
pub use state::Battle;
pub use strike::{StrikeOutcome, StrikeReport};
