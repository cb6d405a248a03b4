//! Decision providers and the battle runner.
//!
//! The battle core exposes queries and actions; this module is the narrow
//! boundary where a UI or AI policy plugs in:
//! - `DecisionProvider`: answers moves, strikes, penalties, carries,
//!   summons and reinforcements for one side
//! - `BattleRunner`: plays a battle to the end through two providers
//! - `RandomProvider`: a uniform-random provider for rollouts

pub mod provider;
pub mod random;
pub mod runner;

pub use provider::DecisionProvider;
pub use random::RandomProvider;
pub use runner::BattleRunner;
