//! Loadouts and battle resolution.
//!
//! - `Loadout`: attack squads and base defenses under housing capacities
//! - `BattleResolver`: scores an attack against a defense

pub mod loadout;
pub mod resolver;

pub use loadout::{Capacities, Loadout, LoadoutEntry};
pub use resolver::{stars_for_score, BattleOutcome, BattleResolver, BattleScore, DefenderLevels, Tally};
