//! Progression ledger and reward formulas.
//!
//! - `PlayerLedger`: experience, levels, currencies, keys, star banks
//! - `gold_reward`/`xp_reward`: what a battle pays

pub mod ledger;
pub mod rewards;

pub use ledger::{LevelUp, PlayerLedger};
pub use rewards::{gold_reward, xp_reward};
