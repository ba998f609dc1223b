//! Weighted loot distribution.
//!
//! - `split`: integer splitting of card totals across tiers and slots
//! - `tiers`: rarity branch roll and per-branch slot layouts
//! - `engine`: `LootEngine::open_box` and the battle box cycle

pub mod engine;
pub mod split;
pub mod tiers;

pub use engine::{battle_box_kind, BoxResult, CardDraw, LootEngine};
pub use split::{split_in_integers, split_tiers, Slots, TierCounts};
pub use tiers::{Branch, SlotLayout};
