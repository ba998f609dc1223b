//! Box opening.
//!
//! Opening a box runs in two phases. The plan phase computes the whole
//! reward (branch, tier counts, slot draws, currency) without touching the
//! player; any failure there leaves the profile as it was. The apply phase
//! then banks the copies and currency and bumps the box counter.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::split::{split_in_integers, split_tiers, TierCounts};
use super::tiers::{Branch, SlotLayout};
use crate::cards::{CardCatalog, OwnedCards, Rarity};
use crate::core::{EngineError, EngineResult, GameRng};
use crate::economy::PlayerLedger;
use crate::tuning::{BoxKind, TuningTables};

/// Length of the battle box cycle.
const BOX_CYCLE: u32 = 122;

/// Cycle positions that always give an epic box.
const EPIC_POSITIONS: [u32; 2] = [12, 83];

/// One in this many battle boxes is upgraded to a mega box.
const MEGA_ODDS: u32 = 999;

/// Copies of one card drawn from a box.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDraw {
    pub name: String,
    pub count: u32,
}

/// Everything a box paid out.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxResult {
    pub kind: BoxKind,
    pub branch: Branch,
    pub gold: u64,
    pub gems: u64,

    /// Non-empty slots drawn; a card drawn into two slots counts twice here.
    pub stacks: u32,

    /// Draws in first-drawn order, one entry per distinct card.
    pub draws: Vec<CardDraw>,
}

impl BoxResult {
    #[must_use]
    pub fn total_cards(&self) -> u32 {
        self.draws.iter().map(|d| d.count).sum()
    }

    #[must_use]
    pub fn count_of(&self, name: &str) -> u32 {
        self.draws.iter().find(|d| d.name == name).map_or(0, |d| d.count)
    }

    fn add(&mut self, name: &str, count: u32) {
        match self.draws.iter_mut().find(|d| d.name == name) {
            Some(draw) => draw.count += count,
            None => self.draws.push(CardDraw {
                name: name.to_string(),
                count,
            }),
        }
    }
}

/// Kind of the next key-gated battle box.
///
/// Follows the player's position in a fixed cycle, with a rare upgrade to
/// a mega box.
pub fn battle_box_kind(boxes_opened: u32, rng: &mut GameRng) -> BoxKind {
    let position = boxes_opened % BOX_CYCLE;
    let kind = if EPIC_POSITIONS.contains(&position) {
        BoxKind::Epic
    } else if position > 0 && position % 5 == 0 {
        BoxKind::Rare
    } else {
        BoxKind::Common
    };

    if rng.gen_range(0..MEGA_ODDS) == 0 {
        BoxKind::Mega
    } else {
        kind
    }
}

/// Resolves box openings against injected catalog and tuning tables.
#[derive(Clone, Debug)]
pub struct LootEngine {
    catalog: Arc<CardCatalog>,
    tuning: Arc<TuningTables>,
}

impl LootEngine {
    #[must_use]
    pub fn new(catalog: Arc<CardCatalog>, tuning: Arc<TuningTables>) -> Self {
        Self { catalog, tuning }
    }

    /// Reward multiplier for `kind`: HQ-based for free boxes, league-based otherwise.
    pub fn multiplier(&self, kind: BoxKind, ledger: &PlayerLedger) -> EngineResult<f64> {
        if kind == BoxKind::Free {
            Ok(self.tuning.hq(ledger.hq_level)?.box_multiplier)
        } else {
            Ok(self.tuning.league(ledger.total_stars())?.1.box_multiplier)
        }
    }

    /// Should this opening be forced onto the commander branch?
    ///
    /// True for a player who owns a commander that never received a copy
    /// while sitting at the HQ level where commanders first unlock.
    pub fn guaranteed_commander(&self, ledger: &PlayerLedger, cards: &OwnedCards) -> EngineResult<bool> {
        let first_hq = self.catalog.first_unlock_level(Rarity::Commander);
        Ok(first_hq == Some(ledger.hq_level) && cards.has_fresh_commander(&self.catalog)?)
    }

    /// Open a box of `kind` for a player and apply the rewards.
    pub fn open_box(
        &self,
        kind: BoxKind,
        ledger: &mut PlayerLedger,
        cards: &mut OwnedCards,
        rng: &mut GameRng,
    ) -> EngineResult<BoxResult> {
        let result = self.plan(kind, ledger, cards, rng)?;

        for draw in &result.draws {
            cards.add_copies(&draw.name, draw.count)?;
        }
        ledger.gold += result.gold;
        ledger.gems += result.gems;
        ledger.boxes_opened += 1;

        log::info!(
            "opened {:?} box ({:?} branch): {} cards, {} gold, {} gems",
            result.kind,
            result.branch,
            result.total_cards(),
            result.gold,
            result.gems
        );
        Ok(result)
    }

    fn plan(&self, kind: BoxKind, ledger: &PlayerLedger, cards: &OwnedCards, rng: &mut GameRng) -> EngineResult<BoxResult> {
        let tuning = self.tuning.box_tuning(kind)?;
        let multiplier = self.multiplier(kind, ledger)?;
        let total = (f64::from(tuning.total_cards) * multiplier).round() as u32;

        let branch = if self.guaranteed_commander(ledger, cards)? {
            Branch::Commander
        } else {
            Branch::roll(tuning, rng)
        };
        let layout = SlotLayout::for_box(branch, tuning.stacks)?;
        let counts = split_tiers(branch, total);
        log::debug!("{:?} box: {} cards on {:?} branch as {:?}", kind, total, branch, counts);

        let mut pools: FxHashMap<Rarity, Vec<&str>> = FxHashMap::default();
        for rarity in Rarity::DESCENDING {
            pools.insert(rarity, cards.pool(&self.catalog, rarity)?);
        }

        let mut result = BoxResult {
            kind,
            branch,
            gold: 0,
            gems: 0,
            stacks: 0,
            draws: Vec::new(),
        };

        // A tier with no slots in this layout hands its cards down a tier
        let mut carried = 0;
        for rarity in Rarity::DESCENDING {
            let count = tier_count(&counts, rarity) + carried;
            let slots = layout.slots_for(rarity);
            if slots == 0 {
                carried = count;
                continue;
            }
            carried = 0;

            for amount in split_in_integers(count, slots) {
                if amount == 0 {
                    continue;
                }
                let name = draw_card(&pools, rarity, rng)?;
                result.add(name, amount);
                result.stacks += 1;
            }
        }

        let low = (tuning.min_gold as f64 * multiplier).round() as u64;
        let high = ((tuning.max_gold as f64 * multiplier).round() as u64).max(low);
        result.gold = rng.gen_range(low..=high);

        if kind == BoxKind::Free && rng.gen_range(1..=10) >= 7 {
            result.gems = rng.gen_range(2..=8);
        }

        Ok(result)
    }
}

fn tier_count(counts: &TierCounts, rarity: Rarity) -> u32 {
    match rarity {
        Rarity::Commander => counts.commander,
        Rarity::Epic => counts.epic,
        Rarity::Rare => counts.rare,
        Rarity::Common => counts.common,
    }
}

/// Draw from the `rarity` pool, falling back down the rarity chain.
fn draw_card<'a>(pools: &FxHashMap<Rarity, Vec<&'a str>>, rarity: Rarity, rng: &mut GameRng) -> EngineResult<&'a str> {
    let mut tier = Some(rarity);
    while let Some(current) = tier {
        if let Some(name) = pools.get(&current).and_then(|pool| rng.choose(pool).copied()) {
            return Ok(name);
        }
        tier = current.next_lower();
    }
    log::warn!("no owned card at or below {} to draw", rarity);
    Err(EngineError::NoEligibleCards)
}
