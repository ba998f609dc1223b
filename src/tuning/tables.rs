//! Tuning tables: per-level economy numbers and box tuning.
//!
//! Loaded once at startup from JSON and never mutated afterwards. Each
//! accessor turns a missing row into a `MissingTuning` data-integrity error
//! so stale tables surface instead of silently defaulting.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::Rarity;
use crate::core::{EngineError, EngineResult, LoadError};

/// One HQ level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HqLevel {
    pub level: u32,

    /// Gold charged per attack.
    pub attack_cost: u64,

    /// Gold produced per collection by the gold mine.
    pub resource_yield: u64,

    /// Reward multiplier for the free box.
    pub box_multiplier: f64,

    /// Gold to upgrade from this level to the next.
    pub upgrade_cost: u64,
}

/// One chopper level: housing capacities per loadout category.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChopperLevel {
    pub level: u32,
    pub troop_capacity: u32,
    pub support_capacity: u32,
    pub defense_capacity: u32,
    pub upgrade_cost: u64,
}

/// One player level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct XpLevel {
    pub level: u32,

    /// Experience needed to leave this level.
    pub threshold: u64,

    /// Gems granted on reaching this level.
    pub gem_reward: u64,

    /// Highest HQ level unlockable at this level.
    pub max_hq: u32,
}

/// Cost of upgrading a card from `level` to `level + 1`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UpgradeStep {
    pub level: u32,
    pub copies: u32,
    pub gold: u64,
    pub xp: u64,
}

/// Kinds of reward box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoxKind {
    /// Periodic free box, scaled by HQ level.
    Free,
    Common,
    Rare,
    Epic,
    Mega,
    /// Earned by defending, scaled by league.
    Defense,
}

/// Tuning for one box kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoxTuning {
    pub kind: BoxKind,

    /// Number of reward slots. One of 3, 4, 5, 8.
    pub stacks: u32,

    /// Cards before the multiplier is applied.
    pub total_cards: u32,

    /// Inverse probabilities (1 in N) of each rarity branch. 0 disables.
    pub commander_chance: u32,
    pub epic_chance: u32,
    pub rare_chance: u32,

    pub min_gold: u64,
    pub max_gold: u64,
}

/// A star bracket.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct League {
    pub name: String,
    pub min_stars: u32,
    pub box_multiplier: f64,
}

/// Computer-controlled base used while a player has no human opponent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScriptedDefense {
    /// Used for attackers at or above this HQ level.
    pub hq_level: u32,
    pub cards: Vec<(String, u32)>,
}

/// All tuning tables.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TuningTables {
    pub hq: Vec<HqLevel>,
    pub chopper: Vec<ChopperLevel>,
    pub xp: Vec<XpLevel>,
    #[serde(default)]
    pub upgrades: FxHashMap<Rarity, Vec<UpgradeStep>>,
    pub boxes: Vec<BoxTuning>,
    pub leagues: Vec<League>,
    #[serde(default)]
    pub computer_defenses: Vec<ScriptedDefense>,
}

impl TuningTables {
    /// Parse and validate tables from JSON.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let tables: TuningTables = serde_json::from_str(json).map_err(LoadError::parse("tuning tables"))?;
        tables.validated()
    }

    /// Check required tables are present and order the league table.
    pub fn validated(mut self) -> Result<Self, LoadError> {
        let required = [
            ("hq", self.hq.is_empty()),
            ("chopper", self.chopper.is_empty()),
            ("xp", self.xp.is_empty()),
            ("league", self.leagues.is_empty()),
        ];
        if let Some((table, _)) = required.iter().find(|(_, empty)| *empty) {
            return Err(LoadError::EmptyTable { table: *table });
        }

        self.leagues.sort_by_key(|l| l.min_stars);
        self.computer_defenses.sort_by_key(|d| d.hq_level);
        Ok(self)
    }

    pub fn hq(&self, level: u32) -> EngineResult<&HqLevel> {
        self.hq
            .iter()
            .find(|row| row.level == level)
            .ok_or_else(|| missing("hq", level))
    }

    pub fn chopper(&self, level: u32) -> EngineResult<&ChopperLevel> {
        self.chopper
            .iter()
            .find(|row| row.level == level)
            .ok_or_else(|| missing("chopper", level))
    }

    /// Is there a row for HQ `level`?
    #[must_use]
    pub fn has_hq(&self, level: u32) -> bool {
        self.hq.iter().any(|row| row.level == level)
    }

    #[must_use]
    pub fn has_chopper(&self, level: u32) -> bool {
        self.chopper.iter().any(|row| row.level == level)
    }

    /// Highest HQ level a player at `player_level` may build.
    pub fn max_hq(&self, player_level: u32) -> EngineResult<u32> {
        self.xp(player_level)
            .map(|row| row.max_hq)
            .ok_or_else(|| missing("xp", player_level))
    }

    /// XP row for `level`. `None` past the top of the table.
    #[must_use]
    pub fn xp(&self, level: u32) -> Option<&XpLevel> {
        self.xp.iter().find(|row| row.level == level)
    }

    /// Upgrade step out of `level`. `None` when the card is maxed.
    #[must_use]
    pub fn upgrade(&self, rarity: Rarity, level: u32) -> Option<&UpgradeStep> {
        self.upgrades.get(&rarity)?.iter().find(|step| step.level == level)
    }

    pub fn box_tuning(&self, kind: BoxKind) -> EngineResult<&BoxTuning> {
        self.boxes
            .iter()
            .find(|row| row.kind == kind)
            .ok_or_else(|| missing("box", format!("{:?}", kind)))
    }

    /// League for a star total and its 1-based position in the table.
    ///
    /// Totals below the first bracket count as the first league.
    pub fn league(&self, total_stars: u32) -> EngineResult<(u32, &League)> {
        let position = self
            .leagues
            .iter()
            .rposition(|l| l.min_stars <= total_stars)
            .unwrap_or(0);
        let league = self
            .leagues
            .get(position)
            .ok_or_else(|| missing("league", total_stars))?;
        Ok((position as u32 + 1, league))
    }

    /// Scripted defense for an attacker at `hq_level`.
    pub fn computer_defense(&self, hq_level: u32) -> EngineResult<&ScriptedDefense> {
        self.computer_defenses
            .iter()
            .rev()
            .find(|d| d.hq_level <= hq_level)
            .ok_or_else(|| missing("computer defense", hq_level))
    }
}

fn missing(table: &'static str, key: impl ToString) -> EngineError {
    log::warn!("{} table has no row for {}", table, key.to_string());
    EngineError::MissingTuning {
        table,
        key: key.to_string(),
    }
}
