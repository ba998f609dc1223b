//! Player progression ledger.
//!
//! `PlayerLedger` owns a player's scalar economy state: experience and
//! level, HQ and chopper levels, currencies, keys, star tallies and the two
//! banked-star counters that gate reward boxes.
//!
//! Methods that can fail check first and mutate after, so an `Err` leaves
//! the ledger untouched.

use serde::{Deserialize, Serialize};

use crate::core::{EngineConfig, EngineError, EngineResult, StarterProfile};
use crate::tuning::TuningTables;

/// Result of adding experience.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUp {
    pub from: u32,
    pub to: u32,
    /// Gems granted across all levels gained.
    pub gems: u64,
}

impl LevelUp {
    #[must_use]
    pub fn levels_gained(&self) -> u32 {
        self.to - self.from
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerLedger {
    pub experience: u64,
    pub level: u32,
    pub hq_level: u32,
    pub chopper_level: u32,
    pub gold: u64,
    pub gems: u64,
    pub keys: u32,
    pub attack_stars: u32,
    pub defense_stars: u32,
    pub boxes_opened: u32,

    /// Stars toward the next key-gated battle box.
    pub banked_stars: u32,

    /// Defense stars toward the next defense box.
    pub banked_defense_stars: u32,
}

impl PlayerLedger {
    /// Ledger for a newly registered player.
    #[must_use]
    pub fn new(starter: &StarterProfile) -> Self {
        Self {
            experience: 0,
            level: 1,
            hq_level: 1,
            chopper_level: 1,
            gold: starter.gold,
            gems: starter.gems,
            keys: starter.keys,
            attack_stars: 0,
            defense_stars: 0,
            boxes_opened: 0,
            banked_stars: 0,
            banked_defense_stars: 0,
        }
    }

    /// Lifetime stars, attack and defense combined.
    #[must_use]
    pub fn total_stars(&self) -> u32 {
        self.attack_stars + self.defense_stars
    }

    /// Gold charged per attack at the current HQ level.
    pub fn attack_cost(&self, tables: &TuningTables) -> EngineResult<u64> {
        Ok(tables.hq(self.hq_level)?.attack_cost)
    }

    /// Fail with `InsufficientGold` unless `amount` is affordable.
    pub fn ensure_gold(&self, amount: u64) -> EngineResult<()> {
        if self.gold < amount {
            return Err(EngineError::InsufficientGold {
                required: amount,
                available: self.gold,
            });
        }
        Ok(())
    }

    /// Spend gold. Never refunded.
    pub fn charge(&mut self, amount: u64) -> EngineResult<()> {
        self.ensure_gold(amount)?;
        self.gold -= amount;
        Ok(())
    }

    /// Add experience and apply every level-up it pays for.
    ///
    /// A level is left when experience reaches its threshold and the XP
    /// table has a row for the next level; the remainder carries over and
    /// the new level's gem reward is granted.
    pub fn add_experience(&mut self, xp: u64, tables: &TuningTables) -> LevelUp {
        self.experience += xp;
        let mut result = LevelUp {
            from: self.level,
            to: self.level,
            gems: 0,
        };

        while let (Some(current), Some(next)) = (tables.xp(self.level), tables.xp(self.level + 1)) {
            if self.experience < current.threshold {
                break;
            }
            self.experience -= current.threshold;
            self.level = next.level;
            self.gems += next.gem_reward;
            result.gems += next.gem_reward;
        }

        result.to = self.level;
        if result.levels_gained() > 0 {
            log::info!("level up {} -> {} (+{} gems)", result.from, result.to, result.gems);
        }
        result
    }

    /// Record stars won in an attack and run key gating.
    ///
    /// Returns true when a battle box unlocks: the bank reached
    /// `stars_per_box` and a key was available. Without keys the bank
    /// saturates at `stars_per_box`.
    pub fn record_attack(&mut self, stars: u8, config: &EngineConfig) -> bool {
        let stars = u32::from(stars);
        self.attack_stars += stars;
        self.banked_stars += stars;

        if self.banked_stars < config.stars_per_box {
            return false;
        }
        if self.keys == 0 {
            self.banked_stars = config.stars_per_box;
            return false;
        }

        self.keys -= 1;
        self.banked_stars -= config.stars_per_box;
        true
    }

    /// Record stars conceded while defending.
    pub fn record_defense(&mut self, stars: u8, config: &EngineConfig) {
        let stars = u32::from(stars);
        self.defense_stars += stars;
        self.banked_defense_stars = (self.banked_defense_stars + stars).min(config.defense_box_stars);
    }

    #[must_use]
    pub fn defense_box_ready(&self, config: &EngineConfig) -> bool {
        self.banked_defense_stars >= config.defense_box_stars
    }

    /// Spend the banked defense stars on a defense box.
    pub fn take_defense_box(&mut self, config: &EngineConfig) -> EngineResult<()> {
        if !self.defense_box_ready(config) {
            return Err(EngineError::NotEligible {
                banked: self.banked_defense_stars,
                required: config.defense_box_stars,
            });
        }
        self.banked_defense_stars -= config.defense_box_stars;
        Ok(())
    }

    /// Add keys, saturating at the configured maximum.
    pub fn grant_keys(&mut self, keys: u32, config: &EngineConfig) -> EngineResult<()> {
        if keys == 0 {
            return Err(EngineError::InvalidQuantity);
        }
        self.keys = (self.keys + keys).min(config.max_keys);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::{HqLevel, League, XpLevel};

    fn tables() -> TuningTables {
        TuningTables {
            hq: vec![HqLevel {
                level: 1,
                attack_cost: 10,
                resource_yield: 50,
                box_multiplier: 1.0,
                upgrade_cost: 500,
            }],
            xp: vec![
                XpLevel { level: 1, threshold: 10, gem_reward: 0, max_hq: 2 },
                XpLevel { level: 2, threshold: 20, gem_reward: 3, max_hq: 3 },
                XpLevel { level: 3, threshold: 40, gem_reward: 5, max_hq: 4 },
                XpLevel { level: 4, threshold: 80, gem_reward: 8, max_hq: 5 },
            ],
            leagues: vec![League {
                name: "Bronze".into(),
                min_stars: 0,
                box_multiplier: 1.0,
            }],
            ..TuningTables::default()
        }
    }

    fn ledger() -> PlayerLedger {
        PlayerLedger::new(&StarterProfile::default())
    }

    #[test]
    fn test_new_ledger_from_starter() {
        let l = ledger();
        assert_eq!(l.level, 1);
        assert_eq!(l.hq_level, 1);
        assert_eq!(l.gold, 200);
        assert_eq!(l.gems, 150);
        assert_eq!(l.keys, 5);
        assert_eq!(l.total_stars(), 0);
    }

    #[test]
    fn test_charge_rejects_without_mutation() {
        let mut l = ledger();
        l.gold = 5;
        assert_eq!(
            l.charge(10).unwrap_err(),
            EngineError::InsufficientGold { required: 10, available: 5 }
        );
        assert_eq!(l.gold, 5);

        l.charge(5).unwrap();
        assert_eq!(l.gold, 0);
    }

    #[test]
    fn test_attack_cost_from_hq_table() {
        assert_eq!(ledger().attack_cost(&tables()).unwrap(), 10);
    }

    #[test]
    fn test_single_level_up_carries_remainder() {
        let mut l = ledger();
        let up = l.add_experience(13, &tables());
        assert_eq!(up, LevelUp { from: 1, to: 2, gems: 3 });
        assert_eq!(l.experience, 3);
        assert_eq!(l.gems, 153);
    }

    #[test]
    fn test_multi_level_jump() {
        let mut l = ledger();
        // 10 + 20 + 40 = 70 -> level 4 with 5 left over
        let up = l.add_experience(75, &tables());
        assert_eq!(up.levels_gained(), 3);
        assert_eq!(l.level, 4);
        assert_eq!(l.experience, 5);
        assert_eq!(up.gems, 3 + 5 + 8);
    }

    #[test]
    fn test_level_capped_at_top_of_table() {
        let mut l = ledger();
        l.add_experience(10_000, &tables());
        assert_eq!(l.level, 4);
        assert_eq!(l.experience, 10_000 - 70);
    }

    #[test]
    fn test_key_gating_sequence() {
        let config = EngineConfig::default();
        let mut l = ledger();

        assert!(!l.record_attack(2, &config));
        assert!(!l.record_attack(2, &config));
        assert_eq!(l.banked_stars, 4);

        assert!(l.record_attack(2, &config));
        assert_eq!(l.banked_stars, 1);
        assert_eq!(l.keys, 4);
        assert_eq!(l.attack_stars, 6);
    }

    #[test]
    fn test_no_keys_saturates_bank() {
        let config = EngineConfig::default();
        let mut l = ledger();
        l.keys = 0;

        for _ in 0..4 {
            assert!(!l.record_attack(3, &config));
        }
        assert_eq!(l.banked_stars, 5);
        assert_eq!(l.attack_stars, 12);

        // A key arrives; the next win unlocks
        l.grant_keys(1, &config).unwrap();
        assert!(l.record_attack(1, &config));
        assert_eq!(l.banked_stars, 1);
        assert_eq!(l.keys, 0);
    }

    #[test]
    fn test_defense_box_gating() {
        let config = EngineConfig::default();
        let mut l = ledger();

        for _ in 0..40 {
            l.record_defense(3, &config);
        }
        assert_eq!(l.defense_stars, 120);
        assert_eq!(l.banked_defense_stars, 100);
        assert!(l.defense_box_ready(&config));

        l.take_defense_box(&config).unwrap();
        assert_eq!(l.banked_defense_stars, 0);
        assert_eq!(
            l.take_defense_box(&config).unwrap_err(),
            EngineError::NotEligible { banked: 0, required: 100 }
        );
    }

    #[test]
    fn test_grant_keys_clamps() {
        let config = EngineConfig::default();
        let mut l = ledger();
        l.keys = 3;
        l.grant_keys(4, &config).unwrap();
        assert_eq!(l.keys, 5);
        assert_eq!(l.grant_keys(0, &config).unwrap_err(), EngineError::InvalidQuantity);
    }
}
