//! Battle resolution.
//!
//! A battle is scored from the two sides' accumulated hit points and damage
//! per second. Troops, commanders and defenses contribute scaled combat
//! stats; support cards contribute through their ability. The score is the
//! time the attacker survives minus the time the defender survives.
//!
//! Resolution never mutates anything. With stored levels on both sides it
//! is fully deterministic; a computer defender's levels are drawn from the
//! supplied RNG.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::loadout::Loadout;
use crate::cards::{AbilityKind, CardCatalog, CardCategory, OwnedCards, StatScaler};
use crate::core::{EngineError, EngineResult, GameRng};

/// Where defender card levels come from.
#[derive(Clone, Copy, Debug)]
pub enum DefenderLevels<'a> {
    /// A human defender's stored card levels.
    Stored(&'a OwnedCards),
    /// A computer defender: levels drawn around the attacker's average.
    Randomized,
}

/// One side's accumulated strength.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Tally {
    pub hp: f64,
    pub dps: f64,

    /// Damage per second this side removes from the opponent.
    pub suppression: f64,
}

/// Score and stars for a resolved battle, before any onboarding override.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BattleScore {
    pub attacker: Tally,
    pub defender: Tally,
    pub score: f64,
    pub stars: u8,
}

/// What a battle paid the attacker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleOutcome {
    pub stars: u8,
    pub victory: bool,
    pub gold_reward: u64,
    pub xp_reward: u64,
}

/// Map a battle score to stars.
#[must_use]
pub fn stars_for_score(score: f64) -> u8 {
    if score > 8.0 {
        3
    } else if score > 4.0 {
        2
    } else if score > 0.0 {
        1
    } else {
        0
    }
}

/// Seconds `hp` lasts against `dps`.
fn survival(hp: f64, dps: f64) -> f64 {
    if dps > 0.0 {
        hp / dps
    } else if hp > 0.0 {
        f64::INFINITY
    } else {
        0.0
    }
}

/// Scores battles against an injected card catalog.
#[derive(Clone, Debug)]
pub struct BattleResolver {
    catalog: Arc<CardCatalog>,
    combat: StatScaler,
    duration: StatScaler,
}

impl BattleResolver {
    #[must_use]
    pub fn new(catalog: Arc<CardCatalog>) -> Self {
        Self {
            catalog,
            combat: StatScaler::combat(),
            duration: StatScaler::duration(),
        }
    }

    /// Resolve `attack` against `defense`.
    ///
    /// Attacker levels come from `attacker_levels`. An attack squad without
    /// any troop or commander is rejected with `EmptySquad`.
    pub fn resolve(
        &self,
        attack: &Loadout,
        attacker_levels: &OwnedCards,
        defense: &Loadout,
        defender_levels: DefenderLevels<'_>,
        rng: &mut GameRng,
    ) -> EngineResult<BattleScore> {
        if !attack.has_troops(&self.catalog)? {
            return Err(EngineError::EmptySquad);
        }

        let mut attacker = Tally::default();
        let mut level_sum = 0u32;
        let mut entries = 0u32;
        for entry in attack.entries() {
            let level = attacker_levels.level_of(&entry.name)?;
            self.contribute(&mut attacker, &entry.name, entry.count, level)?;
            level_sum += level;
            entries += 1;
        }
        let average = if entries == 0 { 1 } else { (level_sum / entries).max(1) };

        let mut defender = Tally::default();
        for entry in defense.entries() {
            let level = match defender_levels {
                DefenderLevels::Stored(owned) => owned.level_of(&entry.name)?,
                DefenderLevels::Randomized => {
                    let centre = i64::from(average);
                    let drawn: i64 = rng.gen_range(centre - 1..=centre + 1);
                    drawn.max(1) as u32
                }
            };
            self.contribute(&mut defender, &entry.name, entry.count, level)?;
        }

        attacker.dps = (attacker.dps - defender.suppression).max(0.0);
        defender.dps = (defender.dps - attacker.suppression).max(0.0);

        let score = survival(attacker.hp, defender.dps) - survival(defender.hp, attacker.dps);
        let stars = if score.is_nan() { 0 } else { stars_for_score(score) };

        log::debug!(
            "battle: attacker hp={} dps={}, defender hp={} dps={}, score={:.2} -> {} stars",
            attacker.hp,
            attacker.dps,
            defender.hp,
            defender.dps,
            score,
            stars
        );

        Ok(BattleScore {
            attacker,
            defender,
            score,
            stars,
        })
    }

    /// Add `count` copies of `name` at `level` to `side`.
    fn contribute(&self, side: &mut Tally, name: &str, count: u32, level: u32) -> EngineResult<()> {
        let def = self.catalog.lookup(name)?;
        let count = f64::from(count);

        if def.category == CardCategory::Support {
            let Some(ability) = def.ability else {
                return Ok(());
            };
            let duration = self.duration.scale_clamped(level, def.rarity, &[ability.duration]);
            let amount = ability.value * duration[0] * count;
            match ability.kind {
                AbilityKind::Damage => side.dps += amount,
                AbilityKind::Boost => {
                    side.dps += amount;
                    side.hp += amount;
                }
                AbilityKind::Heal => side.hp += amount,
                AbilityKind::Invisibility | AbilityKind::Freeze => side.suppression += amount,
            }
            return Ok(());
        }

        let stats = self.combat.scale_clamped(level, def.rarity, &def.combat_stats());
        side.hp += stats[0] * count;
        if def.attack_speed > 0.0 {
            side.dps += stats[1] * count / def.attack_speed;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Ability, CardDefinition, Rarity};
    use crate::core::EngineConfig;

    fn catalog() -> Arc<CardCatalog> {
        let mut catalog = CardCatalog::new();
        catalog.register(CardDefinition::troop("Troopers", Rarity::Common, 100, 20, 1.0));
        catalog.register(CardDefinition::troop("Heavy", Rarity::Common, 1000, 100, 1.0));
        catalog.register(CardDefinition::defense("Cannon", Rarity::Common, 300, 30, 1.5));
        catalog.register(CardDefinition::support(
            "Rage",
            Rarity::Common,
            Ability::new(AbilityKind::Boost, 10.0, 2.0),
        ));
        catalog.register(CardDefinition::support(
            "Smoke",
            Rarity::Common,
            Ability::new(AbilityKind::Invisibility, 5.0, 2.0),
        ));
        catalog.register(CardDefinition::support(
            "Medic",
            Rarity::Common,
            Ability::new(AbilityKind::Heal, 20.0, 1.0),
        ));
        catalog.register(CardDefinition::support(
            "Strike",
            Rarity::Common,
            Ability::new(AbilityKind::Damage, 4.0, 3.0),
        ));
        Arc::new(catalog)
    }

    fn owned_all(catalog: &CardCatalog) -> OwnedCards {
        let mut owned = OwnedCards::new();
        owned.unlock_for_hq(catalog, 1);
        owned
    }

    #[test]
    fn test_trooper_example() {
        let catalog = catalog();
        let resolver = BattleResolver::new(catalog.clone());
        let owned = owned_all(&catalog);
        let mut rng = GameRng::new(1);

        let attack = Loadout::from_pairs([("Troopers", 3)]);
        let defense = Loadout::from_pairs([("Troopers", 4)]);
        let result = resolver
            .resolve(&attack, &owned, &defense, DefenderLevels::Stored(&owned), &mut rng)
            .unwrap();

        assert_eq!(result.attacker.hp, 300.0);
        assert_eq!(result.attacker.dps, 60.0);
        assert_eq!(result.defender.hp, 400.0);
        assert_eq!(result.defender.dps, 80.0);
        assert!((result.score - (3.75 - 400.0 / 60.0)).abs() < 1e-9);
        assert_eq!(result.stars, 0);

        // First-ever battle is overridden to three stars
        let config = EngineConfig::default();
        assert_eq!(config.onboarding_stars(0).unwrap_or(result.stars), 3);
    }

    #[test]
    fn test_star_mapping() {
        assert_eq!(stars_for_score(8.01), 3);
        assert_eq!(stars_for_score(8.0), 2);
        assert_eq!(stars_for_score(4.5), 2);
        assert_eq!(stars_for_score(4.0), 1);
        assert_eq!(stars_for_score(0.1), 1);
        assert_eq!(stars_for_score(0.0), 0);
        assert_eq!(stars_for_score(-3.0), 0);
    }

    #[test]
    fn test_support_abilities() {
        let catalog = catalog();
        let resolver = BattleResolver::new(catalog.clone());
        let owned = owned_all(&catalog);
        let mut rng = GameRng::new(1);
        let defense = Loadout::from_pairs([("Cannon", 1)]);

        let attack = Loadout::from_pairs([("Troopers", 1), ("Rage", 1), ("Medic", 1), ("Strike", 2)]);
        let result = resolver
            .resolve(&attack, &owned, &defense, DefenderLevels::Stored(&owned), &mut rng)
            .unwrap();
        // hp: 100 + boost 20 + heal 20; dps: 20 + boost 20 + damage 2*12
        assert_eq!(result.attacker.hp, 140.0);
        assert_eq!(result.attacker.dps, 64.0);

        let attack = Loadout::from_pairs([("Troopers", 1), ("Smoke", 1)]);
        let result = resolver
            .resolve(&attack, &owned, &defense, DefenderLevels::Stored(&owned), &mut rng)
            .unwrap();
        // Cannon: 30 / 1.5 = 20 dps, less 10 from invisibility
        assert_eq!(result.defender.dps, 10.0);
        assert_eq!(result.attacker.dps, 20.0);
    }

    #[test]
    fn test_squad_without_troops_rejected() {
        let catalog = catalog();
        let resolver = BattleResolver::new(catalog.clone());
        let owned = owned_all(&catalog);
        let mut rng = GameRng::new(1);

        let defense = Loadout::from_pairs([("Cannon", 1)]);
        for attack in [Loadout::new(), Loadout::from_pairs([("Rage", 2)])] {
            let err = resolver
                .resolve(&attack, &owned, &defense, DefenderLevels::Stored(&owned), &mut rng)
                .unwrap_err();
            assert_eq!(err, EngineError::EmptySquad);
        }
    }

    #[test]
    fn test_undefended_base_is_three_stars() {
        let catalog = catalog();
        let resolver = BattleResolver::new(catalog.clone());
        let owned = owned_all(&catalog);
        let mut rng = GameRng::new(1);

        let attack = Loadout::from_pairs([("Troopers", 1)]);
        let result = resolver
            .resolve(&attack, &owned, &Loadout::new(), DefenderLevels::Stored(&owned), &mut rng)
            .unwrap();
        assert_eq!(result.score, f64::INFINITY);
        assert_eq!(result.stars, 3);
    }

    #[test]
    fn test_stored_levels_are_deterministic() {
        let catalog = catalog();
        let resolver = BattleResolver::new(catalog.clone());
        let mut owned = owned_all(&catalog);
        owned.get_mut("Troopers").unwrap().level = 4;

        let attack = Loadout::from_pairs([("Troopers", 5), ("Rage", 1)]);
        let defense = Loadout::from_pairs([("Cannon", 2), ("Heavy", 1)]);
        let a = resolver
            .resolve(&attack, &owned, &defense, DefenderLevels::Stored(&owned), &mut GameRng::new(1))
            .unwrap();
        let b = resolver
            .resolve(&attack, &owned, &defense, DefenderLevels::Stored(&owned), &mut GameRng::new(99))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_randomized_levels_stay_near_average() {
        let catalog = catalog();
        let resolver = BattleResolver::new(catalog.clone());
        let mut owned = owned_all(&catalog);
        owned.get_mut("Troopers").unwrap().level = 5;
        let mut rng = GameRng::new(7);

        let attack = Loadout::from_pairs([("Troopers", 1)]);
        let defense = Loadout::from_pairs([("Cannon", 1)]);
        // Cannon hp 300 at level 1, +30 per level: levels 4..=6 give 390..=450
        for _ in 0..50 {
            let result = resolver
                .resolve(&attack, &owned, &defense, DefenderLevels::Randomized, &mut rng)
                .unwrap();
            assert!((390.0..=450.0).contains(&result.defender.hp), "hp {}", result.defender.hp);
        }
    }

    #[test]
    fn test_randomized_level_floor() {
        let catalog = catalog();
        let resolver = BattleResolver::new(catalog.clone());
        let owned = owned_all(&catalog);
        let mut rng = GameRng::new(3);

        let attack = Loadout::from_pairs([("Troopers", 1)]);
        let defense = Loadout::from_pairs([("Cannon", 1)]);
        for _ in 0..50 {
            let result = resolver
                .resolve(&attack, &owned, &defense, DefenderLevels::Randomized, &mut rng)
                .unwrap();
            assert!(result.defender.hp == 300.0 || result.defender.hp == 330.0);
        }
    }

    #[test]
    fn test_unowned_attacker_card() {
        let catalog = catalog();
        let resolver = BattleResolver::new(catalog.clone());
        let owned = OwnedCards::new();
        let attack = Loadout::from_pairs([("Troopers", 1)]);
        let err = resolver
            .resolve(&attack, &owned, &Loadout::new(), DefenderLevels::Randomized, &mut GameRng::new(1))
            .unwrap_err();
        assert_eq!(err, EngineError::CardNotOwned("Troopers".to_string()));
    }
}
