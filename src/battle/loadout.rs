//! Loadouts - the cards a player brings to a fight.
//!
//! Each player has two: an attack squad (troops, support drops, at most one
//! commander) and a base defense. Housing capacities come from the chopper
//! level; every edit keeps `sum(count * space) <= capacity` per category.

use serde::{Deserialize, Serialize};

use crate::cards::{CardCatalog, CardCategory, CardDefinition};
use crate::core::{EngineError, EngineResult};
use crate::tuning::ChopperLevel;

/// Housing capacities per loadout category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capacities {
    pub troop: u32,
    pub support: u32,
    pub defense: u32,
}

impl Capacities {
    /// Capacity for a category. Commanders are slot-limited, not housed.
    #[must_use]
    pub fn for_category(&self, category: CardCategory) -> Option<u32> {
        match category {
            CardCategory::Troop => Some(self.troop),
            CardCategory::Support => Some(self.support),
            CardCategory::Defense => Some(self.defense),
            CardCategory::Commander => None,
        }
    }
}

impl From<&ChopperLevel> for Capacities {
    fn from(row: &ChopperLevel) -> Self {
        Self {
            troop: row.troop_capacity,
            support: row.support_capacity,
            defense: row.defense_capacity,
        }
    }
}

/// One loadout line.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoadoutEntry {
    pub name: String,
    pub count: u32,
}

/// Card name -> count, in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loadout {
    entries: Vec<LoadoutEntry>,
}

impl Loadout {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from (name, count) pairs without capacity checks.
    ///
    /// Used for scripted defenses and already-validated stored loadouts.
    /// Repeated names merge.
    pub fn from_pairs<S: Into<String>>(pairs: impl IntoIterator<Item = (S, u32)>) -> Self {
        let mut loadout = Self::new();
        for (name, count) in pairs {
            loadout.put(name.into(), count);
        }
        loadout
    }

    fn put(&mut self, name: String, count: u32) {
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => entry.count += count,
            None => self.entries.push(LoadoutEntry { name, count }),
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = &LoadoutEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn count(&self, name: &str) -> u32 {
        self.entries.iter().find(|e| e.name == name).map_or(0, |e| e.count)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Housing used by one category.
    pub fn space_used(&self, catalog: &CardCatalog, category: CardCategory) -> EngineResult<u32> {
        let mut used = 0;
        for entry in &self.entries {
            let def = catalog.lookup(&entry.name)?;
            if def.category == category {
                used += def.space * entry.count;
            }
        }
        Ok(used)
    }

    /// Number of commander copies selected.
    pub fn commanders(&self, catalog: &CardCatalog) -> EngineResult<u32> {
        let mut count = 0;
        for entry in &self.entries {
            if catalog.lookup(&entry.name)?.category == CardCategory::Commander {
                count += entry.count;
            }
        }
        Ok(count)
    }

    /// Does the squad contain anything that fights (troop or commander)?
    pub fn has_troops(&self, catalog: &CardCatalog) -> EngineResult<bool> {
        for entry in &self.entries {
            let category = catalog.lookup(&entry.name)?.category;
            if entry.count > 0 && matches!(category, CardCategory::Troop | CardCategory::Commander) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Add `count` copies of `def`, honoring capacities and the commander slot.
    pub fn try_add(
        &mut self,
        catalog: &CardCatalog,
        def: &CardDefinition,
        count: u32,
        capacities: &Capacities,
    ) -> EngineResult<()> {
        if count == 0 {
            return Err(EngineError::InvalidQuantity);
        }

        match capacities.for_category(def.category) {
            None => {
                if count > 1 || self.commanders(catalog)? > 0 {
                    return Err(EngineError::CommanderSlotTaken);
                }
            }
            Some(capacity) => {
                let required = self.space_used(catalog, def.category)? + def.space * count;
                if required > capacity {
                    return Err(EngineError::CapacityExceeded {
                        category: def.category,
                        required,
                        capacity,
                    });
                }
            }
        }

        self.put(def.name.clone(), count);
        Ok(())
    }

    /// Check the whole loadout against `capacities`.
    pub fn validate(&self, catalog: &CardCatalog, capacities: &Capacities) -> EngineResult<()> {
        for category in [CardCategory::Troop, CardCategory::Support, CardCategory::Defense] {
            let required = self.space_used(catalog, category)?;
            let capacity = capacities.for_category(category).unwrap_or(0);
            if required > capacity {
                return Err(EngineError::CapacityExceeded {
                    category,
                    required,
                    capacity,
                });
            }
        }
        if self.commanders(catalog)? > 1 {
            return Err(EngineError::CommanderSlotTaken);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Ability, AbilityKind, Rarity};

    fn catalog() -> CardCatalog {
        let mut catalog = CardCatalog::new();
        catalog.register(CardDefinition::troop("Troopers", Rarity::Common, 100, 20, 1.0));
        catalog.register(CardDefinition::troop("Shields", Rarity::Common, 400, 10, 1.0).with_space(3));
        catalog.register(
            CardDefinition::support("Rage", Rarity::Common, Ability::new(AbilityKind::Boost, 10.0, 5.0)).with_space(2),
        );
        catalog.register(CardDefinition::defense("Cannon", Rarity::Common, 300, 30, 1.5).with_space(2));
        catalog.register(CardDefinition::commander("Sarge", 1000, 80, 1.0));
        catalog.register(CardDefinition::commander("Kane", 900, 90, 1.0));
        catalog
    }

    fn caps() -> Capacities {
        Capacities { troop: 10, support: 2, defense: 4 }
    }

    #[test]
    fn test_try_add_within_capacity() {
        let catalog = catalog();
        let mut squad = Loadout::new();

        squad.try_add(&catalog, catalog.get("Troopers").unwrap(), 4, &caps()).unwrap();
        squad.try_add(&catalog, catalog.get("Shields").unwrap(), 2, &caps()).unwrap();
        assert_eq!(squad.space_used(&catalog, CardCategory::Troop).unwrap(), 10);

        let err = squad.try_add(&catalog, catalog.get("Troopers").unwrap(), 1, &caps()).unwrap_err();
        assert_eq!(
            err,
            EngineError::CapacityExceeded {
                category: CardCategory::Troop,
                required: 11,
                capacity: 10,
            }
        );
        assert_eq!(squad.count("Troopers"), 4);
    }

    #[test]
    fn test_try_add_merges_repeats() {
        let catalog = catalog();
        let mut squad = Loadout::new();
        squad.try_add(&catalog, catalog.get("Troopers").unwrap(), 1, &caps()).unwrap();
        squad.try_add(&catalog, catalog.get("Troopers").unwrap(), 2, &caps()).unwrap();
        assert_eq!(squad.len(), 1);
        assert_eq!(squad.count("Troopers"), 3);
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let catalog = catalog();
        let mut squad = Loadout::new();
        assert_eq!(
            squad.try_add(&catalog, catalog.get("Rage").unwrap(), 0, &caps()).unwrap_err(),
            EngineError::InvalidQuantity
        );
    }

    #[test]
    fn test_single_commander_slot() {
        let catalog = catalog();
        let mut squad = Loadout::new();
        assert_eq!(
            squad.try_add(&catalog, catalog.get("Sarge").unwrap(), 2, &caps()).unwrap_err(),
            EngineError::CommanderSlotTaken
        );

        squad.try_add(&catalog, catalog.get("Sarge").unwrap(), 1, &caps()).unwrap();
        assert_eq!(
            squad.try_add(&catalog, catalog.get("Kane").unwrap(), 1, &caps()).unwrap_err(),
            EngineError::CommanderSlotTaken
        );
    }

    #[test]
    fn test_validate_after_capacity_shrinks() {
        let catalog = catalog();
        let base = Loadout::from_pairs([("Cannon", 2)]);
        base.validate(&catalog, &caps()).unwrap();

        let smaller = Capacities { defense: 3, ..caps() };
        assert!(matches!(
            base.validate(&catalog, &smaller),
            Err(EngineError::CapacityExceeded { category: CardCategory::Defense, .. })
        ));
    }

    #[test]
    fn test_has_troops() {
        let catalog = catalog();
        assert!(!Loadout::from_pairs([("Rage", 1)]).has_troops(&catalog).unwrap());
        assert!(Loadout::from_pairs([("Rage", 1), ("Troopers", 1)]).has_troops(&catalog).unwrap());
        assert!(Loadout::from_pairs([("Sarge", 1)]).has_troops(&catalog).unwrap());
        assert!(!Loadout::new().has_troops(&catalog).unwrap());
    }

    #[test]
    fn test_unknown_card_is_data_integrity_error() {
        let catalog = catalog();
        let squad = Loadout::from_pairs([("Ghost", 1)]);
        assert_eq!(
            squad.space_used(&catalog, CardCategory::Troop).unwrap_err(),
            EngineError::CardNotFound("Ghost".to_string())
        );
    }
}
