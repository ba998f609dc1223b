//! Owned cards - a player's card collection.
//!
//! An `OwnedCard` is created the first time a card becomes available at the
//! player's HQ level. It starts at its rarity's starting level with zero
//! banked copies; box draws add copies, upgrades spend them.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::catalog::CardCatalog;
use super::definition::{CardDefinition, Rarity};
use crate::core::{EngineError, EngineResult};

/// A card in a player's collection.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnedCard {
    pub name: String,

    /// Current level. Never below the rarity's starting level.
    pub level: u32,

    /// Copies collected toward the next upgrade.
    pub banked: u32,
}

impl OwnedCard {
    /// Seed a newly unlocked card.
    #[must_use]
    pub fn unlocked(def: &CardDefinition) -> Self {
        Self {
            name: def.name.clone(),
            level: def.rarity.starting_level(),
            banked: 0,
        }
    }
}

/// A player's owned cards keyed by name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedCards {
    cards: FxHashMap<String, OwnedCard>,
}

impl OwnedCards {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&OwnedCard> {
        self.cards.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut OwnedCard> {
        self.cards.get_mut(name)
    }

    /// Level of an owned card.
    pub fn level_of(&self, name: &str) -> EngineResult<u32> {
        self.cards
            .get(name)
            .map(|c| c.level)
            .ok_or_else(|| EngineError::CardNotOwned(name.to_string()))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.cards.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &OwnedCard> {
        self.cards.values()
    }

    /// Add `def` at its starting level. Returns false if already owned.
    pub fn unlock(&mut self, def: &CardDefinition) -> bool {
        if self.cards.contains_key(&def.name) {
            return false;
        }
        self.cards.insert(def.name.clone(), OwnedCard::unlocked(def));
        true
    }

    /// Unlock every catalog card available at `hq_level`.
    ///
    /// Returns the newly unlocked names, sorted.
    pub fn unlock_for_hq(&mut self, catalog: &CardCatalog, hq_level: u32) -> Vec<String> {
        let mut added: Vec<String> = catalog
            .unlocked_at(hq_level)
            .filter(|def| self.unlock(def))
            .map(|def| def.name.clone())
            .collect();
        added.sort();
        added
    }

    /// Bank `copies` of an owned card.
    pub fn add_copies(&mut self, name: &str, copies: u32) -> EngineResult<()> {
        let card = self
            .cards
            .get_mut(name)
            .ok_or_else(|| EngineError::CardNotOwned(name.to_string()))?;
        card.banked += copies;
        Ok(())
    }

    /// Owned card names of one rarity, sorted for reproducible draws.
    pub fn pool(&self, catalog: &CardCatalog, rarity: Rarity) -> EngineResult<Vec<&str>> {
        let mut pool = Vec::new();
        for card in self.cards.values() {
            if catalog.lookup(&card.name)?.rarity == rarity {
                pool.push(card.name.as_str());
            }
        }
        pool.sort_unstable();
        Ok(pool)
    }

    /// Does the player own a commander that has never received a copy?
    pub fn has_fresh_commander(&self, catalog: &CardCatalog) -> EngineResult<bool> {
        for card in self.cards.values() {
            if card.banked == 0 && catalog.lookup(&card.name)?.rarity == Rarity::Commander {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
