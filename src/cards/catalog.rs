//! Card catalog for definition lookup.
//!
//! The `CardCatalog` stores every card definition in the game. It is loaded
//! once at startup, then shared read-only (behind an `Arc`) by every engine
//! component that needs card data.

use rustc_hash::FxHashMap;

use super::definition::{CardDefinition, Rarity};
use crate::core::{EngineError, EngineResult, LoadError};

/// Immutable catalog of card definitions keyed by name.
///
/// ## Example
///
/// ```
/// use rush_engine::cards::{CardCatalog, CardDefinition, Rarity};
///
/// let mut catalog = CardCatalog::new();
/// catalog.register(CardDefinition::troop("Troopers", Rarity::Common, 100, 20, 1.0));
///
/// let found = catalog.get("Troopers").unwrap();
/// assert_eq!(found.hp, 100);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: FxHashMap<String, CardDefinition>,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from a JSON array of card definitions.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let defs: Vec<CardDefinition> = serde_json::from_str(json).map_err(LoadError::parse("card catalog"))?;
        Self::from_definitions(defs)
    }

    /// Build a catalog from already-parsed definitions.
    pub fn from_definitions(defs: impl IntoIterator<Item = CardDefinition>) -> Result<Self, LoadError> {
        let mut catalog = Self::new();
        for def in defs {
            if catalog.contains(&def.name) {
                return Err(LoadError::DuplicateCard(def.name));
            }
            catalog.cards.insert(def.name.clone(), def);
        }
        Ok(catalog)
    }

    /// Register a card definition.
    ///
    /// Panics if a card with the same name already exists.
    pub fn register(&mut self, card: CardDefinition) {
        if self.cards.contains_key(&card.name) {
            panic!("Card {:?} already registered", card.name);
        }
        self.cards.insert(card.name.clone(), card);
    }

    /// Get a card definition by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CardDefinition> {
        self.cards.get(name)
    }

    /// Get a card definition, treating a miss as stale external data.
    pub fn lookup(&self, name: &str) -> EngineResult<&CardDefinition> {
        self.cards.get(name).ok_or_else(|| {
            log::error!("card {:?} referenced but missing from the catalog", name);
            EngineError::CardNotFound(name.to_string())
        })
    }

    /// Check if a card name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.cards.contains_key(name)
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all card definitions.
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values()
    }

    /// Cards available at the given HQ level.
    pub fn unlocked_at(&self, hq_level: u32) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values().filter(move |c| c.unlock_hq <= hq_level)
    }

    /// Lowest HQ level at which any card of `rarity` unlocks.
    #[must_use]
    pub fn first_unlock_level(&self, rarity: Rarity) -> Option<u32> {
        self.cards
            .values()
            .filter(|c| c.rarity == rarity)
            .map(|c| c.unlock_hq)
            .min()
    }
}
