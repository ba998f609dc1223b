//! # rush-engine
//!
//! Battle and economy engine for a squad-based base-battler card game.
//!
//! Players assemble squads of cards (troops, support drops, defenses,
//! commanders), attack each other or a computer base, earn stars, gold and
//! experience, and open reward boxes that grant more cards.
//!
//! ## Design Principles
//!
//! 1. **Injected Reference Data**: The card catalog and tuning tables are
//!    loaded once and shared as `Arc`s. No global state.
//!
//! 2. **Pure Combat**: Stat scaling and battle resolution have no side
//!    effects; only the ledger and loot engine mutate a player.
//!
//! 3. **Per-Player Atomicity**: Every write goes through
//!    `ProfileStore::update`, which locks one player and commits only on
//!    success. Failures never leave partial effects.
//!
//! 4. **Deterministic Randomness**: A seeded root RNG is forked per
//!    operation, so a fixed seed and call sequence reproduce every roll.
//!
//! ## Modules
//!
//! - `core`: Player ids, RNG, configuration, errors
//! - `cards`: Card definitions, catalog, owned cards, stat scaling
//! - `tuning`: HQ, chopper, XP, upgrade, box and league tables
//! - `economy`: Progression ledger and reward formulas
//! - `battle`: Loadouts and the battle resolver
//! - `matchmaking`: Opponent selection by star window
//! - `loot`: Weighted loot distribution
//! - `store`: Profile store trait and in-memory implementation
//! - `game`: `RushEngine`, the caller-facing operations
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use rush_engine::{CardCatalog, EngineConfig, PlayerId, RushEngine, RushRequest, TuningTables};
//!
//! let catalog = CardCatalog::from_json(r#"[
//!     {"name": "Troopers", "rarity": "Common", "category": "Troop", "hp": 100, "att": 20, "attack_speed": 1.0},
//!     {"name": "Cannon", "rarity": "Common", "category": "Defense", "hp": 300, "att": 30, "attack_speed": 1.5}
//! ]"#).unwrap();
//! let tuning = TuningTables::from_json(r#"{
//!     "hq": [{"level": 1, "attack_cost": 10, "resource_yield": 50, "box_multiplier": 1.0, "upgrade_cost": 500}],
//!     "chopper": [{"level": 1, "troop_capacity": 10, "support_capacity": 2, "defense_capacity": 8, "upgrade_cost": 300}],
//!     "xp": [{"level": 1, "threshold": 10, "gem_reward": 0, "max_hq": 1}],
//!     "boxes": [],
//!     "leagues": [{"name": "Bronze", "min_stars": 0, "box_multiplier": 1.0}],
//!     "computer_defenses": [{"hq_level": 1, "cards": [["Troopers", 4]]}]
//! }"#).unwrap();
//!
//! let mut starter = rush_engine::StarterProfile::default();
//! starter.attack = vec![("Troopers".to_string(), 3)];
//! starter.defense = vec![("Cannon".to_string(), 1)];
//! let config = EngineConfig::default().with_starter(starter);
//!
//! let engine = RushEngine::in_memory(Arc::new(catalog), Arc::new(tuning), config);
//! let player = PlayerId::new(1);
//! engine.register_player(player).unwrap();
//!
//! // First battle: onboarding guarantees three stars
//! let report = engine.rush(RushRequest::new(player)).unwrap();
//! assert_eq!(report.outcome.stars, 3);
//! ```

pub mod core;
pub mod cards;
pub mod tuning;
pub mod economy;
pub mod battle;
pub mod matchmaking;
pub mod loot;
pub mod store;
pub mod game;

// Re-export commonly used types
pub use crate::core::{EngineConfig, EngineError, EngineResult, ErrorKind, GameRng, LoadError, PlayerId, StarterProfile};

pub use crate::cards::{
    scale, Ability, AbilityKind, BelowMinimumLevel, CardCatalog, CardCategory, CardDefinition, OwnedCard, OwnedCards,
    Rarity, StatScaler, TargetClass,
};

pub use crate::tuning::{BoxKind, BoxTuning, TuningTables};

pub use crate::economy::{LevelUp, PlayerLedger};

pub use crate::battle::{BattleOutcome, BattleResolver, BattleScore, Capacities, DefenderLevels, Loadout};

pub use crate::matchmaking::{MatchCandidate, Matchmaker};

pub use crate::loot::{split_in_integers, BoxResult, Branch, CardDraw, LootEngine};

pub use crate::store::{InMemoryProfileStore, PlayerProfile, ProfileStore};

pub use crate::game::{CardUpgrade, HqUpgrade, RushEngine, RushReport, RushRequest};
