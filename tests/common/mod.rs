//! Shared fixtures: a small card catalog and tuning tables.

#![allow(dead_code)]

use std::sync::Arc;

use rush_engine::{CardCatalog, EngineConfig, PlayerId, RushEngine, TuningTables};

pub const CATALOG: &str = r#"[
    {"name": "Troopers", "rarity": "Common", "category": "Troop", "hp": 100, "att": 20, "attack_speed": 1.0, "squad_size": 3},
    {"name": "Pitcher", "rarity": "Common", "category": "Troop", "hp": 60, "att": 30, "attack_speed": 1.2, "target": "Both"},
    {"name": "Shields", "rarity": "Common", "category": "Troop", "hp": 400, "att": 10, "attack_speed": 1.0, "space": 2},
    {"name": "Rage", "rarity": "Common", "category": "Support",
     "ability": {"kind": "Boost", "value": 10.0, "duration": 2.0}},
    {"name": "Mines", "rarity": "Common", "category": "Defense", "hp": 50, "att": 80, "attack_speed": 2.0},
    {"name": "Bomb", "rarity": "Common", "category": "Defense", "hp": 80, "att": 60, "attack_speed": 2.0},
    {"name": "Cannon", "rarity": "Common", "category": "Defense", "hp": 300, "att": 30, "attack_speed": 1.5, "space": 2},
    {"name": "Blaster", "rarity": "Rare", "category": "Troop", "hp": 250, "att": 40, "attack_speed": 1.5, "space": 2},
    {"name": "Smoke", "rarity": "Rare", "category": "Support", "unlock_hq": 2,
     "ability": {"kind": "Invisibility", "value": 5.0, "duration": 2.0}},
    {"name": "Sarge", "rarity": "Commander", "category": "Commander", "hp": 1000, "att": 80, "attack_speed": 1.0,
     "space": 0, "unlock_hq": 2},
    {"name": "Tank", "rarity": "Epic", "category": "Troop", "hp": 2000, "att": 90, "attack_speed": 2.0,
     "space": 4, "unlock_hq": 3}
]"#;

pub const TUNING: &str = r#"{
    "hq": [
        {"level": 1, "attack_cost": 10, "resource_yield": 50, "box_multiplier": 1.0, "upgrade_cost": 100},
        {"level": 2, "attack_cost": 30, "resource_yield": 90, "box_multiplier": 1.5, "upgrade_cost": 500},
        {"level": 3, "attack_cost": 60, "resource_yield": 140, "box_multiplier": 2.0, "upgrade_cost": 2000}
    ],
    "chopper": [
        {"level": 1, "troop_capacity": 10, "support_capacity": 2, "defense_capacity": 8, "upgrade_cost": 50},
        {"level": 2, "troop_capacity": 15, "support_capacity": 3, "defense_capacity": 12, "upgrade_cost": 200},
        {"level": 3, "troop_capacity": 20, "support_capacity": 4, "defense_capacity": 16, "upgrade_cost": 800}
    ],
    "xp": [
        {"level": 1, "threshold": 10, "gem_reward": 0, "max_hq": 1},
        {"level": 2, "threshold": 20, "gem_reward": 3, "max_hq": 2},
        {"level": 3, "threshold": 40, "gem_reward": 5, "max_hq": 3},
        {"level": 4, "threshold": 80, "gem_reward": 8, "max_hq": 3}
    ],
    "upgrades": {
        "Common": [
            {"level": 1, "copies": 2, "gold": 5, "xp": 4},
            {"level": 2, "copies": 4, "gold": 20, "xp": 8}
        ],
        "Rare": [
            {"level": 5, "copies": 2, "gold": 50, "xp": 10}
        ]
    },
    "boxes": [
        {"kind": "Free", "stacks": 4, "total_cards": 10, "commander_chance": 0, "epic_chance": 0,
         "rare_chance": 10, "min_gold": 10, "max_gold": 20},
        {"kind": "Common", "stacks": 3, "total_cards": 8, "commander_chance": 0, "epic_chance": 0,
         "rare_chance": 5, "min_gold": 20, "max_gold": 40},
        {"kind": "Rare", "stacks": 4, "total_cards": 12, "commander_chance": 0, "epic_chance": 20,
         "rare_chance": 1, "min_gold": 40, "max_gold": 80},
        {"kind": "Epic", "stacks": 5, "total_cards": 20, "commander_chance": 50, "epic_chance": 1,
         "rare_chance": 1, "min_gold": 80, "max_gold": 160},
        {"kind": "Mega", "stacks": 8, "total_cards": 40, "commander_chance": 1, "epic_chance": 1,
         "rare_chance": 1, "min_gold": 200, "max_gold": 400},
        {"kind": "Defense", "stacks": 5, "total_cards": 15, "commander_chance": 0, "epic_chance": 0,
         "rare_chance": 1, "min_gold": 50, "max_gold": 100}
    ],
    "leagues": [
        {"name": "Bronze", "min_stars": 0, "box_multiplier": 1.0},
        {"name": "Silver", "min_stars": 100, "box_multiplier": 1.5},
        {"name": "Gold", "min_stars": 300, "box_multiplier": 2.0}
    ],
    "computer_defenses": [
        {"hq_level": 1, "cards": [["Troopers", 4]]},
        {"hq_level": 2, "cards": [["Cannon", 2], ["Troopers", 4]]}
    ]
}"#;

pub fn catalog() -> Arc<CardCatalog> {
    Arc::new(CardCatalog::from_json(CATALOG).unwrap())
}

pub fn tuning() -> Arc<TuningTables> {
    Arc::new(TuningTables::from_json(TUNING).unwrap())
}

pub fn engine(seed: u64) -> RushEngine {
    RushEngine::in_memory(catalog(), tuning(), EngineConfig::default().with_seed(seed))
}

/// Engine with `count` registered players, ids 1..=count.
pub fn engine_with_players(seed: u64, count: u64) -> RushEngine {
    let engine = engine(seed);
    for id in 1..=count {
        engine.register_player(PlayerId::new(id)).unwrap();
    }
    engine
}

/// Overwrite part of a player's profile directly in the store.
pub fn edit(engine: &RushEngine, id: u64, f: impl FnOnce(&mut rush_engine::PlayerProfile)) {
    use rush_engine::ProfileStore;
    engine
        .store()
        .update(PlayerId::new(id), |profile| {
            f(profile);
            Ok(())
        })
        .unwrap();
}
