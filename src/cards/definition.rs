//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of a card type as loaded
//! from the catalog files. For example, "Troopers" are a Common ground troop
//! with 100 hp and 20 attack at level 1 - these are part of the definition.
//!
//! Player-specific data (level, banked copies) lives in `OwnedCard`.

use serde::{Deserialize, Serialize};

/// Card rarity. Determines the starting level and the loot tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Commander,
}

impl Rarity {
    /// All rarities from most to least valuable.
    pub const DESCENDING: [Rarity; 4] = [Rarity::Commander, Rarity::Epic, Rarity::Rare, Rarity::Common];

    /// Level a card of this rarity starts at.
    #[must_use]
    pub const fn starting_level(self) -> u32 {
        match self {
            Rarity::Common => 1,
            Rarity::Rare => 5,
            Rarity::Epic => 9,
            Rarity::Commander => 13,
        }
    }

    /// Next rarity down the loot fallback chain. `None` below Common.
    #[must_use]
    pub const fn next_lower(self) -> Option<Rarity> {
        match self {
            Rarity::Commander => Some(Rarity::Epic),
            Rarity::Epic => Some(Rarity::Rare),
            Rarity::Rare => Some(Rarity::Common),
            Rarity::Common => None,
        }
    }
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Rarity::Common => "Common",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Commander => "Commander",
        };
        f.write_str(name)
    }
}

/// What slot a card occupies in a loadout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardCategory {
    /// Attacking unit, housed in troop space.
    Troop,
    /// Support drop with a timed ability, housed in support space.
    Support,
    /// Base defense, housed in defense space.
    Defense,
    /// Hero unit. One slot per squad, no housing cost.
    Commander,
}

/// What a card can hit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetClass {
    #[default]
    Ground,
    Air,
    Both,
}

/// Timed effect of a support drop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityKind {
    /// Adds to own damage per second.
    Damage,
    /// Adds to own damage per second and hp.
    Boost,
    /// Adds to own hp.
    Heal,
    /// Subtracts from the opposing damage per second.
    Invisibility,
    /// Subtracts from the opposing damage per second.
    Freeze,
}

/// Support ability with its strength and base duration in seconds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ability {
    pub kind: AbilityKind,
    pub value: f64,
    pub duration: f64,
}

impl Ability {
    #[must_use]
    pub fn new(kind: AbilityKind, value: f64, duration: f64) -> Self {
        Self { kind, value, duration }
    }
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use rush_engine::cards::{CardDefinition, Rarity};
///
/// let troopers = CardDefinition::troop("Troopers", Rarity::Common, 100, 20, 1.0)
///     .with_squad_size(3);
///
/// assert_eq!(troopers.combat_stats(), [100.0, 20.0]);
/// assert!(!troopers.is_support());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Unique card name, the catalog key.
    pub name: String,

    pub rarity: Rarity,

    pub category: CardCategory,

    /// Base hit points at the rarity's starting level.
    #[serde(default)]
    pub hp: u32,

    /// Base damage per hit at the rarity's starting level.
    #[serde(default)]
    pub att: u32,

    /// Seconds between hits.
    #[serde(default)]
    pub attack_speed: f64,

    #[serde(default)]
    pub target: TargetClass,

    /// Housing space consumed per copy in a loadout.
    #[serde(default = "default_space")]
    pub space: u32,

    /// HQ level at which the card becomes available.
    #[serde(default = "default_unlock_hq")]
    pub unlock_hq: u32,

    /// Support cards only.
    #[serde(default)]
    pub ability: Option<Ability>,

    /// Troops only: units deployed per copy.
    #[serde(default)]
    pub squad_size: Option<u32>,
}

fn default_space() -> u32 {
    1
}

fn default_unlock_hq() -> u32 {
    1
}

impl CardDefinition {
    fn base(name: impl Into<String>, rarity: Rarity, category: CardCategory) -> Self {
        Self {
            name: name.into(),
            rarity,
            category,
            hp: 0,
            att: 0,
            attack_speed: 0.0,
            target: TargetClass::Ground,
            space: default_space(),
            unlock_hq: default_unlock_hq(),
            ability: None,
            squad_size: None,
        }
    }

    /// Create a troop definition.
    #[must_use]
    pub fn troop(name: impl Into<String>, rarity: Rarity, hp: u32, att: u32, attack_speed: f64) -> Self {
        Self {
            hp,
            att,
            attack_speed,
            ..Self::base(name, rarity, CardCategory::Troop)
        }
    }

    /// Create a defense definition.
    #[must_use]
    pub fn defense(name: impl Into<String>, rarity: Rarity, hp: u32, att: u32, attack_speed: f64) -> Self {
        Self {
            hp,
            att,
            attack_speed,
            ..Self::base(name, rarity, CardCategory::Defense)
        }
    }

    /// Create a commander definition. Commanders are always Commander rarity.
    #[must_use]
    pub fn commander(name: impl Into<String>, hp: u32, att: u32, attack_speed: f64) -> Self {
        Self {
            hp,
            att,
            attack_speed,
            space: 0,
            ..Self::base(name, Rarity::Commander, CardCategory::Commander)
        }
    }

    /// Create a support drop definition.
    #[must_use]
    pub fn support(name: impl Into<String>, rarity: Rarity, ability: Ability) -> Self {
        Self {
            ability: Some(ability),
            target: TargetClass::Both,
            ..Self::base(name, rarity, CardCategory::Support)
        }
    }

    /// Set housing space (builder pattern).
    #[must_use]
    pub fn with_space(mut self, space: u32) -> Self {
        self.space = space;
        self
    }

    /// Set the unlocking HQ level (builder pattern).
    #[must_use]
    pub fn with_unlock_hq(mut self, level: u32) -> Self {
        self.unlock_hq = level;
        self
    }

    /// Set target class (builder pattern).
    #[must_use]
    pub fn with_target(mut self, target: TargetClass) -> Self {
        self.target = target;
        self
    }

    /// Set squad size (builder pattern).
    #[must_use]
    pub fn with_squad_size(mut self, size: u32) -> Self {
        self.squad_size = Some(size);
        self
    }

    /// Is this a support drop?
    #[must_use]
    pub fn is_support(&self) -> bool {
        self.category == CardCategory::Support
    }

    /// Raw `[hp, att]` for stat scaling.
    #[must_use]
    pub fn combat_stats(&self) -> [f64; 2] {
        [f64::from(self.hp), f64::from(self.att)]
    }
}
