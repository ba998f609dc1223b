//! Engine configuration.
//!
//! Tunable rules that are not part of the external tuning tables:
//! - onboarding star overrides and the matchmaking threshold
//! - key and defense-box gating constants
//! - the starter profile handed to newly registered players
//!
//! Everything has a sensible default; builder methods override single knobs.

use serde::{Deserialize, Serialize};

/// Initial state for a newly registered player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StarterProfile {
    pub gold: u64,
    pub gems: u64,
    pub keys: u32,

    /// Starting attack squad as (card name, count).
    pub attack: Vec<(String, u32)>,

    /// Starting defense as (card name, count).
    pub defense: Vec<(String, u32)>,
}

impl Default for StarterProfile {
    fn default() -> Self {
        let squad = |names: &[&str]| names.iter().map(|n| (n.to_string(), 1)).collect();
        Self {
            gold: 200,
            gems: 150,
            keys: 5,
            attack: squad(&["Troopers", "Pitcher", "Shields", "Rage"]),
            defense: squad(&["Mines", "Bomb", "Cannon"]),
        }
    }
}

/// Engine-wide rule configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Root RNG seed. Same seed and call sequence, same results.
    pub seed: u64,

    /// Players at or below this many lifetime stars fight the computer.
    pub training_stars: u32,

    /// Below this many lifetime stars every battle awards three stars.
    pub full_stars_below: u32,

    /// Below this many lifetime stars (and past `full_stars_below`) every
    /// battle awards a single star.
    pub single_star_below: u32,

    /// Opponents must be within this many stars of the attacker.
    pub matchmaking_window: u32,

    /// Maximum keys a player can hold.
    pub max_keys: u32,

    /// Banked stars needed to unlock a battle box.
    pub stars_per_box: u32,

    /// Banked defense stars needed to collect a defense box.
    pub defense_box_stars: u32,

    pub starter: StarterProfile,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            training_stars: 9,
            full_stars_below: 9,
            single_star_below: 10,
            matchmaking_window: 100,
            max_keys: 5,
            stars_per_box: 5,
            defense_box_stars: 100,
            starter: StarterProfile::default(),
        }
    }
}

impl EngineConfig {
    /// Set the root RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the training threshold for matchmaking.
    #[must_use]
    pub fn with_training_stars(mut self, stars: u32) -> Self {
        self.training_stars = stars;
        self
    }

    /// Set the matchmaking star window.
    #[must_use]
    pub fn with_matchmaking_window(mut self, window: u32) -> Self {
        self.matchmaking_window = window;
        self
    }

    /// Replace the starter profile.
    #[must_use]
    pub fn with_starter(mut self, starter: StarterProfile) -> Self {
        self.starter = starter;
        self
    }

    /// Onboarding override for a player with `lifetime_stars` before the battle.
    ///
    /// Returns the forced star count, or `None` once the player is past
    /// the on-ramp.
    #[must_use]
    pub fn onboarding_stars(&self, lifetime_stars: u32) -> Option<u8> {
        if lifetime_stars < self.full_stars_below {
            Some(3)
        } else if lifetime_stars < self.single_star_below {
            Some(1)
        } else {
            None
        }
    }
}
