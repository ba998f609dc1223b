//! Requests and reports for caller-facing operations.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::battle::BattleOutcome;
use crate::core::PlayerId;
use crate::economy::LevelUp;
use crate::loot::BoxResult;

/// An attack request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RushRequest {
    pub attacker: PlayerId,

    /// Explicit target. When absent, the engine matchmakes or falls back
    /// to a computer defense.
    pub opponent: Option<PlayerId>,

    /// Abort without effects if this passes before the first write.
    pub deadline: Option<Instant>,
}

impl RushRequest {
    #[must_use]
    pub fn new(attacker: PlayerId) -> Self {
        Self {
            attacker,
            opponent: None,
            deadline: None,
        }
    }

    #[must_use]
    pub fn with_opponent(mut self, opponent: PlayerId) -> Self {
        self.opponent = Some(opponent);
        self
    }

    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// Everything a rush did for the attacker.
#[derive(Clone, Debug, PartialEq)]
pub struct RushReport {
    /// Human defender, or `None` for a computer defense.
    pub opponent: Option<PlayerId>,

    /// Raw battle score before the onboarding override.
    pub score: f64,

    pub outcome: BattleOutcome,

    /// Gold charged for the attack.
    pub attack_cost: u64,

    pub level_up: LevelUp,

    /// Battle box unlocked by this attack, if any.
    pub box_result: Option<BoxResult>,
}

/// Result of a card upgrade.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardUpgrade {
    pub card: String,
    pub level: u32,
    pub gold_spent: u64,
    pub xp_gained: u64,
    pub level_up: LevelUp,
}

/// Result of an HQ upgrade.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HqUpgrade {
    pub level: u32,
    pub gold_spent: u64,

    /// Cards added to the collection at the new level, sorted.
    pub unlocked: Vec<String>,
}
