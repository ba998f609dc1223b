//! Rarity branches and slot layouts.

use serde::{Deserialize, Serialize};

use crate::cards::Rarity;
use crate::core::{EngineError, EngineResult, GameRng};
use crate::tuning::BoxTuning;

/// Which rarity a box opening is built around.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Branch {
    Commander,
    Epic,
    Rare,
    Common,
}

impl Branch {
    /// Pick a branch with a single roll against the box's chances.
    ///
    /// The roll is compared against `1/commander`, `1/epic`, `1/rare` in
    /// that order; the first threshold it falls under wins, and a chance of
    /// zero never triggers.
    pub fn roll(tuning: &BoxTuning, rng: &mut GameRng) -> Branch {
        let roll = rng.gen_unit();
        Self::from_roll(tuning, roll)
    }

    fn from_roll(tuning: &BoxTuning, roll: f64) -> Branch {
        let ladder = [
            (tuning.commander_chance, Branch::Commander),
            (tuning.epic_chance, Branch::Epic),
            (tuning.rare_chance, Branch::Rare),
        ];
        ladder
            .iter()
            .find(|(chance, _)| *chance > 0 && roll < 1.0 / f64::from(*chance))
            .map_or(Branch::Common, |(_, branch)| *branch)
    }
}

/// Slots per tier for one opening, in `Rarity::DESCENDING` order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotLayout {
    pub commander: usize,
    pub epic: usize,
    pub rare: usize,
    pub common: usize,
}

impl SlotLayout {
    const fn new(commander: usize, epic: usize, rare: usize, common: usize) -> Self {
        Self {
            commander,
            epic,
            rare,
            common,
        }
    }

    /// Layout for a branch and stack count. Stacks must be 3, 4, 5 or 8.
    pub fn for_box(branch: Branch, stacks: u32) -> EngineResult<Self> {
        let layout = match (branch, stacks) {
            (Branch::Common, 3 | 4 | 5 | 8) => Self::new(0, 0, 0, stacks as usize),

            (Branch::Commander, 3) => Self::new(1, 0, 1, 1),
            (Branch::Commander, 4) => Self::new(1, 1, 1, 1),
            (Branch::Commander, 5) => Self::new(1, 1, 1, 2),
            (Branch::Commander, 8) => Self::new(1, 1, 2, 4),

            (Branch::Epic, 3) => Self::new(0, 1, 1, 1),
            (Branch::Epic, 4) => Self::new(0, 1, 1, 2),
            (Branch::Epic, 5) => Self::new(0, 1, 2, 2),
            (Branch::Epic, 8) => Self::new(0, 1, 3, 4),

            (Branch::Rare, 3) => Self::new(0, 0, 1, 2),
            (Branch::Rare, 4) => Self::new(0, 0, 1, 3),
            (Branch::Rare, 5) => Self::new(0, 0, 2, 3),
            (Branch::Rare, 8) => Self::new(0, 0, 3, 5),

            _ => return Err(EngineError::UnsupportedStacks(stacks)),
        };
        Ok(layout)
    }

    #[must_use]
    pub fn slots_for(&self, rarity: Rarity) -> usize {
        match rarity {
            Rarity::Commander => self.commander,
            Rarity::Epic => self.epic,
            Rarity::Rare => self.rare,
            Rarity::Common => self.common,
        }
    }
}
