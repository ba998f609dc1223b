//! Player profiles - everything the engine persists per player.

use serde::{Deserialize, Serialize};

use crate::battle::{Capacities, Loadout};
use crate::cards::OwnedCards;
use crate::core::{EngineResult, PlayerId};
use crate::economy::PlayerLedger;
use crate::matchmaking::MatchCandidate;
use crate::tuning::TuningTables;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub id: PlayerId,
    pub ledger: PlayerLedger,
    pub cards: OwnedCards,
    pub attack: Loadout,
    pub defense: Loadout,
}

impl PlayerProfile {
    /// Housing capacities at the current chopper level.
    pub fn capacities(&self, tables: &TuningTables) -> EngineResult<Capacities> {
        Ok(tables.chopper(self.ledger.chopper_level)?.into())
    }

    /// Public snapshot used by the matchmaker.
    #[must_use]
    pub fn candidate(&self) -> MatchCandidate {
        MatchCandidate {
            id: self.id,
            total_stars: self.ledger.total_stars(),
            has_defense: !self.defense.is_empty(),
        }
    }
}
