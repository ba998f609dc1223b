//! Opponent selection.
//!
//! Candidates are scanned in a fresh random order on every call; the first
//! one inside the star window with a defense to attack wins. Snapshots may
//! be slightly stale.

use serde::{Deserialize, Serialize};

use crate::core::{GameRng, PlayerId};

/// Public snapshot of a potential opponent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchCandidate {
    pub id: PlayerId,
    pub total_stars: u32,
    pub has_defense: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Matchmaker {
    window: u32,
}

impl Matchmaker {
    /// Matchmaker accepting opponents within `window` stars either side.
    #[must_use]
    pub fn new(window: u32) -> Self {
        Self { window }
    }

    #[must_use]
    pub fn window(&self) -> u32 {
        self.window
    }

    /// Is `stars` inside the inclusive window around `attacker_stars`?
    #[must_use]
    pub fn in_window(&self, attacker_stars: u32, stars: u32) -> bool {
        let low = attacker_stars.saturating_sub(self.window);
        let high = attacker_stars.saturating_add(self.window);
        (low..=high).contains(&stars)
    }

    /// Pick an opponent for `attacker`, or `None` if nobody qualifies.
    pub fn find_opponent(
        &self,
        attacker: PlayerId,
        attacker_stars: u32,
        mut candidates: Vec<MatchCandidate>,
        rng: &mut GameRng,
    ) -> Option<PlayerId> {
        rng.shuffle(&mut candidates);
        let found = candidates
            .into_iter()
            .find(|c| c.id != attacker && c.has_defense && self.in_window(attacker_stars, c.total_stars))
            .map(|c| c.id);

        match found {
            Some(id) => log::debug!("matched {} ({} stars) against {}", attacker, attacker_stars, id),
            None => log::debug!("no opponent for {} ({} stars)", attacker, attacker_stars),
        }
        found
    }
}
