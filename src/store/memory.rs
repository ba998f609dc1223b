//! In-memory profile store.
//!
//! Each profile sits behind its own mutex; the map of profiles is behind a
//! read-write lock that is only held long enough to find the entry. Public
//! matchmaking snapshots are kept in a separate map so scanning candidates
//! never waits on a player's update.

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use rustc_hash::FxHashMap;

use super::{PlayerProfile, ProfileStore};
use crate::core::{EngineError, EngineResult, PlayerId};
use crate::matchmaking::MatchCandidate;

#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    profiles: RwLock<FxHashMap<PlayerId, Arc<Mutex<PlayerProfile>>>>,
    snapshots: RwLock<FxHashMap<PlayerId, MatchCandidate>>,
}

impl InMemoryProfileStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored profiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entry(&self, id: PlayerId) -> EngineResult<Arc<Mutex<PlayerProfile>>> {
        self.profiles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
            .ok_or(EngineError::UnknownPlayer(id))
    }

    fn publish(&self, profile: &PlayerProfile) {
        self.snapshots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(profile.id, profile.candidate());
    }
}

impl ProfileStore for InMemoryProfileStore {
    fn get(&self, id: PlayerId) -> EngineResult<PlayerProfile> {
        let entry = self.entry(id)?;
        let profile = entry.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(profile.clone())
    }

    fn contains(&self, id: PlayerId) -> bool {
        self.profiles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&id)
    }

    fn insert(&self, profile: PlayerProfile) -> EngineResult<()> {
        let mut profiles = self.profiles.write().unwrap_or_else(PoisonError::into_inner);
        if profiles.contains_key(&profile.id) {
            return Err(EngineError::PlayerExists(profile.id));
        }
        self.publish(&profile);
        profiles.insert(profile.id, Arc::new(Mutex::new(profile)));
        Ok(())
    }

    fn update<T, F>(&self, id: PlayerId, f: F) -> EngineResult<T>
    where
        F: FnOnce(&mut PlayerProfile) -> EngineResult<T>,
    {
        let entry = self.entry(id)?;
        let mut stored = entry.lock().unwrap_or_else(PoisonError::into_inner);

        let mut draft = stored.clone();
        let value = f(&mut draft)?;
        self.publish(&draft);
        *stored = draft;
        Ok(value)
    }

    fn candidates(&self) -> Vec<MatchCandidate> {
        self.snapshots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .copied()
            .collect()
    }
}
