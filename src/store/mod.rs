//! Player profile storage.
//!
//! The engine talks to storage only through [`ProfileStore`]. Every write
//! goes through `update`, which is the per-player exclusive section: the
//! closure runs on a private copy of the profile while that player is
//! locked, and the copy is committed only if the closure returns `Ok`.

pub mod memory;
pub mod profile;

pub use memory::InMemoryProfileStore;
pub use profile::PlayerProfile;

use crate::core::{EngineResult, PlayerId};
use crate::matchmaking::MatchCandidate;

/// Key-value store of player profiles.
pub trait ProfileStore: Send + Sync {
    /// Snapshot of one profile.
    fn get(&self, id: PlayerId) -> EngineResult<PlayerProfile>;

    fn contains(&self, id: PlayerId) -> bool;

    /// Add a new profile. Fails with `PlayerExists` if the id is taken.
    fn insert(&self, profile: PlayerProfile) -> EngineResult<()>;

    /// Atomic read-modify-write of one profile.
    ///
    /// Concurrent updates to the same player are serialized. An `Err` from
    /// `f` discards every change it made.
    fn update<T, F>(&self, id: PlayerId, f: F) -> EngineResult<T>
    where
        F: FnOnce(&mut PlayerProfile) -> EngineResult<T>;

    /// Matchmaking snapshots of every player. May be slightly stale.
    fn candidates(&self) -> Vec<MatchCandidate>;
}
