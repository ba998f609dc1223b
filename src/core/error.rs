//! Engine error taxonomy.
//!
//! Every failure is detected before the first profile write, so an `Err`
//! always means "nothing changed". `EngineError::kind` groups the variants
//! the way callers react to them.

use thiserror::Error;

use super::player::PlayerId;
use crate::cards::CardCategory;

/// Broad classes of engine failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed request. Surfaced verbatim to the player.
    Validation,
    /// The player lacks gold, space, copies or cards.
    Resource,
    /// External data is stale or corrupt. Logged, never silently repaired.
    DataIntegrity,
    /// The caller's deadline passed before anything was committed.
    Aborted,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    // === Validation ===
    #[error("you cannot attack your own base")]
    SelfAttack,

    #[error("your squad has no troops selected")]
    EmptySquad,

    #[error("quantity must be at least 1")]
    InvalidQuantity,

    #[error("{0} has no profile")]
    UnknownPlayer(PlayerId),

    #[error("{0} already has a profile")]
    PlayerExists(PlayerId),

    #[error("{0} is already at its maximum level")]
    MaxLevel(String),

    #[error("level {requested} is locked until player level allows it (max {max})")]
    HqLocked { requested: u32, max: u32 },

    // === Resource ===
    #[error("not enough gold: need {required}, have {available}")]
    InsufficientGold { required: u64, available: u64 },

    #[error("{category:?} housing exceeded: need {required}, capacity {capacity}")]
    CapacityExceeded {
        category: CardCategory,
        required: u32,
        capacity: u32,
    },

    #[error("only one commander can be selected")]
    CommanderSlotTaken,

    #[error("you do not own {0}")]
    CardNotOwned(String),

    #[error("{card} needs {required} copies to upgrade, {banked} banked")]
    InsufficientCopies {
        card: String,
        required: u32,
        banked: u32,
    },

    #[error("defense box needs {required} defense stars, {banked} banked")]
    NotEligible { banked: u32, required: u32 },

    // === Data integrity ===
    #[error("card {0} is missing from the catalog")]
    CardNotFound(String),

    #[error("player owns no cards to draw from")]
    NoEligibleCards,

    #[error("{table} table has no row for {key}")]
    MissingTuning { table: &'static str, key: String },

    #[error("box tuning uses unsupported stack count {0}")]
    UnsupportedStacks(u32),

    // === Aborted ===
    #[error("request deadline passed before commit")]
    DeadlineExceeded,
}

impl EngineError {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::SelfAttack
            | EngineError::EmptySquad
            | EngineError::InvalidQuantity
            | EngineError::UnknownPlayer(_)
            | EngineError::PlayerExists(_)
            | EngineError::MaxLevel(_)
            | EngineError::HqLocked { .. } => ErrorKind::Validation,

            EngineError::InsufficientGold { .. }
            | EngineError::CapacityExceeded { .. }
            | EngineError::CommanderSlotTaken
            | EngineError::CardNotOwned(_)
            | EngineError::InsufficientCopies { .. }
            | EngineError::NotEligible { .. } => ErrorKind::Resource,

            EngineError::CardNotFound(_)
            | EngineError::NoEligibleCards
            | EngineError::MissingTuning { .. }
            | EngineError::UnsupportedStacks(_) => ErrorKind::DataIntegrity,

            EngineError::DeadlineExceeded => ErrorKind::Aborted,
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Failure while loading catalog or tuning data at startup.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to parse {what}: {source}")]
    Parse {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("card {0} is defined twice")]
    DuplicateCard(String),

    #[error("{table} table is empty")]
    EmptyTable { table: &'static str },
}

impl LoadError {
    pub(crate) fn parse(what: &'static str) -> impl FnOnce(serde_json::Error) -> LoadError {
        move |source| LoadError::Parse { what, source }
    }
}
