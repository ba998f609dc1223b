//! Core engine types: player ids, RNG, configuration, errors.
//!
//! Everything else in the crate builds on these.

pub mod player;
pub mod rng;
pub mod config;
pub mod error;

pub use player::PlayerId;
pub use rng::GameRng;
pub use config::{EngineConfig, StarterProfile};
pub use error::{EngineError, EngineResult, ErrorKind, LoadError};
