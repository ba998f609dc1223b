//! Opponent matchmaking by star window.

pub mod matchmaker;

pub use matchmaker::{MatchCandidate, Matchmaker};
