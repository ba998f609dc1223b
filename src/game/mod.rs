//! Caller-facing operations.
//!
//! `RushEngine` is the single entry point a front end talks to.

pub mod engine;
pub mod report;

pub use engine::RushEngine;
pub use report::{CardUpgrade, HqUpgrade, RushReport, RushRequest};
