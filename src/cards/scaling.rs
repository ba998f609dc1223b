//! Level-dependent stat scaling.
//!
//! Every card stat grows linearly from its rarity's starting level:
//!
//! - combat stats (hp, attack) gain a tenth of their base value per level
//!   and are truncated to whole numbers
//! - support durations gain a flat half second per level and stay fractional
//!
//! A raw stat of exactly zero means "not applicable" and is passed through.
//! Scaling is pure: identical inputs always give identical outputs.

use smallvec::SmallVec;
use thiserror::Error;

use super::definition::Rarity;

/// Scaled stats, in the same order as the raw input.
pub type ScaledStats = SmallVec<[f64; 2]>;

/// Clamping signal: the requested level is below the rarity's floor.
///
/// Not an error. Callers re-invoke with `min_level`, or use
/// [`StatScaler::scale_clamped`] which does that for them.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{rarity} cards start at level {min_level}")]
pub struct BelowMinimumLevel {
    pub rarity: Rarity,
    pub min_level: u32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum StepRule {
    /// Base value / 10 per level, truncated result.
    TenthOfBase,
    /// Fixed amount per level, fractional result.
    Flat(f64),
}

/// Stat scaler with its per-level increment rule fixed at construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StatScaler {
    rule: StepRule,
}

impl StatScaler {
    /// Seconds added to a support duration per level.
    pub const DURATION_STEP: f64 = 0.5;

    /// Scaler for hp and attack.
    #[must_use]
    pub const fn combat() -> Self {
        Self { rule: StepRule::TenthOfBase }
    }

    /// Scaler for support ability durations.
    #[must_use]
    pub const fn duration() -> Self {
        Self {
            rule: StepRule::Flat(Self::DURATION_STEP),
        }
    }

    /// Pick the scaler for a card's primary stats.
    #[must_use]
    pub const fn for_card(is_support: bool) -> Self {
        if is_support {
            Self::duration()
        } else {
            Self::combat()
        }
    }

    /// Scale `raw` stats to `level`.
    pub fn scale(&self, level: u32, rarity: Rarity, raw: &[f64]) -> Result<ScaledStats, BelowMinimumLevel> {
        let start = rarity.starting_level();
        if level < start {
            return Err(BelowMinimumLevel { rarity, min_level: start });
        }
        let steps = level - start;

        Ok(raw.iter().map(|&stat| self.scale_one(stat, steps)).collect())
    }

    /// Scale, retrying at the rarity floor when `level` is below it.
    #[must_use]
    pub fn scale_clamped(&self, level: u32, rarity: Rarity, raw: &[f64]) -> ScaledStats {
        match self.scale(level, rarity, raw) {
            Ok(stats) => stats,
            Err(signal) => self.scale(signal.min_level, rarity, raw).unwrap_or_default(),
        }
    }

    fn scale_one(&self, stat: f64, steps: u32) -> f64 {
        if stat == 0.0 {
            return stat;
        }

        let increment = match self.rule {
            StepRule::TenthOfBase => stat / 10.0,
            StepRule::Flat(step) => step,
        };

        let mut value = stat;
        for _ in 0..steps {
            value += increment;
        }

        match self.rule {
            StepRule::TenthOfBase => value.trunc(),
            StepRule::Flat(_) => value,
        }
    }
}

/// Scale `raw` stats for a card of `rarity` at `level`.
pub fn scale(level: u32, rarity: Rarity, raw: &[f64], is_support: bool) -> Result<ScaledStats, BelowMinimumLevel> {
    StatScaler::for_card(is_support).scale(level, rarity, raw)
}
