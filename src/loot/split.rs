//! Integer splitting for box rewards.
//!
//! Two layers: a branch's card total is split across rarity tiers by fixed
//! percentages, then each tier's count is split across its slots with an
//! increasing triangular weighting. Both layers always sum back to their
//! input exactly.

use smallvec::SmallVec;

use super::tiers::Branch;

/// Per-slot card counts.
pub type Slots = SmallVec<[u32; 8]>;

/// Split `total` into `pieces` non-negative counts, sorted ascending.
///
/// Slot `i` (1-based) is weighted `i` over `1 + 2 + .. + pieces`, each
/// share rounded down; the last slot absorbs the rounding remainder. Every
/// slot is non-empty once `total` reaches that weight sum. A single piece
/// receives the whole total. Zero pieces yields nothing.
#[must_use]
pub fn split_in_integers(total: u32, pieces: usize) -> Slots {
    match pieces {
        0 => return Slots::new(),
        1 => return smallvec::smallvec![total],
        _ => {}
    }

    let n = pieces as u64;
    let denominator = n * (n + 1) / 2;
    let mut slots: Slots = (1..=n)
        .map(|i| (i * u64::from(total) / denominator) as u32)
        .collect();

    let assigned: u32 = slots.iter().sum();
    if let Some(last) = slots.last_mut() {
        *last += total - assigned;
    }
    slots.sort_unstable();
    slots
}

/// Card counts per rarity tier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TierCounts {
    pub commander: u32,
    pub epic: u32,
    pub rare: u32,
    pub common: u32,
}

impl TierCounts {
    #[must_use]
    pub fn total(&self) -> u32 {
        self.commander + self.epic + self.rare + self.common
    }
}

/// `percent` of `of`, rounded up and capped at `limit`.
fn ceil_share(of: u32, percent: u32, limit: u32) -> u32 {
    let share = (u64::from(of) * u64::from(percent) + 99) / 100;
    (share as u32).min(limit)
}

/// Split a branch's `total` across tiers.
///
/// Commander branch: one commander, then 3% epic, 25% rare of the rest.
/// Epic branch: 3% epic, 25% rare. Rare branch: 28% rare. Higher tiers
/// round up; common takes whatever is left.
#[must_use]
pub fn split_tiers(branch: Branch, total: u32) -> TierCounts {
    let mut counts = TierCounts::default();
    let mut remaining = total;

    if branch == Branch::Commander {
        counts.commander = remaining.min(1);
        remaining -= counts.commander;
    }

    let base = remaining;
    match branch {
        Branch::Commander | Branch::Epic => {
            counts.epic = ceil_share(base, 3, remaining);
            remaining -= counts.epic;
            counts.rare = ceil_share(base, 25, remaining);
            remaining -= counts.rare;
        }
        Branch::Rare => {
            counts.rare = ceil_share(base, 28, remaining);
            remaining -= counts.rare;
        }
        Branch::Common => {}
    }

    counts.common = remaining;
    counts
}
