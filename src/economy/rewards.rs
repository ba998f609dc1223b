//! Battle reward formulas.

use crate::core::GameRng;

/// Attack costs below this pay from the low gold band.
const LOW_COST_CUTOFF: u64 = 25;

/// Gold won for a battle.
///
/// With stars, each star pays a uniform draw from `[5, cost + 10]`
/// (or `[25, cost + 10]` once the attack costs 25 or more). A zero-star
/// battle pays a consolation draw from `[0, cost)`.
pub fn gold_reward(stars: u8, attack_cost: u64, rng: &mut GameRng) -> u64 {
    if stars == 0 {
        if attack_cost == 0 {
            return 0;
        }
        return rng.gen_range(0..attack_cost);
    }

    let lower = if attack_cost < LOW_COST_CUTOFF { 5 } else { 25 };
    let upper = (attack_cost + 10).max(lower);
    rng.gen_range(lower..=upper) * u64::from(stars)
}

/// Experience for a battle: stars times the 1-based league position.
#[must_use]
pub fn xp_reward(stars: u8, league_index: u32) -> u64 {
    u64::from(stars) * u64::from(league_index)
}
