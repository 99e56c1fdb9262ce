//! Block reward calculation
//!
//! Geometric halving schedule: the reward is divided by two each time the
//! chain height crosses a multiple of the halving interval. Amounts are `f64`;
//! halving only divides by powers of two, so values stay exact until they
//! underflow towards zero.

/// Check if the reward should be recomputed at this height
pub fn should_halve(height: u64, halving_interval: u64) -> bool {
    halving_interval > 0 && height > 0 && height % halving_interval == 0
}

/// Reward in effect once the chain has reached `height`
///
/// Formula: reward = initial_reward / 2^(height / halving_interval)
pub fn reward_at_height(height: u64, initial_reward: f64, halving_interval: u64) -> f64 {
    if halving_interval == 0 {
        return initial_reward;
    }
    let halvings = height / halving_interval;
    match i32::try_from(halvings) {
        Ok(exp) => initial_reward * 0.5f64.powi(exp),
        Err(_) => 0.0,
    }
}

/// Amount paid to the miner of the block at `height`
///
/// The payout for a block uses the reward in effect at its parent; the
/// correction at a halving boundary only applies from the next block on.
/// Genesis pays nothing.
pub fn block_payout(height: u64, initial_reward: f64, halving_interval: u64) -> f64 {
    if height == 0 {
        return 0.0;
    }
    reward_at_height(height - 1, initial_reward, halving_interval)
}

/// Calculate total issued after `num_blocks` mined blocks
///
/// Simulates the payout schedule; used to check ledger integrity.
pub fn calculate_total_issued(num_blocks: u64, initial_reward: f64, halving_interval: u64) -> f64 {
    (1..=num_blocks)
        .map(|height| block_payout(height, initial_reward, halving_interval))
        .sum()
}
