//! Property-based tests for PowChain
//!
//! These tests verify hashing, mining, reward and difficulty invariants hold
//! under random inputs.

use proptest::prelude::*;
use powchain::consensus::{
    block_payout, calculate_next_difficulty, calculate_total_issued, reward_at_height, Block,
};
use powchain::mining::Miner;
use powchain::storage::Ledger;
use std::time::Duration;

// ============================================================================
// PROPERTY-BASED TESTS
// ============================================================================

proptest! {
    /// Block hash is deterministic
    #[test]
    fn prop_block_hash_deterministic(
        index in 0u64..1_000_000u64,
        timestamp in 0u64..u64::MAX,
        data in ".{0,64}",
        previous_hash in "[0-9a-f]{64}",
        nonce in 0u64..u64::MAX
    ) {
        let block1 = Block::with_nonce(index, timestamp, data.clone(), previous_hash.clone(), None, nonce);
        let block2 = Block::with_nonce(index, timestamp, data, previous_hash, None, nonce);

        prop_assert_eq!(block1.hash, block2.hash);
        prop_assert_eq!(block1.compute_hash(), block1.compute_hash());
    }

    /// Different nonces produce different hashes
    #[test]
    fn prop_different_nonce_different_hash(nonce in 0u64..u64::MAX / 2) {
        let block1 = Block::with_nonce(1, 0, "data", "prev", None, nonce);
        let block2 = Block::with_nonce(1, 0, "data", "prev", None, nonce + 1);

        prop_assert_ne!(block1.hash, block2.hash);
    }

    /// Reward halves at each boundary and is never negative
    #[test]
    fn prop_reward_halves_per_interval(
        initial in 0.0f64..1_000_000.0,
        interval in 1u64..1_000,
        periods in 0u64..500,
        offset in 0u64..1_000
    ) {
        let height = periods * interval + offset % interval;
        let reward = reward_at_height(height, initial, interval);
        let next_period = reward_at_height(height + interval, initial, interval);

        prop_assert!(reward >= 0.0);
        prop_assert!(reward <= initial);
        prop_assert_eq!(next_period, reward / 2.0);
    }

    /// Total issued never exceeds twice the first period's issuance
    #[test]
    fn prop_total_issued_bounded(
        initial in 0.0f64..1_000.0,
        interval in 1u64..50,
        blocks in 0u64..2_000
    ) {
        let total = calculate_total_issued(blocks, initial, interval);
        prop_assert!(total >= 0.0);
        prop_assert!(total <= 2.0 * initial * interval as f64 + 1e-6);
    }

    /// Ledger balances equal the payout schedule
    #[test]
    fn prop_ledger_matches_schedule(blocks in 1u64..200, interval in 1u64..20) {
        let mut ledger = Ledger::new();
        for height in 1..=blocks {
            ledger.credit("miner", block_payout(height, 50.0, interval));
        }
        prop_assert_eq!(ledger.balance("miner"), calculate_total_issued(blocks, 50.0, interval));
    }

    /// Difficulty moves by at most one step and never underflows
    #[test]
    fn prop_difficulty_step_bounded(
        current in 0u32..64,
        times_ms in prop::collection::vec(0u64..10_000, 1..20),
        target_ms in 1u64..10_000
    ) {
        let times: Vec<Duration> = times_ms.iter().map(|ms| Duration::from_millis(*ms)).collect();
        let correction = calculate_next_difficulty(current, &times, Duration::from_millis(target_ms))
            .unwrap();

        prop_assert!(correction.next.abs_diff(current) <= 1);
        if correction.average > correction.upper_bound {
            prop_assert_eq!(correction.next, current.saturating_sub(1));
        } else if correction.average < correction.lower_bound {
            prop_assert_eq!(correction.next, current + 1);
        } else {
            prop_assert_eq!(correction.next, current);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Mined hashes carry the required zero prefix
    #[test]
    fn prop_mining_postcondition(data in ".{0,32}", difficulty in 0u32..=3) {
        let mut block = Block::new(7, 1_700_000_000_000, data, "prev", Some("miner".into()));
        Miner::new().mine(&mut block, difficulty).unwrap();

        let prefix = "0".repeat(difficulty as usize);
        prop_assert!(block.hash.to_hex().starts_with(&prefix));
        prop_assert_eq!(block.hash, block.compute_hash());
    }
}

// ============================================================================
// SCHEDULE TESTS
// ============================================================================

/// Test: Reward applied after each halving boundary
#[test]
fn test_reward_after_boundaries() {
    assert_eq!(reward_at_height(10, 50.0, 10), 25.0);
    assert_eq!(reward_at_height(20, 50.0, 10), 12.5);
}

/// Test: Slow, fast and on-target samples around a 2s target
#[test]
fn test_difficulty_direction_around_target() {
    let target = Duration::from_secs(2);
    let avg = |s: u64| vec![Duration::from_secs(s); 10];

    assert_eq!(calculate_next_difficulty(5, &avg(3), target).unwrap().next, 4);
    assert_eq!(calculate_next_difficulty(5, &avg(1), target).unwrap().next, 6);
    assert_eq!(calculate_next_difficulty(5, &avg(2), target).unwrap().next, 5);
}
