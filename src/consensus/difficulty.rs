//! Difficulty correction algorithm
//!
//! Every `interval` blocks the mean mining time since the previous correction
//! is compared against a band around the target time. Too slow lowers the
//! difficulty by one hex digit, too fast raises it by one.

use std::time::Duration;
use crate::constants::{DIFFICULTY_LOWER_BOUND, DIFFICULTY_UPPER_BOUND, MAX_DIFFICULTY};

/// Outcome of one difficulty correction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifficultyCorrection {
    /// Difficulty before the correction
    pub previous: u32,
    /// Difficulty after the correction
    pub next: u32,
    /// Mean mining time over the sampled blocks
    pub average: Duration,
    /// Averages above this lower the difficulty
    pub upper_bound: Duration,
    /// Averages below this raise the difficulty
    pub lower_bound: Duration,
}

impl DifficultyCorrection {
    /// Whether the difficulty moved
    pub fn changed(&self) -> bool {
        self.previous != self.next
    }
}

/// Calculate the next difficulty from observed mining times
///
/// This is a pure function with no side effects. Returns `None` when no
/// mining times were recorded. Difficulty never drops below 0 and never
/// exceeds the digest length.
pub fn calculate_next_difficulty(
    current_difficulty: u32,
    mining_times: &[Duration],
    target_time: Duration,
) -> Option<DifficultyCorrection> {
    if mining_times.is_empty() {
        return None;
    }

    // Samples, mean and bounds are all compared at millisecond resolution
    let samples = mining_times.len() as u128;
    let total_ms: u128 = mining_times.iter().map(|t| round_millis(t.as_nanos())).sum();
    let average = millis(div_round(total_ms, samples));

    let target_nanos = target_time.as_nanos();
    let upper_bound = millis(round_millis(
        target_nanos * u128::from(DIFFICULTY_UPPER_BOUND.0) / u128::from(DIFFICULTY_UPPER_BOUND.1),
    ));
    let lower_bound = millis(round_millis(
        target_nanos * u128::from(DIFFICULTY_LOWER_BOUND.0) / u128::from(DIFFICULTY_LOWER_BOUND.1),
    ));

    let next = if average > upper_bound {
        current_difficulty.saturating_sub(1)
    } else if average < lower_bound {
        current_difficulty.saturating_add(1).min(MAX_DIFFICULTY)
    } else {
        current_difficulty
    };

    Some(DifficultyCorrection {
        previous: current_difficulty,
        next,
        average,
        upper_bound,
        lower_bound,
    })
}

fn div_round(numerator: u128, denominator: u128) -> u128 {
    (numerator + denominator / 2) / denominator
}

fn round_millis(nanos: u128) -> u128 {
    div_round(nanos, 1_000_000)
}

fn millis(ms: u128) -> Duration {
    Duration::from_millis(u64::try_from(ms).unwrap_or(u64::MAX))
}

/// Check if difficulty should be corrected at this height
pub fn should_adjust_difficulty(height: u64, interval: u64) -> bool {
    interval > 0 && height > 0 && height % interval == 0
}
