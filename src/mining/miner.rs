//! Block miner implementation
//!
//! Performs the proof-of-work nonce search on a candidate block.

use crate::consensus::Block;
use crate::constants::MAX_DIFFICULTY;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;

/// Mining failures
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MiningError {
    /// Iteration cap reached without a qualifying hash
    #[error("Mining aborted after {attempts} attempts")]
    Aborted { attempts: u64 },
    /// Stop signal observed
    #[error("Mining interrupted after {attempts} attempts")]
    Interrupted { attempts: u64 },
    #[error("Nonce space exhausted")]
    NonceExhausted,
    #[error("Difficulty {0} exceeds digest length")]
    DifficultyOutOfRange(u32),
}

/// Successful search statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MiningOutcome {
    /// Nonce increments performed before the hash qualified
    pub attempts: u64,
}

/// Block miner
#[derive(Debug, Clone, Default)]
pub struct Miner {
    /// Optional iteration cap; None searches until success
    max_iterations: Option<u64>,
    /// Stop signal
    stop_signal: Arc<AtomicBool>,
}

impl Miner {
    /// Create an unbounded miner
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a miner that gives up after `max_iterations` nonce increments
    pub fn with_max_iterations(max_iterations: Option<u64>) -> Self {
        Self {
            max_iterations,
            stop_signal: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get a stop signal handle
    pub fn stop_signal(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop_signal)
    }

    /// Stop mining
    pub fn stop(&self) {
        self.stop_signal.store(true, Ordering::SeqCst);
    }

    /// Reset stop signal
    pub fn reset(&self) {
        self.stop_signal.store(false, Ordering::SeqCst);
    }

    /// Mine a block (find valid nonce)
    ///
    /// Increments the nonce and recomputes the hash until the first
    /// `difficulty` hex digits are zero. On error the block is left at the
    /// last nonce tried.
    pub fn mine(&self, block: &mut Block, difficulty: u32) -> Result<MiningOutcome, MiningError> {
        self.mine_with_progress(block, difficulty, u64::MAX, |_| {})
    }

    /// Mine with progress callback
    pub fn mine_with_progress<F>(
        &self,
        block: &mut Block,
        difficulty: u32,
        progress_interval: u64,
        mut callback: F,
    ) -> Result<MiningOutcome, MiningError>
    where
        F: FnMut(u64), // attempts so far
    {
        if difficulty > MAX_DIFFICULTY {
            return Err(MiningError::DifficultyOutOfRange(difficulty));
        }

        let progress_interval = progress_interval.max(1);
        let mut attempts = 0u64;

        loop {
            if block.hash.meets_difficulty(difficulty) {
                return Ok(MiningOutcome { attempts });
            }

            if self.stop_signal.load(Ordering::SeqCst) {
                return Err(MiningError::Interrupted { attempts });
            }

            if self.max_iterations.is_some_and(|max| attempts >= max) {
                return Err(MiningError::Aborted { attempts });
            }

            block.nonce = block.nonce.checked_add(1).ok_or(MiningError::NonceExhausted)?;
            block.hash = block.compute_hash();
            attempts += 1;

            if attempts % progress_interval == 0 {
                callback(attempts);
            }
        }
    }
}
