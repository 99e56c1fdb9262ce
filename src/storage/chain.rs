//! Chain state management
//!
//! Owns the block list, the account ledger, and the difficulty and reward
//! state. Blocks are appended only through [`Blockchain::add_block`], which
//! mines the candidate, pays the miner and runs the periodic corrections.

use std::fmt;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};
use crate::config::{ChainConfig, ConfigError};
use crate::consensus::{
    calculate_next_difficulty, current_timestamp, reward_at_height, should_adjust_difficulty,
    should_halve, validate_chain, Block, ChainValidationResult, ValidationError,
};
use crate::crypto::Hash;
use crate::mining::{Miner, MiningError};
use crate::node::create_genesis_block;
use super::{Account, Ledger};

/// Chain errors
#[derive(Debug, Error)]
pub enum ChainError {
    #[error("Chain has no genesis block")]
    InvalidChainState,
    #[error(transparent)]
    MiningAborted(#[from] MiningError),
    #[error("Invalid chain config: {0}")]
    Config(#[from] ConfigError),
}

/// Complete chain state
#[derive(Debug)]
pub struct Blockchain {
    /// Blocks from genesis to tip
    blocks: Vec<Block>,
    /// Mining durations since the last difficulty correction
    mining_times: Vec<Duration>,
    /// Leading zero hex digits required of the next block
    difficulty: u32,
    /// Reward paid for the next block
    current_reward: f64,
    /// Sum of all rewards paid by mining
    total_issued: f64,
    ledger: Ledger,
    miner: Miner,
    config: ChainConfig,
}

impl Blockchain {
    /// Create a new chain holding only the genesis block
    pub fn new(config: ChainConfig) -> Result<Self, ChainError> {
        config.validate()?;

        let ledger = Ledger::from_accounts(
            config
                .seed_accounts
                .iter()
                .map(|(address, balance)| Account::with_balance(address.clone(), *balance)),
        );

        let genesis = create_genesis_block();
        info!(hash = %genesis.hash, difficulty = config.difficulty, "Chain initialized");

        Ok(Self {
            blocks: vec![genesis],
            mining_times: Vec::new(),
            difficulty: config.difficulty,
            current_reward: config.initial_reward,
            total_issued: 0.0,
            ledger,
            miner: Miner::with_max_iterations(config.max_mining_iterations),
            config,
        })
    }

    /// Mine a new block on top of the tip and credit its miner
    ///
    /// If mining fails the chain, ledger, and correction state are untouched.
    pub fn add_block(
        &mut self,
        data: impl Into<String>,
        miner_address: &str,
    ) -> Result<&Block, ChainError> {
        let tip = self.latest_block()?;
        let new_index = tip.index + 1;

        let mut candidate = Block::new(
            new_index,
            current_timestamp(),
            data,
            tip.hash.to_hex(),
            Some(miner_address.to_string()),
        );

        let start = Instant::now();
        let outcome = match self.miner.mine(&mut candidate, self.difficulty) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(index = new_index, difficulty = self.difficulty, error = %e, "Mining failed");
                return Err(e.into());
            }
        };
        let elapsed = start.elapsed();

        info!(
            index = new_index,
            nonce = candidate.nonce,
            attempts = outcome.attempts,
            elapsed_ms = elapsed.as_secs_f64() * 1000.0,
            difficulty = self.difficulty,
            hash = %candidate.hash,
            "Block mined"
        );

        self.blocks.push(candidate);
        self.mining_times.push(elapsed);
        self.payout_reward(miner_address);

        if should_halve(new_index, self.config.halving_interval) {
            self.correct_reward(new_index);
        }
        if should_adjust_difficulty(new_index, self.config.difficulty_correction_interval) {
            self.correct_difficulty();
        }

        self.blocks.last().ok_or(ChainError::InvalidChainState)
    }

    fn payout_reward(&mut self, miner_address: &str) {
        let amount = self.current_reward;
        let balance = self.ledger.credit(miner_address, amount);
        self.total_issued += amount;
        debug!(miner = miner_address, amount, balance, "Reward paid");
    }

    fn correct_reward(&mut self, height: u64) {
        let before = self.current_reward;
        self.current_reward =
            reward_at_height(height, self.config.initial_reward, self.config.halving_interval);
        info!(height, before, after = self.current_reward, "Reward corrected");
    }

    fn correct_difficulty(&mut self) {
        let target = self.config.target_time();
        match calculate_next_difficulty(self.difficulty, &self.mining_times, target) {
            Some(correction) => {
                info!(
                    samples = self.mining_times.len(),
                    average_ms = correction.average.as_secs_f64() * 1000.0,
                    upper_ms = correction.upper_bound.as_secs_f64() * 1000.0,
                    lower_ms = correction.lower_bound.as_secs_f64() * 1000.0,
                    before = correction.previous,
                    after = correction.next,
                    "Difficulty corrected"
                );
                self.difficulty = correction.next;
            }
            None => debug!("No mining times recorded, difficulty unchanged"),
        }
        self.mining_times.clear();
    }

    /// Validate hashes and linkage of every block after genesis
    pub fn validate(&self) -> Result<ChainValidationResult, ValidationError> {
        validate_chain(&self.blocks)
    }

    /// Whether the whole chain passes validation
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Get the tip block
    pub fn latest_block(&self) -> Result<&Block, ChainError> {
        self.blocks.last().ok_or(ChainError::InvalidChainState)
    }

    /// Get a block by index
    pub fn block(&self, index: u64) -> Option<&Block> {
        usize::try_from(index).ok().and_then(|i| self.blocks.get(i))
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Balance of an address; zero if it was never credited
    pub fn account_balance(&self, address: &str) -> f64 {
        self.ledger.balance(address)
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Number of blocks including genesis
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn current_difficulty(&self) -> u32 {
        self.difficulty
    }

    pub fn current_reward(&self) -> f64 {
        self.current_reward
    }

    /// Sum of all rewards paid by mining (excludes seed balances)
    pub fn total_issued(&self) -> f64 {
        self.total_issued
    }

    /// Mining durations recorded since the last difficulty correction
    pub fn mining_times(&self) -> &[Duration] {
        &self.mining_times
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    /// Handle that makes an in-progress or future `add_block` fail with
    /// `MiningError::Interrupted` once set
    pub fn stop_signal(&self) -> Arc<AtomicBool> {
        self.miner.stop_signal()
    }

    /// Clear a previously raised stop signal
    pub fn resume_mining(&self) {
        self.miner.reset();
    }

    /// Get statistics about the chain state
    pub fn stats(&self) -> ChainStats {
        let nonce_sum: u64 = self.blocks.iter().map(|b| b.nonce).sum();
        let average_nonce = if self.blocks.is_empty() {
            0.0
        } else {
            nonce_sum as f64 / self.blocks.len() as f64
        };

        ChainStats {
            height: self.blocks.last().map_or(0, |b| b.index),
            tip_hash: self.blocks.last().map(|b| b.hash).unwrap_or_default(),
            difficulty: self.difficulty,
            current_reward: self.current_reward,
            total_issued: self.total_issued,
            account_count: self.ledger.len(),
            average_nonce,
        }
    }
}

impl fmt::Display for Blockchain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Blockchain:")?;
        writeln!(f, "\tlength: {} blocks", self.blocks.len())?;
        writeln!(f, "\tdifficulty: {}", self.difficulty)?;
        writeln!(
            f,
            "\tdifficulty correction interval: {}",
            self.config.difficulty_correction_interval
        )?;
        writeln!(f, "\ttarget time: {:?}", self.config.target_time())?;
        writeln!(f, "\tinitial reward: {}", self.config.initial_reward)?;
        writeln!(f, "\tcurrent reward: {}", self.current_reward)?;
        writeln!(f, "\thalving interval: {}", self.config.halving_interval)?;

        let mut accounts: Vec<_> = self.ledger.iter().collect();
        accounts.sort_by(|a, b| a.address().cmp(b.address()));
        write!(f, "\tminers:")?;
        for account in accounts {
            write!(f, " {}={}", account.address(), account.balance())?;
        }
        Ok(())
    }
}

/// Statistics about the chain state
#[derive(Debug, Clone, PartialEq)]
pub struct ChainStats {
    pub height: u64,
    pub tip_hash: Hash,
    pub difficulty: u32,
    pub current_reward: f64,
    pub total_issued: f64,
    pub account_count: usize,
    pub average_nonce: f64,
}
