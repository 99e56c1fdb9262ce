//! Chain configuration
//!
//! Construction parameters for a [`Blockchain`](crate::Blockchain), loadable
//! from JSON. Missing fields fall back to the defaults in [`crate::constants`].

use std::collections::BTreeMap;
use std::time::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::constants::{
    DEFAULT_DIFFICULTY, DEFAULT_DIFFICULTY_CORRECTION_INTERVAL, DEFAULT_HALVING_INTERVAL,
    DEFAULT_INITIAL_REWARD, DEFAULT_TARGET_TIME_MS, MAX_DIFFICULTY,
};

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Difficulty {0} exceeds the 64 hex digits of a digest")]
    DifficultyTooHigh(u32),
    #[error("Difficulty correction interval must be positive")]
    ZeroCorrectionInterval,
    #[error("Halving interval must be positive")]
    ZeroHalvingInterval,
    #[error("Target time must be positive")]
    ZeroTargetTime,
    #[error("Initial reward must be a finite non-negative number, got {0}")]
    InvalidReward(f64),
    #[error("Seed balance for {address} must be a finite non-negative number, got {balance}")]
    InvalidSeedBalance { address: String, balance: f64 },
    #[error("Malformed config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Chain construction parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Leading zero hex digits required of new blocks
    pub difficulty: u32,
    /// Blocks between difficulty corrections
    pub difficulty_correction_interval: u64,
    /// Desired average mining time per block (milliseconds)
    pub target_time_ms: u64,
    /// Reward paid per block before the first halving
    pub initial_reward: f64,
    /// Blocks between reward halvings
    pub halving_interval: u64,
    /// Cap on nonce increments per block; None searches until success
    pub max_mining_iterations: Option<u64>,
    /// Accounts present before the first block, with starting balances
    pub seed_accounts: BTreeMap<String, f64>,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            difficulty: DEFAULT_DIFFICULTY,
            difficulty_correction_interval: DEFAULT_DIFFICULTY_CORRECTION_INTERVAL,
            target_time_ms: DEFAULT_TARGET_TIME_MS,
            initial_reward: DEFAULT_INITIAL_REWARD,
            halving_interval: DEFAULT_HALVING_INTERVAL,
            max_mining_iterations: None,
            seed_accounts: BTreeMap::new(),
        }
    }
}

impl ChainConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn target_time(&self) -> Duration {
        Duration::from_millis(self.target_time_ms)
    }

    /// Add a starting account
    pub fn with_seed_account(mut self, address: impl Into<String>, balance: f64) -> Self {
        self.seed_accounts.insert(address.into(), balance);
        self
    }

    /// Check all parameters are in range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.difficulty > MAX_DIFFICULTY {
            return Err(ConfigError::DifficultyTooHigh(self.difficulty));
        }
        if self.difficulty_correction_interval == 0 {
            return Err(ConfigError::ZeroCorrectionInterval);
        }
        if self.halving_interval == 0 {
            return Err(ConfigError::ZeroHalvingInterval);
        }
        if self.target_time_ms == 0 {
            return Err(ConfigError::ZeroTargetTime);
        }
        if !self.initial_reward.is_finite() || self.initial_reward < 0.0 {
            return Err(ConfigError::InvalidReward(self.initial_reward));
        }
        for (address, &balance) in &self.seed_accounts {
            if !balance.is_finite() || balance < 0.0 {
                return Err(ConfigError::InvalidSeedBalance {
                    address: address.clone(),
                    balance,
                });
            }
        }
        Ok(())
    }
}
