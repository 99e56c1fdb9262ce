//! PowChain Core Library
//!
//! A single-node proof-of-work ledger simulator: a linear hash-linked chain,
//! nonce search mining, interval-based difficulty correction and a halving
//! block reward credited to miner accounts.

pub mod config;
pub mod consensus;
pub mod crypto;
pub mod mining;
pub mod node;
pub mod storage;

pub use config::{ChainConfig, ConfigError};
pub use consensus::Block;
pub use storage::{Account, Blockchain, ChainError, ChainStats, Ledger};

/// Defaults and fixed protocol values
pub mod constants {
    /// Leading zero hex digits required when no difficulty is configured
    pub const DEFAULT_DIFFICULTY: u32 = 1;

    /// Blocks between difficulty corrections
    pub const DEFAULT_DIFFICULTY_CORRECTION_INTERVAL: u64 = 10;

    /// Desired average mining time per block (milliseconds)
    pub const DEFAULT_TARGET_TIME_MS: u64 = 30_000;

    /// Reward paid for each block before the first halving
    pub const DEFAULT_INITIAL_REWARD: f64 = 100.0;

    /// Blocks between reward halvings
    pub const DEFAULT_HALVING_INTERVAL: u64 = 10;

    /// Previous-hash sentinel stored in the genesis block
    pub const GENESIS_PREVIOUS_HASH: &str = "0";

    /// Payload of the genesis block
    pub const GENESIS_DATA: &str = "Genesis Block";

    /// Upper bound on difficulty: a SHA-256 digest has 64 hex digits
    pub const MAX_DIFFICULTY: u32 = 64;

    /// Correction thresholds as fractions of the target time (numerator, denominator)
    pub const DIFFICULTY_UPPER_BOUND: (u32, u32) = (6, 5); // 1.2x
    pub const DIFFICULTY_LOWER_BOUND: (u32, u32) = (4, 5); // 0.8x
}
