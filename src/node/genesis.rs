//! Genesis block generation
//!
//! The genesis block anchors the chain: index 0, the fixed previous-hash
//! sentinel, no miner and no proof of work.

use crate::consensus::{current_timestamp, Block};
use crate::constants::{GENESIS_DATA, GENESIS_PREVIOUS_HASH};

/// Create the genesis block stamped with the current time
pub fn create_genesis_block() -> Block {
    create_genesis_block_at(current_timestamp())
}

/// Create the genesis block with an explicit timestamp
pub fn create_genesis_block_at(timestamp: u64) -> Block {
    Block::new(0, timestamp, GENESIS_DATA, GENESIS_PREVIOUS_HASH, None)
}
