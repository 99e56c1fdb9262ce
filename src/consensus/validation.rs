//! Block and chain validation
//!
//! Pure functions for checking digest integrity and hash linkage.

use crate::consensus::Block;
use crate::crypto::Hash;
use thiserror::Error;

/// Validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Chain has no genesis block")]
    EmptyChain,
    #[error("First block is not a genesis block")]
    InvalidGenesis,
    #[error("Block {index}: stored hash does not match contents")]
    InvalidHash { index: u64 },
    #[error("Block {index}: previous hash does not match parent")]
    InvalidPrevHash { index: u64 },
}

/// Validate a block against its parent
pub fn validate_block_link(parent: &Block, block: &Block) -> Result<(), ValidationError> {
    if !block.has_valid_hash() {
        return Err(ValidationError::InvalidHash { index: block.index });
    }

    match Hash::from_hex(&block.previous_hash) {
        Ok(previous) if previous == parent.hash => {}
        _ => return Err(ValidationError::InvalidPrevHash { index: block.index }),
    }

    Ok(())
}

/// Chain validation result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainValidationResult {
    /// Index of the tip block
    pub height: u64,
    /// Tip hash
    pub tip_hash: Hash,
}

/// Validate a chain of blocks
///
/// The genesis block's own digest is trusted, but it must sit at index 0
/// with the sentinel previous hash. Every later block must carry a correct
/// digest and point at its parent's digest.
pub fn validate_chain(blocks: &[Block]) -> Result<ChainValidationResult, ValidationError> {
    let genesis = blocks.first().ok_or(ValidationError::EmptyChain)?;
    if !genesis.is_genesis() {
        return Err(ValidationError::InvalidGenesis);
    }
    let tip = blocks.last().ok_or(ValidationError::EmptyChain)?;

    for pair in blocks.windows(2) {
        validate_block_link(&pair[0], &pair[1])?;
    }

    Ok(ChainValidationResult {
        height: tip.index,
        tip_hash: tip.hash,
    })
}
