//! Block structure for the PowChain ledger
//!
//! A block owns its content digest. The digest covers index, timestamp,
//! data, previous hash and nonce; the miner address is bookkeeping only.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use crate::crypto::Hash;

/// A single block in the chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Position in the chain (genesis = 0)
    pub index: u64,
    /// Creation time (milliseconds since Unix epoch)
    pub timestamp: u64,
    /// Opaque payload
    pub data: String,
    /// Hex digest of the previous block, or the genesis sentinel
    pub previous_hash: String,
    /// Account credited with the block reward (None for genesis)
    pub miner_address: Option<String>,
    /// Nonce used for PoW
    pub nonce: u64,
    /// Cached digest of the fields above
    pub hash: Hash,
}

impl Block {
    /// Create a new block with nonce 0 and its initial hash
    pub fn new(
        index: u64,
        timestamp: u64,
        data: impl Into<String>,
        previous_hash: impl Into<String>,
        miner_address: Option<String>,
    ) -> Self {
        Self::with_nonce(index, timestamp, data, previous_hash, miner_address, 0)
    }

    /// Create a block starting from an explicit nonce
    pub fn with_nonce(
        index: u64,
        timestamp: u64,
        data: impl Into<String>,
        previous_hash: impl Into<String>,
        miner_address: Option<String>,
        nonce: u64,
    ) -> Self {
        let mut block = Self {
            index,
            timestamp,
            data: data.into(),
            previous_hash: previous_hash.into(),
            miner_address,
            nonce,
            hash: Hash::zero(),
        };
        block.hash = block.compute_hash();
        block
    }

    /// Serialize the hashed fields into the digest preimage
    pub fn preimage(&self) -> Vec<u8> {
        format!(
            "{}{}{}{}{}",
            self.index, self.timestamp, self.data, self.previous_hash, self.nonce
        )
        .into_bytes()
    }

    /// Calculate the hash of this block's contents
    pub fn compute_hash(&self) -> Hash {
        crate::crypto::hash_bytes(&self.preimage())
    }

    /// True when the cached hash matches the block contents
    pub fn has_valid_hash(&self) -> bool {
        self.hash == self.compute_hash()
    }

    /// Check if this is the genesis block
    pub fn is_genesis(&self) -> bool {
        self.index == 0 && self.previous_hash == crate::constants::GENESIS_PREVIOUS_HASH
    }
}

/// Milliseconds since the Unix epoch
pub fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_block_hash_is_current() {
        let block = Block::new(1, 1234567890, "payload", "abc", Some("alice".into()));
        assert_eq!(block.nonce, 0);
        assert_eq!(block.hash, block.compute_hash());
        assert!(block.has_valid_hash());
    }

    #[test]
    fn test_hash_covers_every_hashed_field() {
        let base = Block::new(1, 1000, "data", "prev", None);

        let mut changed = base.clone();
        changed.index = 2;
        assert_ne!(base.hash, changed.compute_hash());

        let mut changed = base.clone();
        changed.timestamp = 1001;
        assert_ne!(base.hash, changed.compute_hash());

        let mut changed = base.clone();
        changed.data.push('!');
        assert_ne!(base.hash, changed.compute_hash());

        let mut changed = base.clone();
        changed.previous_hash = "other".into();
        assert_ne!(base.hash, changed.compute_hash());

        let mut changed = base.clone();
        changed.nonce = 1;
        assert_ne!(base.hash, changed.compute_hash());
    }

    #[test]
    fn test_miner_address_not_hashed() {
        let a = Block::new(3, 42, "data", "prev", Some("alice".into()));
        let b = Block::new(3, 42, "data", "prev", Some("bob".into()));
        assert_eq!(a.hash, b.hash);
    }

    #[test]
    fn test_tampering_invalidates_cached_hash() {
        let mut block = Block::new(1, 1000, "data", "prev", None);
        block.data = "forged".into();
        assert!(!block.has_valid_hash());
    }

    #[test]
    fn test_genesis_block_detection() {
        let genesis = Block::new(0, 0, "Genesis Block", "0", None);
        assert!(genesis.is_genesis());

        let block = Block::new(1, 0, "data", genesis.hash.to_hex(), None);
        assert!(!block.is_genesis());
    }
}
