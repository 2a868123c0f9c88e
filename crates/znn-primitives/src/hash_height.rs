//! Hash/height pair identifying a momentum or account block

use crate::hash::{Hash, HASH_LENGTH};

/// A block hash together with its height.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HashHeight {
    /// Block hash
    pub hash: Hash,
    /// Block height
    pub height: u64,
}

impl HashHeight {
    /// Serialized length: hash followed by a big-endian u64
    pub const LEN: usize = HASH_LENGTH + 8;

    /// Empty hash at height zero
    pub const EMPTY: HashHeight = HashHeight {
        hash: Hash::EMPTY,
        height: 0,
    };

    /// Create a new pair
    pub fn new(hash: Hash, height: u64) -> Self {
        Self { hash, height }
    }

    /// `hash ‖ u64_be(height)`
    pub fn to_bytes(&self) -> [u8; Self::LEN] {
        let mut out = [0u8; Self::LEN];
        out[..HASH_LENGTH].copy_from_slice(self.hash.as_bytes());
        out[HASH_LENGTH..].copy_from_slice(&self.height.to_be_bytes());
        out
    }
}
