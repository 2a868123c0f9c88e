//! Momentum as returned by the node

use serde::{Deserialize, Serialize};
use znn_primitives::{Address, Hash, HashHeight};

use crate::serde_util::base64_bytes;

/// Momentum header fields used by the SDK
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Momentum {
    /// Format version
    #[serde(default)]
    pub version: u64,
    /// Chain identifier
    #[serde(default)]
    pub chain_identifier: u64,
    /// Momentum hash
    pub hash: Hash,
    /// Previous momentum hash
    #[serde(default)]
    pub previous_hash: Hash,
    /// Momentum height
    pub height: u64,
    /// Unix timestamp in seconds
    #[serde(default)]
    pub timestamp: u64,
    /// Extra data, hex
    #[serde(default)]
    pub data: String,
    /// Hash of state changes
    #[serde(default)]
    pub changes_hash: Hash,
    /// Producer public key
    #[serde(default, with = "base64_bytes")]
    pub public_key: Vec<u8>,
    /// Producer signature
    #[serde(default, with = "base64_bytes")]
    pub signature: Vec<u8>,
    /// Producing address
    #[serde(default)]
    pub producer: Address,
}

impl Momentum {
    /// Hash and height, as acknowledged by account blocks
    pub fn hash_height(&self) -> HashHeight {
        HashHeight::new(self.hash, self.height)
    }
}
