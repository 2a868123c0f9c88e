//! Ledger hash type

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Length of a ledger hash in bytes
pub const HASH_LENGTH: usize = 32;

/// Hash parsing error
#[derive(Debug, Error)]
pub enum HashError {
    /// Invalid hex string
    #[error("invalid hex string: {0}")]
    InvalidHex(String),
    /// Invalid length
    #[error("invalid hash length: expected {expected} bytes, got {got}")]
    InvalidLength { expected: usize, got: usize },
}

/// 256-bit ledger hash (32 bytes).
///
/// Rendered as 64 lowercase hex characters without a `0x` prefix,
/// which is the form used by the node's JSON-RPC interface.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Hash([u8; HASH_LENGTH]);

impl Hash {
    /// Size in bytes
    pub const LEN: usize = HASH_LENGTH;

    /// The all-zero hash, used as "no previous block" / "no source block"
    pub const EMPTY: Hash = Hash([0u8; HASH_LENGTH]);

    /// Create from bytes
    pub const fn from_bytes(bytes: [u8; HASH_LENGTH]) -> Self {
        Hash(bytes)
    }

    /// Create from slice
    pub fn from_slice(slice: &[u8]) -> Result<Self, HashError> {
        if slice.len() != HASH_LENGTH {
            return Err(HashError::InvalidLength {
                expected: HASH_LENGTH,
                got: slice.len(),
            });
        }
        let mut bytes = [0u8; HASH_LENGTH];
        bytes.copy_from_slice(slice);
        Ok(Hash(bytes))
    }

    /// Parse from 64 bare hex characters
    pub fn parse(s: &str) -> Result<Self, HashError> {
        let bytes = hex::decode(s).map_err(|e| HashError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes)
    }

    /// Get as bytes
    pub fn as_bytes(&self) -> &[u8; HASH_LENGTH] {
        &self.0
    }

    /// Copy out the raw bytes
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    /// Check if this is the empty hash
    pub fn is_empty(&self) -> bool {
        self.0 == [0u8; HASH_LENGTH]
    }

    /// Convert to bare hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", self.to_hex())
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Hash {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<[u8; HASH_LENGTH]> for Hash {
    fn from(bytes: [u8; HASH_LENGTH]) -> Self {
        Hash(bytes)
    }
}

impl AsRef<[u8]> for Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::*;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for Hash {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&self.to_hex())
        }
    }

    impl<'de> Deserialize<'de> for Hash {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let s = String::deserialize(deserializer)?;
            Hash::parse(&s).map_err(de::Error::custom)
        }
    }
}
