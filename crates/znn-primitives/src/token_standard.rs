//! Token standard type (10-byte core, hrp `zts`)

use crate::address::{decode_bech32, encode_bech32, AddressError};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Human-readable prefix of token standards
pub const TOKEN_STANDARD_PREFIX: &str = "zts";

/// Length of a token standard core in bytes
pub const TOKEN_STANDARD_CORE_LENGTH: usize = 10;

/// Token standard parsing error
#[derive(Debug, Error)]
pub enum TokenStandardError {
    /// Bech32 decoding failed
    #[error("{0}")]
    Bech32(#[from] AddressError),
    /// Invalid length
    #[error("invalid token standard length: expected 10 bytes, got {0}")]
    InvalidLength(usize),
}

/// Zenon token standard (ZTS) identifier
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct TokenStandard([u8; TOKEN_STANDARD_CORE_LENGTH]);

impl TokenStandard {
    /// Size of the core in bytes
    pub const LEN: usize = TOKEN_STANDARD_CORE_LENGTH;

    /// Empty token standard (`zts1qqqqqqqqqqqqqqqqtq587y`)
    pub const EMPTY: TokenStandard = TokenStandard([0u8; TOKEN_STANDARD_CORE_LENGTH]);

    /// ZNN (`zts1znnxxxxxxxxxxxxx9z4ulx`)
    pub const ZNN: TokenStandard =
        TokenStandard([0x14, 0xe6, 0x63, 0x18, 0xc6, 0x31, 0x8c, 0x63, 0x18, 0xc6]);

    /// QSR (`zts1qsrxxxxxxxxxxxxxmrhjll`)
    pub const QSR: TokenStandard =
        TokenStandard([0x04, 0x06, 0x63, 0x18, 0xc6, 0x31, 0x8c, 0x63, 0x18, 0xc6]);

    /// Create from core bytes
    pub const fn from_bytes(bytes: [u8; TOKEN_STANDARD_CORE_LENGTH]) -> Self {
        TokenStandard(bytes)
    }

    /// Create from slice
    pub fn from_slice(slice: &[u8]) -> Result<Self, TokenStandardError> {
        if slice.len() != TOKEN_STANDARD_CORE_LENGTH {
            return Err(TokenStandardError::InvalidLength(slice.len()));
        }
        let mut bytes = [0u8; TOKEN_STANDARD_CORE_LENGTH];
        bytes.copy_from_slice(slice);
        Ok(TokenStandard(bytes))
    }

    /// Parse a bech32 token standard string
    pub fn parse(s: &str) -> Result<Self, TokenStandardError> {
        let core = decode_bech32(s, TOKEN_STANDARD_PREFIX)?;
        Self::from_slice(&core)
    }

    /// Get the core bytes
    pub fn as_bytes(&self) -> &[u8; TOKEN_STANDARD_CORE_LENGTH] {
        &self.0
    }

    /// Check if this is the empty token standard
    pub fn is_empty(&self) -> bool {
        self.0 == [0u8; TOKEN_STANDARD_CORE_LENGTH]
    }

    /// Encode as a bech32 string
    pub fn to_bech32(&self) -> String {
        encode_bech32(TOKEN_STANDARD_PREFIX, &self.0)
    }
}

impl fmt::Debug for TokenStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenStandard({})", self.to_bech32())
    }
}

impl fmt::Display for TokenStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_bech32())
    }
}

impl FromStr for TokenStandard {
    type Err = TokenStandardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<[u8]> for TokenStandard {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::*;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for TokenStandard {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&self.to_bech32())
        }
    }

    impl<'de> Deserialize<'de> for TokenStandard {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let s = String::deserialize(deserializer)?;
            TokenStandard::parse(&s).map_err(de::Error::custom)
        }
    }
}
