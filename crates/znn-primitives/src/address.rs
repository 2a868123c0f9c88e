//! Bech32 account address type (20-byte core, hrp `z`)

use bech32::{FromBase32, ToBase32, Variant};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Human-readable prefix of account addresses
pub const ADDRESS_PREFIX: &str = "z";

/// Length of an address core in bytes
pub const ADDRESS_CORE_LENGTH: usize = 20;

const USER_BYTE: u8 = 0;
const CONTRACT_BYTE: u8 = 1;

/// Address parsing error
#[derive(Debug, Error)]
pub enum AddressError {
    /// Invalid bech32 string
    #[error("invalid bech32 string: {0}")]
    InvalidBech32(String),
    /// Wrong human-readable prefix
    #[error("invalid address prefix: expected {expected}, got {got}")]
    InvalidPrefix { expected: &'static str, got: String },
    /// Invalid length
    #[error("invalid address length: expected 20 bytes, got {0}")]
    InvalidLength(usize),
}

/// Zenon account address.
///
/// The core is 20 bytes: a type byte (`0` for user accounts, `1` for
/// embedded contracts) followed by 19 bytes of key digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Address([u8; ADDRESS_CORE_LENGTH]);

impl Address {
    /// Size of address core in bytes
    pub const LEN: usize = ADDRESS_CORE_LENGTH;

    /// Empty address (`z1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqsggv2f`)
    pub const EMPTY: Address = Address([0u8; ADDRESS_CORE_LENGTH]);

    /// Embedded plasma contract (`z1qxemdeddedxplasmaxxxxxxxxxxxxxxxxsctrp`)
    pub const PLASMA: Address = Address([
        0x01, 0xb3, 0xb6, 0xe5, 0xad, 0xcb, 0x4c, 0x1f, 0xf6, 0x1b, 0xe9, 0x8c, 0x63, 0x18, 0xc6,
        0x31, 0x8c, 0x63, 0x18, 0xc6,
    ]);

    /// Create address from core bytes
    pub const fn from_bytes(bytes: [u8; ADDRESS_CORE_LENGTH]) -> Self {
        Address(bytes)
    }

    /// Create address from slice
    pub fn from_slice(slice: &[u8]) -> Result<Self, AddressError> {
        if slice.len() != ADDRESS_CORE_LENGTH {
            return Err(AddressError::InvalidLength(slice.len()));
        }
        let mut bytes = [0u8; ADDRESS_CORE_LENGTH];
        bytes.copy_from_slice(slice);
        Ok(Address(bytes))
    }

    /// Parse a bech32 address string
    pub fn parse(s: &str) -> Result<Self, AddressError> {
        let core = decode_bech32(s, ADDRESS_PREFIX)?;
        Self::from_slice(&core)
    }

    /// Get the core bytes
    pub fn as_bytes(&self) -> &[u8; ADDRESS_CORE_LENGTH] {
        &self.0
    }

    /// Check if this is the empty address
    pub fn is_empty(&self) -> bool {
        self.0 == [0u8; ADDRESS_CORE_LENGTH]
    }

    /// True for user (key-derived) addresses
    pub fn is_user(&self) -> bool {
        self.0[0] == USER_BYTE
    }

    /// True for embedded contract addresses
    pub fn is_embedded(&self) -> bool {
        self.0[0] == CONTRACT_BYTE
    }

    /// Encode as a bech32 string
    pub fn to_bech32(&self) -> String {
        encode_bech32(ADDRESS_PREFIX, &self.0)
    }
}

/// Encode `data` as bech32 under `hrp`.
pub(crate) fn encode_bech32(hrp: &str, data: &[u8]) -> String {
    // only fails on an invalid hrp, and both prefixes are fixed lowercase ascii
    bech32::encode(hrp, data.to_base32(), Variant::Bech32).unwrap_or_default()
}

/// Decode a bech32 string, checking its hrp.
pub(crate) fn decode_bech32(s: &str, hrp: &'static str) -> Result<Vec<u8>, AddressError> {
    let (got, data, variant) =
        bech32::decode(s).map_err(|e| AddressError::InvalidBech32(e.to_string()))?;
    if variant != Variant::Bech32 {
        return Err(AddressError::InvalidBech32("unexpected bech32m variant".to_string()));
    }
    if got != hrp {
        return Err(AddressError::InvalidPrefix { expected: hrp, got });
    }
    Vec::<u8>::from_base32(&data).map_err(|e| AddressError::InvalidBech32(e.to_string()))
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_bech32())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_bech32())
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<[u8; ADDRESS_CORE_LENGTH]> for Address {
    fn from(bytes: [u8; ADDRESS_CORE_LENGTH]) -> Self {
        Address(bytes)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::*;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for Address {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&self.to_bech32())
        }
    }

    impl<'de> Deserialize<'de> for Address {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let s = String::deserialize(deserializer)?;
            Address::parse(&s).map_err(de::Error::custom)
        }
    }
}
