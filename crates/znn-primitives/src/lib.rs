//! # znn-primitives
//!
//! Primitive types for the Zenon Network of Momentum ledger.
//!
//! This crate provides the fundamental data types used throughout the SDK:
//! ledger hashes, bech32 addresses, token standards and hash/height pairs.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod address;
mod error;
mod hash;
mod hash_height;
mod token_standard;

pub use address::{Address, AddressError, ADDRESS_CORE_LENGTH, ADDRESS_PREFIX};
pub use error::PrimitiveError;
pub use hash::{Hash, HashError, HASH_LENGTH};
pub use hash_height::HashHeight;
pub use token_standard::{
    TokenStandard, TokenStandardError, TOKEN_STANDARD_CORE_LENGTH, TOKEN_STANDARD_PREFIX,
};

// Re-export primitive-types for U256
pub use primitive_types::U256;

/// Account-chain and momentum height type
pub type Height = u64;
