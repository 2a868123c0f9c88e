//! # znn-crypto
//!
//! Cryptographic primitives for the Zenon SDK.
//!
//! - SHA3-256 hashing
//! - Ed25519 signing/verification
//! - Address derivation

#![warn(missing_docs)]
#![warn(clippy::all)]

mod hash;
mod signature;
mod error;

pub use hash::{digest, digest_parts};
pub use signature::{
    sign, verify, public_key_to_address, private_key_from_bytes, public_key_from_bytes,
    Signature, PublicKey, PrivateKey, PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH,
};
pub use error::CryptoError;
