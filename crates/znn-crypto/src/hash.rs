//! SHA3-256 hashing

use sha3::{Digest, Sha3_256};
use znn_primitives::Hash;

/// Compute the SHA3-256 hash of the input data
pub fn digest(data: &[u8]) -> Hash {
    let mut hasher = Sha3_256::new();
    hasher.update(data);
    Hash::from_bytes(hasher.finalize().into())
}

/// Compute the SHA3-256 hash of several byte slices fed in order
pub fn digest_parts<'a>(parts: impl IntoIterator<Item = &'a [u8]>) -> Hash {
    let mut hasher = Sha3_256::new();
    for part in parts {
        hasher.update(part);
    }
    Hash::from_bytes(hasher.finalize().into())
}
