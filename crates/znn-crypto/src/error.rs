//! Cryptographic errors

use thiserror::Error;

/// Cryptographic operation error
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Invalid signature
    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    /// Invalid public key
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    /// Invalid private key
    #[error("invalid private key")]
    InvalidPrivateKey,
}
