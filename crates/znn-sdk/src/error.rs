//! SDK error types

use thiserror::Error;

use crate::abi::AbiError;

/// SDK error type
#[derive(Debug, Error)]
pub enum SdkError {
    /// Transport/network error
    #[error("Transport error: {0}")]
    Transport(String),

    /// RPC error from node
    #[error("RPC error: {code} - {message}")]
    Rpc {
        /// Error code
        code: i64,
        /// Error message
        message: String,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid hex string
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    /// Invalid address, hash or token standard
    #[error("Invalid primitive: {0}")]
    Primitive(String),

    /// Invalid private or public key
    #[error("Invalid key: {0}")]
    Key(String),

    /// Signing failed
    #[error("Signing failed: {0}")]
    Signing(String),

    /// ABI codec error
    #[error("ABI error: {0}")]
    Abi(#[from] AbiError),

    /// Malformed account block template
    #[error("{0}")]
    Validation(String),

    /// Referenced ledger entry is absent
    #[error("{0}")]
    NotFound(String),

    /// Ledger entry does not belong to the signer
    #[error("{0}")]
    Mismatch(String),

    /// Node rejected a published transaction
    #[error("{0}")]
    Network(String),

    /// Invalid configuration
    #[error("Config error: {0}")]
    Config(String),
}

impl From<hex::FromHexError> for SdkError {
    fn from(e: hex::FromHexError) -> Self {
        SdkError::InvalidHex(e.to_string())
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(e: serde_json::Error) -> Self {
        SdkError::Serialization(e.to_string())
    }
}

impl From<znn_crypto::CryptoError> for SdkError {
    fn from(e: znn_crypto::CryptoError) -> Self {
        match e {
            znn_crypto::CryptoError::InvalidSignature(_) => SdkError::Signing(e.to_string()),
            _ => SdkError::Key(e.to_string()),
        }
    }
}

impl From<znn_primitives::PrimitiveError> for SdkError {
    fn from(e: znn_primitives::PrimitiveError) -> Self {
        SdkError::Primitive(e.to_string())
    }
}

impl From<znn_primitives::AddressError> for SdkError {
    fn from(e: znn_primitives::AddressError) -> Self {
        SdkError::Primitive(e.to_string())
    }
}

impl From<znn_primitives::HashError> for SdkError {
    fn from(e: znn_primitives::HashError) -> Self {
        SdkError::Primitive(e.to_string())
    }
}
