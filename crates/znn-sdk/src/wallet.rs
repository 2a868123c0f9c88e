//! Key pair signer

use async_trait::async_trait;
use ed25519_dalek::SigningKey;
use rand::rngs::OsRng;
use znn_crypto::{public_key_to_address, sign, PrivateKey, PublicKey, Signature};
use znn_primitives::Address;
use zeroize::Zeroize;

use crate::api::Signer;
use crate::SdkError;

/// Ed25519 key pair
///
/// Clone is not implemented so key material is not duplicated by accident;
/// use `from_private_key` to build a second instance from the same seed.
pub struct KeyPair {
    private_key: PrivateKey,
    address: Address,
}

impl KeyPair {
    /// Generate a random key pair
    pub fn new_random() -> Self {
        Self::from_signing_key(SigningKey::generate(&mut OsRng))
    }

    /// Create from a 32-byte seed
    pub fn from_private_key(key: &[u8; 32]) -> Self {
        Self::from_signing_key(SigningKey::from_bytes(key))
    }

    /// Create from a hex-encoded 32-byte seed
    pub fn from_private_key_hex(hex: &str) -> Result<Self, SdkError> {
        let mut bytes = hex::decode(hex)?;
        if bytes.len() != 32 {
            let len = bytes.len();
            bytes.zeroize();
            return Err(SdkError::Key(format!("Expected 32 bytes, got {}", len)));
        }

        let mut key = [0u8; 32];
        key.copy_from_slice(&bytes);
        bytes.zeroize();

        let pair = Self::from_private_key(&key);
        key.zeroize();
        Ok(pair)
    }

    fn from_signing_key(private_key: SigningKey) -> Self {
        let address = public_key_to_address(&private_key.verifying_key());
        Self {
            private_key,
            address,
        }
    }

    /// Address derived from the public key
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Public key
    pub fn public_key(&self) -> PublicKey {
        self.private_key.verifying_key()
    }

    /// Sign raw bytes
    pub fn sign(&self, message: &[u8]) -> Signature {
        sign(message, &self.private_key)
    }
}

#[async_trait]
impl Signer for KeyPair {
    async fn sign(&self, message: &[u8]) -> Result<Vec<u8>, SdkError> {
        Ok(KeyPair::sign(self, message).to_vec())
    }

    async fn address(&self) -> Result<Address, SdkError> {
        Ok(self.address)
    }

    async fn public_key(&self) -> Result<Vec<u8>, SdkError> {
        Ok(self.public_key().to_bytes().to_vec())
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}
