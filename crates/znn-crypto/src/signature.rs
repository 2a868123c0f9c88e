//! Ed25519 signature operations

use ed25519_dalek::{Signer, Verifier, SigningKey, VerifyingKey};
use znn_primitives::{Address, ADDRESS_CORE_LENGTH};
use crate::{digest, CryptoError};

/// Length of a public key in bytes
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Length of a signature in bytes
pub const SIGNATURE_LENGTH: usize = 64;

/// Type byte prefixed to user addresses
const USER_ADDRESS_BYTE: u8 = 0x00;

/// Ed25519 signature (64 bytes)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature([u8; SIGNATURE_LENGTH]);

/// Public key (32 bytes)
pub type PublicKey = VerifyingKey;

/// Private key (32-byte seed)
pub type PrivateKey = SigningKey;

impl Signature {
    /// Wrap raw signature bytes
    pub fn from_bytes(bytes: [u8; SIGNATURE_LENGTH]) -> Self {
        Signature(bytes)
    }

    /// Parse from a slice, which must be exactly 64 bytes
    pub fn from_slice(slice: &[u8]) -> Result<Self, CryptoError> {
        let bytes: [u8; SIGNATURE_LENGTH] = slice.try_into().map_err(|_| {
            CryptoError::InvalidSignature(format!("expected 64 bytes, got {}", slice.len()))
        })?;
        Ok(Signature(bytes))
    }

    /// Raw 64-byte representation
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        self.0
    }

    /// Raw bytes as a vector
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }
}

/// Load a private key from its 32-byte seed
pub fn private_key_from_bytes(bytes: &[u8]) -> Result<PrivateKey, CryptoError> {
    let seed: [u8; 32] = bytes.try_into().map_err(|_| CryptoError::InvalidPrivateKey)?;
    Ok(SigningKey::from_bytes(&seed))
}

/// Load a public key from its 32-byte encoding
pub fn public_key_from_bytes(bytes: &[u8]) -> Result<PublicKey, CryptoError> {
    let raw: [u8; PUBLIC_KEY_LENGTH] = bytes.try_into().map_err(|_| {
        CryptoError::InvalidPublicKey(format!("expected 32 bytes, got {}", bytes.len()))
    })?;
    VerifyingKey::from_bytes(&raw).map_err(|e| CryptoError::InvalidPublicKey(e.to_string()))
}

/// Sign a message with a private key
pub fn sign(message: &[u8], private_key: &PrivateKey) -> Signature {
    Signature(private_key.sign(message).to_bytes())
}

/// Verify a signature against a message and public key
pub fn verify(
    message: &[u8],
    signature: &Signature,
    public_key: &PublicKey,
) -> Result<bool, CryptoError> {
    let sig = ed25519_dalek::Signature::from_bytes(&signature.0);
    Ok(public_key.verify(message, &sig).is_ok())
}

/// Derive a user address from a public key: `0x00 ‖ sha3_256(pubkey)[..19]`
pub fn public_key_to_address(public_key: &PublicKey) -> Address {
    let hash = digest(public_key.as_bytes());

    let mut addr_bytes = [0u8; ADDRESS_CORE_LENGTH];
    addr_bytes[0] = USER_ADDRESS_BYTE;
    addr_bytes[1..].copy_from_slice(&hash.as_bytes()[..ADDRESS_CORE_LENGTH - 1]);
    Address::from_bytes(addr_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;

    // RFC 8032 test 1
    const SECRET: &str = "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60";
    const PUBLIC: &str = "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a";
    const SIG_EMPTY: &str = "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e065224901555fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b";

    fn rfc_key() -> PrivateKey {
        private_key_from_bytes(&hex::decode(SECRET).unwrap()).unwrap()
    }

    #[test]
    fn test_rfc8032_public_key() {
        let key = rfc_key();
        assert_eq!(hex::encode(key.verifying_key().as_bytes()), PUBLIC);
    }

    #[test]
    fn test_rfc8032_signature() {
        let key = rfc_key();
        let signature = sign(b"", &key);
        assert_eq!(hex::encode(signature.to_bytes()), SIG_EMPTY);
    }

    #[test]
    fn test_sign_and_verify() {
        let private_key = SigningKey::generate(&mut OsRng);
        let public_key = private_key.verifying_key();

        let message = digest(b"test message");
        let signature = sign(message.as_bytes(), &private_key);

        assert!(verify(message.as_bytes(), &signature, &public_key).unwrap());
    }

    #[test]
    fn test_verify_rejects_other_message() {
        let private_key = SigningKey::generate(&mut OsRng);
        let public_key = private_key.verifying_key();

        let signature = sign(b"one", &private_key);
        assert!(!verify(b"two", &signature, &public_key).unwrap());
    }

    #[test]
    fn test_verify_rejects_other_key() {
        let signer = SigningKey::generate(&mut OsRng);
        let other = SigningKey::generate(&mut OsRng);

        let signature = sign(b"payload", &signer);
        assert!(!verify(b"payload", &signature, &other.verifying_key()).unwrap());
    }

    #[test]
    fn test_address_derivation() {
        let key = rfc_key();
        let address = public_key_to_address(&key.verifying_key());
        assert_eq!(
            hex::encode(address.as_bytes()),
            "00054f341a2fa584bb0c540fbf5232fcef6f76c5"
        );
        assert_eq!(
            address.to_string(),
            "z1qqz57dq697jcfwcv2s8m753jlnhk7ak9whaqdf"
        );
        assert!(address.is_user());
    }

    #[test]
    fn test_key_length_errors() {
        assert!(matches!(
            private_key_from_bytes(&[0u8; 31]),
            Err(CryptoError::InvalidPrivateKey)
        ));
        assert!(matches!(
            public_key_from_bytes(&[0u8; 33]),
            Err(CryptoError::InvalidPublicKey(_))
        ));
        assert!(matches!(
            Signature::from_slice(&[0u8; 63]),
            Err(CryptoError::InvalidSignature(_))
        ));
    }

    #[test]
    fn test_public_key_round_trip() {
        let key = rfc_key();
        let bytes = key.verifying_key().to_bytes();
        let parsed = public_key_from_bytes(&bytes).unwrap();
        assert_eq!(parsed, key.verifying_key());
    }
}
