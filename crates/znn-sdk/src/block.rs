//! Account block hashing and the send pipeline

use znn_crypto::{digest, digest_parts};
use znn_primitives::{Address, Hash, HashHeight};

use crate::api::{Ledger, Plasma, Signer};
use crate::model::{AccountBlockTemplate, GetRequiredPowParam};
use crate::SdkError;

/// Nonce length in bytes
pub const NONCE_LENGTH: usize = 8;

/// Nonce used when no proof-of-work is required
pub const ZERO_NONCE: &str = "0000000000000000";

/// Canonical content hash of a template
pub fn tx_hash(template: &AccountBlockTemplate) -> Result<Hash, SdkError> {
    let nonce = nonce_bytes(&template.nonce)?;

    let mut amount = [0u8; 32];
    template.amount.to_big_endian(&mut amount);

    let version = template.version.to_be_bytes();
    let chain_identifier = template.chain_identifier.to_be_bytes();
    let block_type = u64::from(u8::from(template.block_type)).to_be_bytes();
    let height = template.height.to_be_bytes();
    let momentum: [u8; HashHeight::LEN] = template.momentum_acknowledged.to_bytes();
    // no descendant blocks on client-built templates
    let descendant_blocks = digest(&[]);
    let data = digest(&template.data);
    let fused_plasma = template.fused_plasma.to_be_bytes();
    let difficulty = template.difficulty.to_be_bytes();

    Ok(digest_parts([
        &version[..],
        &chain_identifier,
        &block_type,
        template.previous_hash.as_bytes(),
        &height,
        &momentum,
        template.address.as_bytes(),
        template.to_address.as_bytes(),
        &amount,
        template.token_standard.as_bytes(),
        template.from_block_hash.as_bytes(),
        descendant_blocks.as_bytes(),
        data.as_bytes(),
        &fused_plasma,
        &difficulty,
        &nonce,
    ]))
}

/// Proof-of-work input for the template: `digest(address ‖ previousHash)`
pub fn pow_data_hash(template: &AccountBlockTemplate) -> Hash {
    digest_parts([
        &template.address.as_bytes()[..],
        template.previous_hash.as_bytes(),
    ])
}

/// Hex nonce, left-padded to eight bytes
fn nonce_bytes(nonce: &str) -> Result<[u8; NONCE_LENGTH], SdkError> {
    let decoded = hex::decode(nonce)
        .map_err(|e| SdkError::Validation(format!("Invalid nonce {:?}: {}", nonce, e)))?;
    if decoded.len() > NONCE_LENGTH {
        return Err(SdkError::Validation(format!(
            "Nonce must be at most {} bytes, got {}",
            NONCE_LENGTH,
            decoded.len()
        )));
    }
    let mut out = [0u8; NONCE_LENGTH];
    out[NONCE_LENGTH - decoded.len()..].copy_from_slice(&decoded);
    Ok(out)
}

/// Fill chain-derived fields of `template`, sign it with `signer` and
/// publish it through `ledger`.
///
/// Sends for one account must be serialized by the caller: two concurrent
/// calls read the same frontier and build on the same previous hash.
pub async fn send<L, P, S>(
    ledger: &L,
    plasma: &P,
    mut template: AccountBlockTemplate,
    signer: &S,
) -> Result<AccountBlockTemplate, SdkError>
where
    L: Ledger + ?Sized,
    P: Plasma + ?Sized,
    S: Signer + ?Sized,
{
    let receive = template.block_type.is_receive();
    if receive && template.from_block_hash.is_empty() {
        return Err(SdkError::Validation(
            "fromBlockHash cannot be empty for receive blocks".to_string(),
        ));
    }

    let address = signer.address().await?;

    if receive {
        check_receive(ledger, &template, &address).await?;
    }

    match ledger.get_frontier_account_block(&address).await? {
        Some(frontier) => {
            template.height = frontier.template.height + 1;
            template.previous_hash = frontier.template.hash;
        }
        None => {
            template.height = 1;
            template.previous_hash = Hash::EMPTY;
        }
    }
    let momentum = ledger.get_frontier_momentum().await?;
    template.momentum_acknowledged = momentum.hash_height();
    tracing::debug!(
        address = %address,
        height = template.height,
        momentum = momentum.height,
        "resolved chain state"
    );

    let param = GetRequiredPowParam::for_template(&template, address);
    let required = plasma.get_required_pow_for_account_block(&param).await?;
    template.difficulty = required.required_difficulty;
    if template.difficulty > 0 {
        if template.nonce.is_empty() {
            return Err(SdkError::Validation(
                "Nonce is required when difficulty is set".to_string(),
            ));
        }
        template.fused_plasma = required.available_plasma;
    } else {
        template.fused_plasma = required.base_plasma;
        if template.nonce.is_empty() {
            template.nonce = ZERO_NONCE.to_string();
        }
    }
    tracing::debug!(
        fused_plasma = template.fused_plasma,
        difficulty = template.difficulty,
        "resolved plasma"
    );

    template.address = address;
    template.public_key = signer.public_key().await?;
    template.hash = tx_hash(&template)?;
    template.signature = signer.sign(template.hash.as_bytes()).await?;

    if let Some(message) = ledger.publish_raw_transaction(&template).await? {
        tracing::warn!(hash = %template.hash, %message, "node rejected account block");
        return Err(SdkError::Network(format!(
            "Error publishing transaction: {}",
            message
        )));
    }
    tracing::info!(
        hash = %template.hash,
        address = %template.address,
        height = template.height,
        "published account block"
    );

    Ok(template)
}

async fn check_receive<L: Ledger + ?Sized>(
    ledger: &L,
    template: &AccountBlockTemplate,
    address: &Address,
) -> Result<(), SdkError> {
    let send_block = ledger
        .get_account_block_by_hash(&template.from_block_hash)
        .await?
        .ok_or_else(|| {
            SdkError::NotFound(format!("Send block not found: {}", template.from_block_hash))
        })?;

    if send_block.template.to_address != *address {
        return Err(SdkError::Mismatch(format!(
            "Send block toAddress ({}) does not match transaction address ({})",
            send_block.template.to_address, address
        )));
    }

    if !template.data.is_empty() {
        return Err(SdkError::Validation(
            "Receive blocks cannot have data".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use znn_primitives::{TokenStandard, U256};

    fn sample() -> AccountBlockTemplate {
        AccountBlockTemplate {
            address: Address::from_bytes([1; 20]),
            previous_hash: Hash::from_bytes([2; 32]),
            height: 3,
            momentum_acknowledged: HashHeight::new(Hash::from_bytes([4; 32]), 5),
            fused_plasma: 21000,
            nonce: ZERO_NONCE.to_string(),
            ..AccountBlockTemplate::send(
                Address::from_bytes([6; 20]),
                TokenStandard::ZNN,
                U256::from(7),
            )
        }
    }

    // ==================== Content Hash ====================

    #[test]
    fn test_tx_hash_deterministic() {
        assert_eq!(tx_hash(&sample()).unwrap(), tx_hash(&sample()).unwrap());
    }

    #[test]
    fn test_tx_hash_layout() {
        let template = sample();
        let mut amount = [0u8; 32];
        template.amount.to_big_endian(&mut amount);

        let mut expected = Vec::new();
        expected.extend_from_slice(&1u64.to_be_bytes());
        expected.extend_from_slice(&1u64.to_be_bytes());
        expected.extend_from_slice(&2u64.to_be_bytes());
        expected.extend_from_slice(&[2; 32]);
        expected.extend_from_slice(&3u64.to_be_bytes());
        expected.extend_from_slice(&[4; 32]);
        expected.extend_from_slice(&5u64.to_be_bytes());
        expected.extend_from_slice(&[1; 20]);
        expected.extend_from_slice(&[6; 20]);
        expected.extend_from_slice(&amount);
        expected.extend_from_slice(TokenStandard::ZNN.as_bytes());
        expected.extend_from_slice(&[0; 32]);
        expected.extend_from_slice(digest(&[]).as_bytes());
        expected.extend_from_slice(digest(&[]).as_bytes());
        expected.extend_from_slice(&21000u64.to_be_bytes());
        expected.extend_from_slice(&0u64.to_be_bytes());
        expected.extend_from_slice(&[0; 8]);

        assert_eq!(tx_hash(&template).unwrap(), digest(&expected));
    }

    #[test]
    fn test_tx_hash_sensitive_to_each_field() {
        let base = tx_hash(&sample()).unwrap();
        let variants: Vec<AccountBlockTemplate> = vec![
            AccountBlockTemplate { version: 2, ..sample() },
            AccountBlockTemplate { chain_identifier: 3, ..sample() },
            AccountBlockTemplate { height: 4, ..sample() },
            AccountBlockTemplate { amount: U256::from(8), ..sample() },
            AccountBlockTemplate { data: vec![0], ..sample() },
            AccountBlockTemplate { fused_plasma: 1, ..sample() },
            AccountBlockTemplate { difficulty: 1, ..sample() },
            AccountBlockTemplate { nonce: "01".to_string(), ..sample() },
            AccountBlockTemplate { token_standard: TokenStandard::QSR, ..sample() },
            AccountBlockTemplate { from_block_hash: Hash::from_bytes([9; 32]), ..sample() },
        ];
        for variant in variants {
            assert_ne!(tx_hash(&variant).unwrap(), base);
        }
    }

    #[test]
    fn test_tx_hash_ignores_signature_fields() {
        let signed = AccountBlockTemplate {
            hash: Hash::from_bytes([0xff; 32]),
            public_key: vec![1; 32],
            signature: vec![2; 64],
            ..sample()
        };
        assert_eq!(tx_hash(&signed).unwrap(), tx_hash(&sample()).unwrap());
    }

    // ==================== Nonce ====================

    #[test]
    fn test_short_nonce_left_padded() {
        let short = AccountBlockTemplate { nonce: "01".to_string(), ..sample() };
        let full = AccountBlockTemplate { nonce: "0000000000000001".to_string(), ..sample() };
        assert_eq!(tx_hash(&short).unwrap(), tx_hash(&full).unwrap());
    }

    #[test]
    fn test_invalid_nonce() {
        let bad = AccountBlockTemplate { nonce: "xyz".to_string(), ..sample() };
        assert!(matches!(tx_hash(&bad), Err(SdkError::Validation(_))));

        let long = AccountBlockTemplate { nonce: "00".repeat(9), ..sample() };
        assert!(matches!(tx_hash(&long), Err(SdkError::Validation(_))));
    }

    // ==================== Proof of Work ====================

    #[test]
    fn test_pow_data_hash() {
        let template = sample();
        let mut input = vec![1u8; 20];
        input.extend_from_slice(&[2; 32]);
        assert_eq!(pow_data_hash(&template), digest(&input));
    }
}
