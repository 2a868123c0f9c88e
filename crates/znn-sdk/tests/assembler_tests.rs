//! Send pipeline tests for znn-sdk
//!
//! Drives `block::send` against in-memory ledger, plasma and signer doubles.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use znn_sdk::block::{self, tx_hash};
use znn_sdk::model::{GetRequiredPowParam, GetRequiredPowResponse};
use znn_sdk::{
    AccountBlock, AccountBlockTemplate, Address, BlockType, Hash, HashHeight, KeyPair, Ledger,
    Momentum, Plasma, SdkError, TokenStandard, U256,
};

const SEED: &str = "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60";

fn key_pair() -> KeyPair {
    KeyPair::from_private_key_hex(SEED).unwrap()
}

fn chain_block(height: u64, hash: Hash, to_address: Address) -> AccountBlock {
    AccountBlock {
        template: AccountBlockTemplate {
            height,
            hash,
            to_address,
            ..AccountBlockTemplate::default()
        },
        descendant_blocks: vec![],
        base_plasma: 0,
        used_plasma: 0,
        changes_hash: Hash::EMPTY,
        confirmation_detail: None,
        paired_account_block: None,
    }
}

fn momentum(height: u64) -> Momentum {
    Momentum {
        version: 1,
        chain_identifier: 1,
        hash: Hash::from_bytes([0x10; 32]),
        previous_hash: Hash::EMPTY,
        height,
        timestamp: 0,
        data: String::new(),
        changes_hash: Hash::EMPTY,
        public_key: vec![],
        signature: vec![],
        producer: Address::EMPTY,
    }
}

struct MockLedger {
    frontier: Option<AccountBlock>,
    momentum: Momentum,
    send_block: Option<AccountBlock>,
    publish_reply: Option<String>,
    calls: AtomicUsize,
    published: Mutex<Option<AccountBlockTemplate>>,
}

impl MockLedger {
    fn new() -> Self {
        Self {
            frontier: None,
            momentum: momentum(1),
            send_block: None,
            publish_reply: None,
            calls: AtomicUsize::new(0),
            published: Mutex::new(None),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Ledger for MockLedger {
    async fn get_frontier_account_block(
        &self,
        _address: &Address,
    ) -> Result<Option<AccountBlock>, SdkError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.frontier.clone())
    }

    async fn get_frontier_momentum(&self) -> Result<Momentum, SdkError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.momentum.clone())
    }

    async fn get_account_block_by_hash(
        &self,
        _hash: &Hash,
    ) -> Result<Option<AccountBlock>, SdkError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.send_block.clone())
    }

    async fn publish_raw_transaction(
        &self,
        template: &AccountBlockTemplate,
    ) -> Result<Option<String>, SdkError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.published.lock().unwrap() = Some(template.clone());
        Ok(self.publish_reply.clone())
    }
}

struct MockPlasma {
    response: GetRequiredPowResponse,
    last_param: Mutex<Option<GetRequiredPowParam>>,
}

impl MockPlasma {
    fn with_difficulty(required_difficulty: u64) -> Self {
        Self {
            response: GetRequiredPowResponse {
                available_plasma: 5000,
                base_plasma: 21000,
                required_difficulty,
            },
            last_param: Mutex::new(None),
        }
    }
}

#[async_trait]
impl Plasma for MockPlasma {
    async fn get_required_pow_for_account_block(
        &self,
        param: &GetRequiredPowParam,
    ) -> Result<GetRequiredPowResponse, SdkError> {
        *self.last_param.lock().unwrap() = Some(param.clone());
        Ok(self.response)
    }
}

fn send_template() -> AccountBlockTemplate {
    AccountBlockTemplate::send(
        Address::from_bytes([0x22; 20]),
        TokenStandard::ZNN,
        U256::from(100_000_000u64),
    )
}

// ==================== Shape Validation ====================

#[tokio::test]
async fn test_receive_with_empty_from_hash_rejected_before_network() {
    let ledger = MockLedger::new();
    let plasma = MockPlasma::with_difficulty(0);
    let template = AccountBlockTemplate::receive(Hash::EMPTY);

    let err = block::send(&ledger, &plasma, template, &key_pair()).await.unwrap_err();
    assert!(matches!(err, SdkError::Validation(_)));
    assert_eq!(err.to_string(), "fromBlockHash cannot be empty for receive blocks");
    assert_eq!(ledger.calls(), 0);
}

// ==================== Receive Cross-Check ====================

#[tokio::test]
async fn test_receive_missing_send_block() {
    let ledger = MockLedger::new();
    let plasma = MockPlasma::with_difficulty(0);
    let from = Hash::from_bytes([0x33; 32]);

    let err = block::send(&ledger, &plasma, AccountBlockTemplate::receive(from), &key_pair())
        .await
        .unwrap_err();
    assert!(matches!(err, SdkError::NotFound(_)));
    assert!(err.to_string().starts_with("Send block not found"));
}

#[tokio::test]
async fn test_receive_for_other_account_rejected() {
    let mut ledger = MockLedger::new();
    let other = Address::from_bytes([0x44; 20]);
    ledger.send_block = Some(chain_block(1, Hash::from_bytes([0x33; 32]), other));
    let plasma = MockPlasma::with_difficulty(0);

    let err = block::send(
        &ledger,
        &plasma,
        AccountBlockTemplate::receive(Hash::from_bytes([0x33; 32])),
        &key_pair(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, SdkError::Mismatch(_)));
    assert!(err.to_string().contains("does not match transaction address"));
    assert!(ledger.published.lock().unwrap().is_none());
}

#[tokio::test]
async fn test_receive_with_data_rejected() {
    let keys = key_pair();
    let mut ledger = MockLedger::new();
    ledger.send_block = Some(chain_block(1, Hash::from_bytes([0x33; 32]), *keys.address()));
    let plasma = MockPlasma::with_difficulty(0);

    let template = AccountBlockTemplate {
        data: vec![1],
        ..AccountBlockTemplate::receive(Hash::from_bytes([0x33; 32]))
    };
    let err = block::send(&ledger, &plasma, template, &keys).await.unwrap_err();
    assert!(matches!(err, SdkError::Validation(_)));
    assert_eq!(err.to_string(), "Receive blocks cannot have data");
}

#[tokio::test]
async fn test_receive_succeeds_and_targets_self_for_plasma() {
    let keys = key_pair();
    let mut ledger = MockLedger::new();
    ledger.send_block = Some(chain_block(1, Hash::from_bytes([0x33; 32]), *keys.address()));
    let plasma = MockPlasma::with_difficulty(0);

    let result = block::send(
        &ledger,
        &plasma,
        AccountBlockTemplate::receive(Hash::from_bytes([0x33; 32])),
        &keys,
    )
    .await
    .unwrap();
    assert_eq!(result.block_type, BlockType::UserReceive);
    assert_eq!(result.height, 1);
    assert_eq!(result.previous_hash, Hash::EMPTY);

    let param = plasma.last_param.lock().unwrap().clone().unwrap();
    assert_eq!(param.to_address, *keys.address());
}

// ==================== Plasma ====================

#[tokio::test]
async fn test_difficulty_without_nonce_rejected() {
    let ledger = MockLedger::new();
    let plasma = MockPlasma::with_difficulty(1);

    let err = block::send(&ledger, &plasma, send_template(), &key_pair())
        .await
        .unwrap_err();
    assert!(matches!(err, SdkError::Validation(_)));
    assert_eq!(err.to_string(), "Nonce is required when difficulty is set");
    assert!(ledger.published.lock().unwrap().is_none());
}

#[tokio::test]
async fn test_difficulty_with_supplied_nonce() {
    let ledger = MockLedger::new();
    let plasma = MockPlasma::with_difficulty(1);

    let result = block::send(
        &ledger,
        &plasma,
        send_template().with_nonce("00000000000000ff"),
        &key_pair(),
    )
    .await
    .unwrap();
    assert_eq!(result.difficulty, 1);
    assert_eq!(result.nonce, "00000000000000ff");
    assert_eq!(result.fused_plasma, 5000);
}

#[tokio::test]
async fn test_zero_difficulty_fills_zero_nonce() {
    let ledger = MockLedger::new();
    let plasma = MockPlasma::with_difficulty(0);

    let result = block::send(&ledger, &plasma, send_template(), &key_pair())
        .await
        .unwrap();
    assert_eq!(result.difficulty, 0);
    assert_eq!(result.nonce, "0000000000000000");
}

// ==================== Success ====================

#[tokio::test]
async fn test_send_fills_chain_state_and_signs() {
    let keys = key_pair();
    let frontier_hash = Hash::from_bytes([0x55; 32]);
    let mut ledger = MockLedger::new();
    ledger.frontier = Some(chain_block(5, frontier_hash, Address::EMPTY));
    ledger.momentum = momentum(10);
    let plasma = MockPlasma::with_difficulty(0);

    let result = block::send(&ledger, &plasma, send_template(), &keys).await.unwrap();

    assert_eq!(result.height, 6);
    assert_eq!(result.previous_hash, frontier_hash);
    assert_eq!(result.momentum_acknowledged.height, 10);
    assert_eq!(
        result.momentum_acknowledged,
        HashHeight::new(Hash::from_bytes([0x10; 32]), 10)
    );
    assert_eq!(result.fused_plasma, 21000);
    assert_eq!(result.address, *keys.address());
    assert!(!result.public_key.is_empty());
    assert!(!result.signature.is_empty());
    assert_eq!(result.hash, tx_hash(&result).unwrap());

    let signature = znn_crypto::Signature::from_slice(&result.signature).unwrap();
    assert!(znn_crypto::verify(result.hash.as_bytes(), &signature, &keys.public_key()).unwrap());

    let published = ledger.published.lock().unwrap().clone().unwrap();
    assert_eq!(published, result);
}

#[tokio::test]
async fn test_first_block_of_account() {
    let ledger = MockLedger::new();
    let plasma = MockPlasma::with_difficulty(0);

    let result = block::send(&ledger, &plasma, send_template(), &key_pair())
        .await
        .unwrap();
    assert_eq!(result.height, 1);
    assert_eq!(result.previous_hash, Hash::EMPTY);
}

// ==================== Publication ====================

#[tokio::test]
async fn test_publish_error_string() {
    let mut ledger = MockLedger::new();
    ledger.publish_reply = Some("insufficient plasma".to_string());
    let plasma = MockPlasma::with_difficulty(0);

    let err = block::send(&ledger, &plasma, send_template(), &key_pair())
        .await
        .unwrap_err();
    assert!(matches!(err, SdkError::Network(_)));
    assert_eq!(
        err.to_string(),
        "Error publishing transaction: insufficient plasma"
    );
}
