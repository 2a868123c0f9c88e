//! Account block templates and chain-recorded account blocks

use serde::{Deserialize, Serialize};
use znn_primitives::{Address, Hash, HashHeight, TokenStandard, U256};

use crate::serde_util::{base64_bytes, decimal_u256};

/// Chain identifier used when none is configured
pub const DEFAULT_CHAIN_IDENTIFIER: u64 = 1;

/// Account block format version
pub const BLOCK_VERSION: u64 = 1;

/// Kind of account block; serialized as its numeric code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum BlockType {
    /// Unset
    #[default]
    Unknown = 0,
    /// Genesis allocation
    GenesisReceive = 1,
    /// Send from a user account
    UserSend = 2,
    /// Receive into a user account
    UserReceive = 3,
    /// Send emitted by a contract
    ContractSend = 4,
    /// Receive into a contract
    ContractReceive = 5,
}

impl BlockType {
    /// UserSend or ContractSend
    pub fn is_send(&self) -> bool {
        matches!(self, BlockType::UserSend | BlockType::ContractSend)
    }

    /// Any of the receive kinds
    pub fn is_receive(&self) -> bool {
        matches!(
            self,
            BlockType::GenesisReceive | BlockType::UserReceive | BlockType::ContractReceive
        )
    }
}

impl TryFrom<u8> for BlockType {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(BlockType::Unknown),
            1 => Ok(BlockType::GenesisReceive),
            2 => Ok(BlockType::UserSend),
            3 => Ok(BlockType::UserReceive),
            4 => Ok(BlockType::ContractSend),
            5 => Ok(BlockType::ContractReceive),
            other => Err(format!("unknown block type: {}", other)),
        }
    }
}

impl From<BlockType> for u8 {
    fn from(block_type: BlockType) -> Self {
        block_type as u8
    }
}

/// Unsigned account block, filled in by the assembler before publication
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccountBlockTemplate {
    /// Format version
    pub version: u64,
    /// Chain the block is valid on
    pub chain_identifier: u64,
    /// Block kind
    pub block_type: BlockType,
    /// Content hash
    pub hash: Hash,
    /// Hash of the account's previous block
    pub previous_hash: Hash,
    /// Height in the account chain
    pub height: u64,
    /// Momentum the block builds on
    pub momentum_acknowledged: HashHeight,
    /// Sending or receiving account
    pub address: Address,
    /// Destination account
    pub to_address: Address,
    /// Transferred amount
    #[serde(with = "decimal_u256")]
    pub amount: U256,
    /// Transferred token
    pub token_standard: TokenStandard,
    /// Send block being received
    pub from_block_hash: Hash,
    /// Call payload
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
    /// Plasma paid from fusions
    pub fused_plasma: u64,
    /// Proof-of-work difficulty
    pub difficulty: u64,
    /// Proof-of-work nonce, hex
    pub nonce: String,
    /// Signer public key
    #[serde(with = "base64_bytes")]
    pub public_key: Vec<u8>,
    /// Signature over the content hash
    #[serde(with = "base64_bytes")]
    pub signature: Vec<u8>,
}

impl Default for AccountBlockTemplate {
    fn default() -> Self {
        Self {
            version: BLOCK_VERSION,
            chain_identifier: DEFAULT_CHAIN_IDENTIFIER,
            block_type: BlockType::Unknown,
            hash: Hash::EMPTY,
            previous_hash: Hash::EMPTY,
            height: 0,
            momentum_acknowledged: HashHeight::EMPTY,
            address: Address::EMPTY,
            to_address: Address::EMPTY,
            amount: U256::zero(),
            token_standard: TokenStandard::EMPTY,
            from_block_hash: Hash::EMPTY,
            data: Vec::new(),
            fused_plasma: 0,
            difficulty: 0,
            nonce: String::new(),
            public_key: Vec::new(),
            signature: Vec::new(),
        }
    }
}

impl AccountBlockTemplate {
    /// Receive the send block `from_block_hash`
    pub fn receive(from_block_hash: Hash) -> Self {
        Self {
            block_type: BlockType::UserReceive,
            from_block_hash,
            ..Default::default()
        }
    }

    /// Transfer `amount` of `token_standard` to `to_address`
    pub fn send(to_address: Address, token_standard: TokenStandard, amount: U256) -> Self {
        Self {
            block_type: BlockType::UserSend,
            to_address,
            token_standard,
            amount,
            ..Default::default()
        }
    }

    /// Send carrying an encoded contract call
    pub fn call_contract(
        to_address: Address,
        token_standard: TokenStandard,
        amount: U256,
        data: Vec<u8>,
    ) -> Self {
        Self {
            data,
            ..Self::send(to_address, token_standard, amount)
        }
    }

    /// Override the chain identifier
    pub fn with_chain_identifier(mut self, chain_identifier: u64) -> Self {
        self.chain_identifier = chain_identifier;
        self
    }

    /// Set the proof-of-work nonce
    pub fn with_nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = nonce.into();
        self
    }
}

/// Momentum confirmation of an account block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationDetail {
    /// Momentums built on top of the confirming one
    pub num_confirmations: u64,
    /// Confirming momentum height
    pub momentum_height: u64,
    /// Confirming momentum hash
    pub momentum_hash: Hash,
    /// Confirming momentum timestamp
    pub momentum_timestamp: u64,
}

/// Account block as recorded on chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountBlock {
    /// Template fields
    #[serde(flatten)]
    pub template: AccountBlockTemplate,
    /// Blocks emitted by a contract while processing this one
    #[serde(default)]
    pub descendant_blocks: Vec<AccountBlock>,
    /// Plasma required without proof-of-work
    #[serde(default)]
    pub base_plasma: u64,
    /// Plasma consumed
    #[serde(default)]
    pub used_plasma: u64,
    /// Hash of state changes
    #[serde(default)]
    pub changes_hash: Hash,
    /// Present once confirmed by a momentum
    #[serde(default)]
    pub confirmation_detail: Option<ConfirmationDetail>,
    /// Matching send or receive block
    #[serde(default)]
    pub paired_account_block: Option<Box<AccountBlock>>,
}

impl AccountBlock {
    /// True once a momentum has confirmed the block
    pub fn is_completed(&self) -> bool {
        self.confirmation_detail.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Factories ====================

    #[test]
    fn test_template_defaults() {
        let template = AccountBlockTemplate::default();
        assert_eq!(template.version, 1);
        assert_eq!(template.chain_identifier, 1);
        assert_eq!(template.hash, Hash::EMPTY);
        assert_eq!(template.previous_hash, Hash::EMPTY);
        assert_eq!(template.from_block_hash, Hash::EMPTY);
        assert_eq!(template.momentum_acknowledged, HashHeight::EMPTY);
        assert!(template.nonce.is_empty());
    }

    #[test]
    fn test_receive_factory() {
        let from = Hash::from_bytes([7; 32]);
        let template = AccountBlockTemplate::receive(from);
        assert_eq!(template.block_type, BlockType::UserReceive);
        assert_eq!(template.from_block_hash, from);
        assert!(template.data.is_empty());
    }

    #[test]
    fn test_send_and_call_factories() {
        let to = Address::from_bytes([1; 20]);
        let send = AccountBlockTemplate::send(to, TokenStandard::ZNN, U256::from(5));
        assert_eq!(send.block_type, BlockType::UserSend);
        assert_eq!(send.to_address, to);
        assert!(send.data.is_empty());

        let call =
            AccountBlockTemplate::call_contract(to, TokenStandard::QSR, U256::zero(), vec![1, 2])
                .with_chain_identifier(3);
        assert_eq!(call.block_type, BlockType::UserSend);
        assert_eq!(call.data, vec![1, 2]);
        assert_eq!(call.chain_identifier, 3);
    }

    // ==================== Block Type ====================

    #[test]
    fn test_block_type_classes() {
        assert!(BlockType::UserSend.is_send());
        assert!(BlockType::ContractSend.is_send());
        assert!(BlockType::GenesisReceive.is_receive());
        assert!(BlockType::UserReceive.is_receive());
        assert!(BlockType::ContractReceive.is_receive());
        assert!(!BlockType::Unknown.is_send() && !BlockType::Unknown.is_receive());
        assert!(BlockType::try_from(6).is_err());
    }

    // ==================== Wire Format ====================

    #[test]
    fn test_template_json_shape() {
        let template = AccountBlockTemplate {
            amount: U256::from(10).pow(U256::from(20)),
            data: vec![0xde, 0xad],
            ..AccountBlockTemplate::send(Address::EMPTY, TokenStandard::ZNN, U256::zero())
        };
        let json = serde_json::to_value(&template).unwrap();
        assert_eq!(json["blockType"], 2);
        assert_eq!(json["amount"], "100000000000000000000");
        assert_eq!(json["data"], "3q0=");
        assert_eq!(json["tokenStandard"], "zts1znnxxxxxxxxxxxxx9z4ulx");
        assert_eq!(json["publicKey"], "");
        assert_eq!(json["momentumAcknowledged"]["height"], 0);

        let back: AccountBlockTemplate = serde_json::from_value(json).unwrap();
        assert_eq!(back, template);
    }

    #[test]
    fn test_account_block_from_node_json() {
        let json = serde_json::json!({
            "version": 1,
            "chainIdentifier": 1,
            "blockType": 3,
            "hash": "11".repeat(32),
            "previousHash": "00".repeat(32),
            "height": 4,
            "momentumAcknowledged": {"hash": "22".repeat(32), "height": 9},
            "address": "z1qqjnwjjpnue8xmmpanz6csze6tcmtzzdtfsww7",
            "toAddress": "z1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqsggv2f",
            "amount": "0",
            "tokenStandard": "zts1qqqqqqqqqqqqqqqqtq587y",
            "fromBlockHash": "33".repeat(32),
            "data": null,
            "fusedPlasma": 21000,
            "difficulty": 0,
            "nonce": "0000000000000000",
            "publicKey": "",
            "signature": "",
            "descendantBlocks": [],
            "basePlasma": 21000,
            "usedPlasma": 21000,
            "changesHash": "44".repeat(32),
            "confirmationDetail": {
                "numConfirmations": 2,
                "momentumHeight": 10,
                "momentumHash": "55".repeat(32),
                "momentumTimestamp": 1700000000
            },
            "pairedAccountBlock": null
        });
        let block: AccountBlock = serde_json::from_value(json).unwrap();
        assert!(block.is_completed());
        assert_eq!(block.template.block_type, BlockType::UserReceive);
        assert_eq!(block.template.height, 4);
        assert_eq!(block.template.momentum_acknowledged.height, 9);
        assert!(block.template.data.is_empty());
        assert!(block.paired_account_block.is_none());
        assert_eq!(block.base_plasma, 21000);
    }
}
