//! Plasma and proof-of-work requirement queries

use serde::{Deserialize, Serialize};
use znn_primitives::Address;

use super::account_block::{AccountBlockTemplate, BlockType};
use crate::serde_util::base64_bytes;

/// Parameters of `embedded.plasma.getRequiredPoWForAccountBlock`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetRequiredPowParam {
    /// Account publishing the block
    pub address: Address,
    /// Block kind
    pub block_type: BlockType,
    /// Destination; the account itself for receives
    pub to_address: Address,
    /// Call payload
    #[serde(default, with = "base64_bytes")]
    pub data: Vec<u8>,
}

impl GetRequiredPowParam {
    /// Query shape for `template` published by `address`
    pub fn for_template(template: &AccountBlockTemplate, address: Address) -> Self {
        let to_address = if template.block_type == BlockType::UserReceive {
            address
        } else {
            template.to_address
        };
        Self {
            address,
            block_type: template.block_type,
            to_address,
            data: template.data.clone(),
        }
    }
}

/// Plasma available to an account and the work needed to cover the rest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetRequiredPowResponse {
    /// Plasma from fusions
    pub available_plasma: u64,
    /// Plasma the block costs
    pub base_plasma: u64,
    /// Difficulty to cover the shortfall; zero when fusions suffice
    pub required_difficulty: u64,
}
