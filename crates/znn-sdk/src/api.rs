//! Collaborators consumed by the transaction assembler

use async_trait::async_trait;
use znn_primitives::{Address, Hash};

use crate::model::{
    AccountBlock, AccountBlockTemplate, GetRequiredPowParam, GetRequiredPowResponse, Momentum,
};
use crate::SdkError;

/// Ledger queries and publication
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Latest account block of `address`, if the account has any
    async fn get_frontier_account_block(
        &self,
        address: &Address,
    ) -> Result<Option<AccountBlock>, SdkError>;

    /// Latest momentum
    async fn get_frontier_momentum(&self) -> Result<Momentum, SdkError>;

    /// Account block by hash
    async fn get_account_block_by_hash(&self, hash: &Hash)
        -> Result<Option<AccountBlock>, SdkError>;

    /// Submit a signed block. `Some(message)` when the node rejects it.
    async fn publish_raw_transaction(
        &self,
        template: &AccountBlockTemplate,
    ) -> Result<Option<String>, SdkError>;
}

/// Plasma queries
#[async_trait]
pub trait Plasma: Send + Sync {
    /// Plasma and proof-of-work needed to publish a block of the given shape
    async fn get_required_pow_for_account_block(
        &self,
        param: &GetRequiredPowParam,
    ) -> Result<GetRequiredPowResponse, SdkError>;
}

/// Holder of a signing key
#[async_trait]
pub trait Signer: Send + Sync {
    /// Sign `message`, returning the raw signature bytes
    async fn sign(&self, message: &[u8]) -> Result<Vec<u8>, SdkError>;

    /// Address derived from the public key
    async fn address(&self) -> Result<Address, SdkError>;

    /// Raw public key bytes
    async fn public_key(&self) -> Result<Vec<u8>, SdkError>;
}
