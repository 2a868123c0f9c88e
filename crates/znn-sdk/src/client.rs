//! JSON-RPC client and connection context

use async_trait::async_trait;
use serde_json::Value;
use znn_primitives::{Address, Hash};

use crate::api::{Ledger, Plasma, Signer};
use crate::block;
use crate::config::Config;
use crate::model::{
    AccountBlock, AccountBlockTemplate, GetRequiredPowParam, GetRequiredPowResponse, Momentum,
};
use crate::transport::{deserialize_response, MockTransport, Transport};
use crate::SdkError;

#[cfg(feature = "http")]
use crate::transport::HttpTransport;

/// Client for a node's JSON-RPC API
pub struct ZenonClient {
    transport: Box<dyn Transport>,
}

impl ZenonClient {
    /// Create a client with HTTP transport
    #[cfg(feature = "http")]
    pub fn connect(config: &Config) -> Result<Self, SdkError> {
        let transport = HttpTransport::with_timeout(&config.rpc_url, config.request_timeout())?;
        tracing::info!(url = %config.rpc_url, "connecting to node");
        Ok(Self::with_transport(transport))
    }

    /// Create a client with mock transport (for testing)
    pub fn new_mock() -> Self {
        Self::with_transport(MockTransport::new())
    }

    /// Create a client with a custom transport
    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Box::new(transport),
        }
    }

    /// Helper method to make RPC request and deserialize
    async fn request<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<T, SdkError> {
        let value = self.transport.request_json(method, params).await?;
        deserialize_response(value)
    }
}

#[async_trait]
impl Ledger for ZenonClient {
    async fn get_frontier_account_block(
        &self,
        address: &Address,
    ) -> Result<Option<AccountBlock>, SdkError> {
        self.request(
            "ledger.getFrontierAccountBlock",
            vec![Value::String(address.to_string())],
        )
        .await
    }

    async fn get_frontier_momentum(&self) -> Result<Momentum, SdkError> {
        self.request("ledger.getFrontierMomentum", vec![]).await
    }

    async fn get_account_block_by_hash(
        &self,
        hash: &Hash,
    ) -> Result<Option<AccountBlock>, SdkError> {
        self.request(
            "ledger.getAccountBlockByHash",
            vec![Value::String(hash.to_string())],
        )
        .await
    }

    async fn publish_raw_transaction(
        &self,
        template: &AccountBlockTemplate,
    ) -> Result<Option<String>, SdkError> {
        let reply = self
            .transport
            .request_json(
                "ledger.publishRawTransaction",
                vec![serde_json::to_value(template)?],
            )
            .await?;
        // the node answers with a bare string only on rejection
        match reply {
            Value::String(message) => Ok(Some(message)),
            _ => Ok(None),
        }
    }
}

#[async_trait]
impl Plasma for ZenonClient {
    async fn get_required_pow_for_account_block(
        &self,
        param: &GetRequiredPowParam,
    ) -> Result<GetRequiredPowResponse, SdkError> {
        self.request(
            "embedded.plasma.getRequiredPoWForAccountBlock",
            vec![serde_json::to_value(param)?],
        )
        .await
    }
}

/// Connection context: a node client plus the settings blocks are built with
pub struct Zenon {
    client: ZenonClient,
    config: Config,
}

impl Zenon {
    /// Connect over HTTP using `config`
    #[cfg(feature = "http")]
    pub fn connect(config: Config) -> Result<Self, SdkError> {
        let client = ZenonClient::connect(&config)?;
        Ok(Self { client, config })
    }

    /// Build a context around an existing client
    pub fn new(client: ZenonClient, config: Config) -> Self {
        Self { client, config }
    }

    /// Node client
    pub fn client(&self) -> &ZenonClient {
        &self.client
    }

    /// Active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Configured chain identifier
    pub fn chain_identifier(&self) -> u64 {
        self.config.chain_identifier
    }

    /// Configured network identifier
    pub fn network_identifier(&self) -> u64 {
        self.config.network_identifier
    }

    /// Stamp the configured chain identifier on `template`, then assemble,
    /// sign and publish it
    pub async fn send<S: Signer + ?Sized>(
        &self,
        template: AccountBlockTemplate,
        signer: &S,
    ) -> Result<AccountBlockTemplate, SdkError> {
        let template = template.with_chain_identifier(self.config.chain_identifier);
        block::send(&self.client, &self.client, template, signer).await
    }
}
