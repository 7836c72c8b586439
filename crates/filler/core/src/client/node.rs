//! [`NodeClient`], the chain capabilities backed by an alloy [`RootProvider`] over HTTP.

use super::{ChainClientError, ChainReader, ChainWriter, LogFilterer, RawAccountProof};
use crate::config::ChainEndpoint;
use alloy_eips::{BlockId, BlockNumberOrTag};
use alloy_network::Ethereum;
use alloy_primitives::{Address, B256, Bytes, U256};
use alloy_provider::{Provider, RootProvider};
use alloy_rpc_client::RpcClient;
use alloy_rpc_types_eth::{Filter, Header, Log, TransactionRequest};
use alloy_transport_http::Http;
use async_trait::async_trait;
use url::Url;

/// A JSON-RPC connection to a single chain's node.
#[derive(Debug, Clone)]
pub struct NodeClient {
    provider: RootProvider<Ethereum>,
}

impl NodeClient {
    /// Builds a client for `url`. With `insecure_skip_verify`, invalid TLS certificates are
    /// accepted.
    pub fn new_http(url: Url, insecure_skip_verify: bool) -> Result<Self, ChainClientError> {
        let http_client =
            reqwest::Client::builder().danger_accept_invalid_certs(insecure_skip_verify).build()?;
        let transport = Http::with_client(http_client, url);
        let rpc_client = RpcClient::new(transport, false);
        Ok(Self { provider: RootProvider::<Ethereum>::new(rpc_client) })
    }

    /// Builds a client from a chain's configuration.
    pub fn from_endpoint(endpoint: &ChainEndpoint) -> Result<Self, ChainClientError> {
        Self::new_http(endpoint.node_url.parse()?, endpoint.node_insecure_skip_verify)
    }

    /// Returns the underlying provider.
    pub const fn provider(&self) -> &RootProvider<Ethereum> {
        &self.provider
    }
}

#[async_trait]
impl ChainReader for NodeClient {
    async fn chain_id(&self) -> Result<u64, ChainClientError> {
        Ok(self.provider.get_chain_id().await?)
    }

    async fn header_by_number(
        &self,
        number: BlockNumberOrTag,
    ) -> Result<Option<Header>, ChainClientError> {
        let block = self.provider.get_block_by_number(number).await?;
        Ok(block.map(|block| block.header))
    }

    async fn header_by_hash(&self, hash: B256) -> Result<Option<Header>, ChainClientError> {
        let block = self.provider.get_block_by_hash(hash).await?;
        Ok(block.map(|block| block.header))
    }

    async fn estimate_gas(&self, tx: TransactionRequest) -> Result<u64, ChainClientError> {
        Ok(self.provider.estimate_gas(tx).await?)
    }

    async fn gas_price(&self) -> Result<u128, ChainClientError> {
        Ok(self.provider.get_gas_price().await?)
    }

    async fn pending_nonce(&self, address: Address) -> Result<u64, ChainClientError> {
        Ok(self.provider.get_transaction_count(address).pending().await?)
    }

    async fn call(&self, tx: TransactionRequest, block: BlockId) -> Result<Bytes, ChainClientError> {
        Ok(self.provider.call(tx).block(block).await?)
    }

    async fn get_logs(&self, filter: Filter) -> Result<Vec<Log>, ChainClientError> {
        Ok(self.provider.get_logs(&filter).await?)
    }

    async fn get_proof(
        &self,
        address: Address,
        keys: Vec<B256>,
        block: BlockId,
    ) -> Result<RawAccountProof, ChainClientError> {
        let proof = self
            .provider
            .client()
            .request::<_, RawAccountProof>("eth_getProof", (address, keys, block))
            .await?;
        Ok(proof)
    }
}

#[async_trait]
impl ChainWriter for NodeClient {
    async fn send_raw_transaction(&self, raw: Bytes) -> Result<B256, ChainClientError> {
        let pending = self.provider.send_raw_transaction(&raw).await?;
        Ok(*pending.tx_hash())
    }
}

#[async_trait]
impl LogFilterer for NodeClient {
    async fn new_log_filter(&self, filter: Filter) -> Result<U256, ChainClientError> {
        Ok(self.provider.new_filter(&filter).await?)
    }

    async fn filter_changes(&self, id: U256) -> Result<Vec<Log>, ChainClientError> {
        Ok(self.provider.get_filter_changes::<Log>(id).await?)
    }

    async fn uninstall_filter(&self, id: U256) -> Result<bool, ChainClientError> {
        Ok(self.provider.uninstall_filter(id).await?)
    }
}
