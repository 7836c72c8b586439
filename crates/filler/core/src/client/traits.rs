use super::{ChainClientError, RawAccountProof};
use alloy_eips::{BlockId, BlockNumberOrTag};
use alloy_primitives::{Address, B256, Bytes, U256};
use alloy_rpc_types_eth::{Filter, Header, Log, TransactionRequest};
use async_trait::async_trait;
use std::fmt::Debug;

/// Read access to a chain's node.
#[async_trait]
#[auto_impl::auto_impl(&, Arc, Box)]
pub trait ChainReader: Debug + Send + Sync {
    /// Returns the chain id reported by the node.
    async fn chain_id(&self) -> Result<u64, ChainClientError>;

    /// Fetches a block header by number or tag. `None` if the block is unknown.
    async fn header_by_number(
        &self,
        number: BlockNumberOrTag,
    ) -> Result<Option<Header>, ChainClientError>;

    /// Fetches a block header by hash. `None` if the block is unknown.
    async fn header_by_hash(&self, hash: B256) -> Result<Option<Header>, ChainClientError>;

    /// Estimates the gas a transaction would consume.
    async fn estimate_gas(&self, tx: TransactionRequest) -> Result<u64, ChainClientError>;

    /// Returns the node's suggested legacy gas price.
    async fn gas_price(&self) -> Result<u128, ChainClientError>;

    /// Returns the pending nonce of an account.
    async fn pending_nonce(&self, address: Address) -> Result<u64, ChainClientError>;

    /// Executes a view call at the given block.
    async fn call(&self, tx: TransactionRequest, block: BlockId) -> Result<Bytes, ChainClientError>;

    /// Returns the logs matching a filter.
    async fn get_logs(&self, filter: Filter) -> Result<Vec<Log>, ChainClientError>;

    /// Returns the account and storage proofs of `address` at `block`.
    async fn get_proof(
        &self,
        address: Address,
        keys: Vec<B256>,
        block: BlockId,
    ) -> Result<RawAccountProof, ChainClientError>;
}

/// Write access to a chain's node.
#[async_trait]
#[auto_impl::auto_impl(&, Arc, Box)]
pub trait ChainWriter: Debug + Send + Sync {
    /// Broadcasts a signed, EIP-2718 encoded transaction and returns its hash.
    async fn send_raw_transaction(&self, raw: Bytes) -> Result<B256, ChainClientError>;
}

/// Server-side log filters.
#[async_trait]
#[auto_impl::auto_impl(&, Arc, Box)]
pub trait LogFilterer: Debug + Send + Sync {
    /// Installs a log filter and returns its id.
    async fn new_log_filter(&self, filter: Filter) -> Result<U256, ChainClientError>;

    /// Returns the logs matched by a filter since the previous poll.
    async fn filter_changes(&self, id: U256) -> Result<Vec<Log>, ChainClientError>;

    /// Removes a log filter. Returns `false` if the node did not know it.
    async fn uninstall_filter(&self, id: U256) -> Result<bool, ChainClientError>;
}

/// Every capability the filler needs from a chain.
pub trait ChainClient: ChainReader + ChainWriter + LogFilterer {}

impl<T> ChainClient for T where T: ChainReader + ChainWriter + LogFilterer {}
