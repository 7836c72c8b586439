//! A `mockall` double implementing every chain client capability.

use super::{ChainClientError, ChainReader, ChainWriter, LogFilterer, RawAccountProof};
use alloy_eips::{BlockId, BlockNumberOrTag};
use alloy_primitives::{Address, B256, Bytes, U256};
use alloy_rpc_types_eth::{Filter, Header, Log, TransactionRequest};
use async_trait::async_trait;
use mockall::mock;

mock! {
    #[derive(Debug)]
    pub ChainClient {}

    #[async_trait]
    impl ChainReader for ChainClient {
        async fn chain_id(&self) -> Result<u64, ChainClientError>;
        async fn header_by_number(&self, number: BlockNumberOrTag) -> Result<Option<Header>, ChainClientError>;
        async fn header_by_hash(&self, hash: B256) -> Result<Option<Header>, ChainClientError>;
        async fn estimate_gas(&self, tx: TransactionRequest) -> Result<u64, ChainClientError>;
        async fn gas_price(&self) -> Result<u128, ChainClientError>;
        async fn pending_nonce(&self, address: Address) -> Result<u64, ChainClientError>;
        async fn call(&self, tx: TransactionRequest, block: BlockId) -> Result<Bytes, ChainClientError>;
        async fn get_logs(&self, filter: Filter) -> Result<Vec<Log>, ChainClientError>;
        async fn get_proof(&self, address: Address, keys: Vec<B256>, block: BlockId) -> Result<RawAccountProof, ChainClientError>;
    }

    #[async_trait]
    impl ChainWriter for ChainClient {
        async fn send_raw_transaction(&self, raw: Bytes) -> Result<B256, ChainClientError>;
    }

    #[async_trait]
    impl LogFilterer for ChainClient {
        async fn new_log_filter(&self, filter: Filter) -> Result<U256, ChainClientError>;
        async fn filter_changes(&self, id: U256) -> Result<Vec<Log>, ChainClientError>;
        async fn uninstall_filter(&self, id: U256) -> Result<bool, ChainClientError>;
    }
}
