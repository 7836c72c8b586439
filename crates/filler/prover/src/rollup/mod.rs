//! Destination rollup state capture.

mod arbitrum;
pub use arbitrum::ArbitrumStateProver;

use crate::{RollupAssertion, RollupProofError, StorageProofParams};
use alloy_rpc_types_eth::Header;
use async_trait::async_trait;
use std::fmt::Debug;

/// A rollup assertion confirmed on L1, with its proof in the rollup contract's storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollupStateProof {
    /// The assertion.
    pub assertion: RollupAssertion,
    /// Storage proof of the assertion in the rollup contract on L1.
    pub state_root_proof: StorageProofParams,
    /// Number of the L2 block the assertion ends at.
    pub l2_block_number: u64,
}

/// Proves the destination rollup's state as of an L1 block.
#[async_trait]
pub trait RollupStateProver: Debug + Send + Sync {
    /// Captures the latest assertion confirmed at `l1_block`.
    async fn prove_rollup_state(
        &self,
        l1_block: Option<&Header>,
    ) -> Result<RollupStateProof, RollupProofError>;
}
