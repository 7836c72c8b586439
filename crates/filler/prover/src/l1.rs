//! Capture of the L1 execution state.

use crate::{L1ProofError, L1StateProof};
use alloy_eips::BlockNumberOrTag;
use alloy_primitives::{B256, keccak256};
use alloy_rpc_types_eth::Header;
use filler_core::ChainReader;
use std::sync::Arc;
use tracing::info;

/// An L1 state proof together with the header it was taken from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct L1StateCapture {
    /// The proof.
    pub proof: L1StateProof,
    /// The captured L1 block header.
    pub header: Header,
}

/// Proves an L1 execution state root.
///
/// On a devnet there is no beacon chain, so the beacon root is stood in for by
/// `keccak256(stateRoot)` and the SSZ proof by a single placeholder node.
#[derive(Debug)]
pub struct L1StateProver<C> {
    client: Arc<C>,
    devnet: bool,
}

impl<C: ChainReader> L1StateProver<C> {
    /// Creates a prover querying the L1 node `client`.
    pub const fn new(client: Arc<C>, devnet: bool) -> Self {
        Self { client, devnet }
    }

    /// Captures the state of the given L1 block.
    pub async fn prove(&self, block: BlockNumberOrTag) -> Result<L1StateCapture, L1ProofError> {
        if !self.devnet {
            return Err(L1ProofError::ProductionNotImplemented);
        }

        let header = self
            .client
            .header_by_number(block)
            .await
            .map_err(L1ProofError::Rpc)?
            .ok_or(L1ProofError::BlockNotFound(block))?;

        let execution_state_root = header.state_root;
        let proof = L1StateProof {
            beacon_root: keccak256(execution_state_root),
            beacon_timestamp: header.timestamp,
            execution_state_root,
            state_root_proof: vec![B256::ZERO],
        };

        info!(
            target: "filler::prover",
            block_number = header.number,
            execution_state_root = %proof.execution_state_root,
            beacon_root = %proof.beacon_root,
            timestamp = proof.beacon_timestamp,
            "Generated L1 state proof for devnet"
        );

        Ok(L1StateCapture { proof, header })
    }
}
