//! Arbitrum BoLD assertion capture.

use super::{RollupStateProof, RollupStateProver};
use crate::{AssertionStateData, RollupAssertion, RollupProofError, storage::StorageProver};
use alloy_eips::BlockId;
use alloy_primitives::{Address, B256, keccak256};
use alloy_rpc_types_eth::{Filter, Header, TransactionInput, TransactionRequest};
use alloy_sol_types::{SolCall, SolEvent};
use async_trait::async_trait;
use filler_core::ChainReader;
use filler_types::bindings::ArbitrumRollup::{AssertionCreated, latestConfirmedCall};
use std::sync::Arc;
use tracing::info;

/// Captures the latest confirmed assertion of an Arbitrum rollup.
///
/// The assertion hash is read from the rollup contract on L1, its `AssertionCreated` log is
/// located within a bounded look-back window and the L2 block it ends at is fetched from the L2
/// node. The assertion is proven in the rollup's storage on L1 at
/// `keccak256(assertionHash ++ assertionsSlot)`.
#[derive(Debug)]
pub struct ArbitrumStateProver<L1, L2> {
    l1: Arc<L1>,
    l2: Arc<L2>,
    rollup: Address,
    assertions_slot: B256,
    lookback_blocks: u64,
}

impl<L1, L2> ArbitrumStateProver<L1, L2>
where
    L1: ChainReader,
    L2: ChainReader,
{
    /// Creates a prover for the rollup contract `rollup`, whose assertion mapping lives at
    /// `assertions_slot`.
    pub const fn new(
        l1: Arc<L1>,
        l2: Arc<L2>,
        rollup: Address,
        assertions_slot: B256,
        lookback_blocks: u64,
    ) -> Self {
        Self { l1, l2, rollup, assertions_slot, lookback_blocks }
    }

    async fn latest_confirmed(&self, l1_block: u64) -> Result<B256, RollupProofError> {
        let tx = TransactionRequest::default()
            .to(self.rollup)
            .input(TransactionInput::new(latestConfirmedCall {}.abi_encode().into()));
        let ret = self
            .l1
            .call(tx, BlockId::number(l1_block))
            .await
            .map_err(RollupProofError::LatestConfirmed)?;
        latestConfirmedCall::abi_decode_returns(&ret)
            .map_err(|err| RollupProofError::LatestConfirmedReturn(err.to_string()))
    }

    async fn assertion_created(
        &self,
        assertion_hash: B256,
        l1_block: u64,
    ) -> Result<AssertionCreated, RollupProofError> {
        let from_block = l1_block.saturating_sub(self.lookback_blocks);
        let filter = Filter::new()
            .address(self.rollup)
            .event_signature(AssertionCreated::SIGNATURE_HASH)
            .topic1(assertion_hash)
            .from_block(from_block)
            .to_block(l1_block);

        let logs = self.l1.get_logs(filter).await.map_err(RollupProofError::AssertionLogs)?;
        let log = logs.last().ok_or(RollupProofError::AssertionNotFound {
            assertion_hash,
            from_block,
            to_block: l1_block,
        })?;

        AssertionCreated::decode_log_data(&log.inner.data)
            .map_err(|err| RollupProofError::AssertionDecode(err.to_string()))
    }
}

#[async_trait]
impl<L1, L2> RollupStateProver for ArbitrumStateProver<L1, L2>
where
    L1: ChainReader,
    L2: ChainReader,
{
    async fn prove_rollup_state(
        &self,
        l1_block: Option<&Header>,
    ) -> Result<RollupStateProof, RollupProofError> {
        let l1_block = l1_block.ok_or(RollupProofError::MissingL1Block)?;
        let l1_number = l1_block.number;

        let assertion_hash = self.latest_confirmed(l1_number).await?;
        let event = self.assertion_created(assertion_hash, l1_number).await?;
        let after_state = AssertionStateData::try_from(event.assertion.afterState)?;

        let l2_block_hash = after_state.global_state.block_hash();
        let l2_header = self
            .l2
            .header_by_hash(l2_block_hash)
            .await
            .map_err(RollupProofError::L2Block)?
            .ok_or(RollupProofError::L2BlockNotFound(l2_block_hash))?;
        let encoded_block_array = alloy_rlp::encode(&l2_header.inner);
        let encoded_hash = keccak256(&encoded_block_array);
        if encoded_hash != l2_block_hash {
            return Err(RollupProofError::BlockHashMismatch {
                expected: l2_block_hash,
                actual: encoded_hash,
            });
        }

        let state_root_proof = StorageProver::new(Arc::clone(&self.l1))
            .prove_mapping_entry(
                self.rollup,
                self.assertions_slot,
                assertion_hash,
                BlockId::number(l1_number),
            )
            .await?;

        info!(
            target: "filler::prover",
            %assertion_hash,
            parent_assertion_hash = %event.parentAssertionHash,
            l1_block = l1_number,
            l2_block = l2_header.number,
            %l2_block_hash,
            "Captured confirmed assertion"
        );

        Ok(RollupStateProof {
            assertion: RollupAssertion {
                encoded_block_array: encoded_block_array.into(),
                after_state,
                prev_assertion_hash: event.parentAssertionHash,
                sequencer_batch_acc: event.afterInboxBatchAcc,
            },
            state_root_proof,
            l2_block_number: l2_header.number,
        })
    }
}
