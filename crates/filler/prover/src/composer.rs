//! Composition of the three proof steps into a [`ProofBundle`].

use crate::{
    FULFILLMENT_INFO_SLOT, L1StateProver, ProofBundle, ProverError, RollupStateProver,
    StorageProver,
};
use alloy_eips::{BlockId, BlockNumberOrTag};
use alloy_primitives::{Address, B256};
use filler_core::ChainReader;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Proves that a message was fulfilled on a destination rollup.
///
/// The L1 state is captured first, then the rollup's latest confirmed assertion as of that L1
/// block, then the inbox's fulfillment record at the L2 block the assertion ends at. The
/// composition stops with [`ProverError::Cancelled`] if the token is cancelled between steps.
#[derive(Debug)]
pub struct ProofComposer<L1, L2, R> {
    l1: L1StateProver<L1>,
    rollup: R,
    storage: StorageProver<L2>,
    inbox: Address,
    cancel: CancellationToken,
}

impl<L1, L2, R> ProofComposer<L1, L2, R>
where
    L1: ChainReader,
    L2: ChainReader,
    R: RollupStateProver,
{
    /// Creates a composer proving fulfillments recorded by `inbox`.
    pub const fn new(
        l1: L1StateProver<L1>,
        rollup: R,
        storage: StorageProver<L2>,
        inbox: Address,
        cancel: CancellationToken,
    ) -> Self {
        Self { l1, rollup, storage, inbox, cancel }
    }

    /// Composes the proof bundle for `message_id` against the given L1 block.
    pub async fn compose(
        &self,
        message_id: B256,
        l1_block: BlockNumberOrTag,
    ) -> Result<ProofBundle, ProverError> {
        let l1 = self.l1.prove(l1_block).await.map_err(ProverError::L1State)?;
        self.ensure_active()?;

        let rollup = self
            .rollup
            .prove_rollup_state(Some(&l1.header))
            .await
            .map_err(ProverError::RollupState)?;
        self.ensure_active()?;

        let account_proof = self
            .storage
            .prove_mapping_entry(
                self.inbox,
                FULFILLMENT_INFO_SLOT,
                message_id,
                BlockId::number(rollup.l2_block_number),
            )
            .await
            .map_err(ProverError::InboxStorage)?;

        info!(
            target: "filler::prover",
            %message_id,
            l1_block = l1.header.number,
            l2_block = rollup.l2_block_number,
            "Composed proof bundle"
        );

        Ok(ProofBundle {
            l1_state_proof: l1.proof,
            dest_rollup_assertion: rollup.assertion,
            dest_l2_state_root_proof: rollup.state_root_proof,
            dest_l2_account_proof: account_proof,
        })
    }

    fn ensure_active(&self) -> Result<(), ProverError> {
        if self.cancel.is_cancelled() { Err(ProverError::Cancelled) } else { Ok(()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        L1ProofError, RollupAssertion, RollupProofError, RollupStateProof, StorageProofError,
        StorageProofParams, mapping_slot,
    };
    use alloy_primitives::b256;
    use alloy_rpc_types_eth::Header;
    use async_trait::async_trait;
    use filler_core::client::{MockChainClient, RawAccountProof, RawStorageProof};
    use std::sync::Arc;

    const INBOX: Address = alloy_primitives::address!("0x1bb8dacba30b1cd82ce1d3d7f24e16ee549aebe8");
    const MESSAGE_ID: B256 =
        b256!("0x86a798714c57faaa50bc649a07dc45013c4931d4c630d5a316f5975f02704586");
    const L2_BLOCK: u64 = 120_000_000;

    #[derive(Debug)]
    struct StubRollupProver {
        fail: bool,
        cancel_on_call: Option<CancellationToken>,
    }

    #[async_trait]
    impl RollupStateProver for StubRollupProver {
        async fn prove_rollup_state(
            &self,
            l1_block: Option<&Header>,
        ) -> Result<RollupStateProof, RollupProofError> {
            let l1_block = l1_block.ok_or(RollupProofError::MissingL1Block)?;
            assert_eq!(l1_block.number, 7_000_000);
            if let Some(cancel) = &self.cancel_on_call {
                cancel.cancel();
            }
            if self.fail {
                return Err(RollupProofError::L2BlockNotFound(B256::repeat_byte(0xbb)));
            }
            Ok(RollupStateProof {
                assertion: RollupAssertion {
                    prev_assertion_hash: B256::repeat_byte(0xa4),
                    ..Default::default()
                },
                state_root_proof: StorageProofParams {
                    storage_key: B256::repeat_byte(0x76),
                    ..Default::default()
                },
                l2_block_number: L2_BLOCK,
            })
        }
    }

    fn l1_client() -> MockChainClient {
        let mut client = MockChainClient::new();
        client.expect_header_by_number().returning(|_| {
            Ok(Some(Header {
                inner: alloy_consensus::Header {
                    number: 7_000_000,
                    state_root: B256::repeat_byte(0x5e),
                    ..Default::default()
                },
                ..Default::default()
            }))
        });
        client
    }

    fn l2_client(storage_proof: Vec<RawStorageProof>) -> MockChainClient {
        let mut client = MockChainClient::new();
        client
            .expect_get_proof()
            .withf(|address, keys, block| {
                *address == INBOX &&
                    keys == &vec![mapping_slot(MESSAGE_ID, FULFILLMENT_INFO_SLOT)] &&
                    *block == BlockId::number(L2_BLOCK)
            })
            .return_once(move |address, _, _| {
                Ok(RawAccountProof { address, storage_proof, ..Default::default() })
            });
        client
    }

    fn composer(
        l1: MockChainClient,
        rollup: StubRollupProver,
        l2: MockChainClient,
        devnet: bool,
        cancel: CancellationToken,
    ) -> ProofComposer<MockChainClient, MockChainClient, StubRollupProver> {
        ProofComposer::new(
            L1StateProver::new(Arc::new(l1), devnet),
            rollup,
            StorageProver::new(Arc::new(l2)),
            INBOX,
            cancel,
        )
    }

    #[tokio::test]
    async fn test_compose() {
        let storage = RawStorageProof {
            key: mapping_slot(MESSAGE_ID, FULFILLMENT_INFO_SLOT).to_string(),
            value: "0x67d2a8ee".to_string(),
            proof: vec!["0xc1".to_string()],
        };
        let composer = composer(
            l1_client(),
            StubRollupProver { fail: false, cancel_on_call: None },
            l2_client(vec![storage]),
            true,
            CancellationToken::new(),
        );

        let bundle = composer.compose(MESSAGE_ID, BlockNumberOrTag::Latest).await.unwrap();

        assert_eq!(bundle.l1_state_proof.execution_state_root, B256::repeat_byte(0x5e));
        assert_eq!(bundle.dest_rollup_assertion.prev_assertion_hash, B256::repeat_byte(0xa4));
        assert_eq!(bundle.dest_l2_state_root_proof.storage_key, B256::repeat_byte(0x76));
        assert_eq!(
            bundle.dest_l2_account_proof.storage_key,
            mapping_slot(MESSAGE_ID, FULFILLMENT_INFO_SLOT)
        );
        assert_eq!(bundle.dest_l2_account_proof.storage_value, B256::left_padding_from(&[
            0x67, 0xd2, 0xa8, 0xee
        ]));
    }

    #[tokio::test]
    async fn test_l1_failure_is_wrapped() {
        let composer = composer(
            MockChainClient::new(),
            StubRollupProver { fail: false, cancel_on_call: None },
            MockChainClient::new(),
            false,
            CancellationToken::new(),
        );

        let err = composer.compose(MESSAGE_ID, BlockNumberOrTag::Latest).await.unwrap_err();
        assert_eq!(err, ProverError::L1State(L1ProofError::ProductionNotImplemented));
        assert_eq!(
            err.to_string(),
            "failed to generate L1 state proof: production beacon chain proof generation not \
             implemented"
        );
    }

    #[tokio::test]
    async fn test_rollup_failure_is_wrapped() {
        let mut l2 = MockChainClient::new();
        l2.expect_get_proof().never();
        let composer = composer(
            l1_client(),
            StubRollupProver { fail: true, cancel_on_call: None },
            l2,
            true,
            CancellationToken::new(),
        );

        let err = composer.compose(MESSAGE_ID, BlockNumberOrTag::Latest).await.unwrap_err();
        assert_eq!(
            err,
            ProverError::RollupState(RollupProofError::L2BlockNotFound(B256::repeat_byte(0xbb)))
        );
        assert!(err.to_string().starts_with("failed to generate arbitrum state proof: "));
    }

    #[tokio::test]
    async fn test_storage_failure_is_wrapped() {
        let composer = composer(
            l1_client(),
            StubRollupProver { fail: false, cancel_on_call: None },
            l2_client(vec![]),
            true,
            CancellationToken::new(),
        );

        let err = composer.compose(MESSAGE_ID, BlockNumberOrTag::Latest).await.unwrap_err();
        assert_eq!(err, ProverError::InboxStorage(StorageProofError::NoStorageProof));
        assert_eq!(
            err.to_string(),
            "failed to generate inbox storage proof: no storage proof returned"
        );
    }

    #[tokio::test]
    async fn test_cancelled_between_steps() {
        let cancel = CancellationToken::new();
        let mut l2 = MockChainClient::new();
        l2.expect_get_proof().never();
        let composer = composer(
            l1_client(),
            StubRollupProver { fail: false, cancel_on_call: Some(cancel.clone()) },
            l2,
            true,
            cancel,
        );

        let err = composer.compose(MESSAGE_ID, BlockNumberOrTag::Latest).await.unwrap_err();
        assert_eq!(err, ProverError::Cancelled);
    }

    #[tokio::test]
    async fn test_cancelled_before_rollup_step() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let composer = composer(
            l1_client(),
            StubRollupProver { fail: true, cancel_on_call: None },
            MockChainClient::new(),
            true,
            cancel,
        );

        let err = composer.compose(MESSAGE_ID, BlockNumberOrTag::Latest).await.unwrap_err();
        assert_eq!(err, ProverError::Cancelled);
    }
}
