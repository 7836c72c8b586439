//! Storage proofs of mapping entries.

use crate::{StorageProofError, StorageProofParams, hex::safe_hex_decode};
use alloy_eips::BlockId;
use alloy_primitives::{Address, B256, Bytes, b256, keccak256};
use alloy_sol_types::SolValue;
use filler_core::ChainReader;
use std::sync::Arc;
use tracing::{debug, info};

/// Storage slot of the inbox's `messageId => FulfillmentInfo` mapping.
pub const FULFILLMENT_INFO_SLOT: B256 =
    b256!("0x40f2eef6aad3cb0e74d3b59b45d3d5f2d5fc8dc382e739617b693cdd4bc30c00");

/// Slot of `key` in a mapping stored at `map_slot`, `keccak256(abi.encode(key, map_slot))`.
pub fn mapping_slot(key: B256, map_slot: B256) -> B256 {
    keccak256((key, map_slot).abi_encode())
}

/// Fetches and decodes `eth_getProof` results.
#[derive(Debug)]
pub struct StorageProver<C> {
    client: Arc<C>,
}

impl<C> Clone for StorageProver<C> {
    fn clone(&self) -> Self {
        Self { client: Arc::clone(&self.client) }
    }
}

impl<C: ChainReader> StorageProver<C> {
    /// Creates a prover querying `client`.
    pub const fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Proves the entry `key` of the mapping stored at `map_slot` of `contract`.
    pub async fn prove_mapping_entry(
        &self,
        contract: Address,
        map_slot: B256,
        key: B256,
        block: BlockId,
    ) -> Result<StorageProofParams, StorageProofError> {
        self.prove_slot(contract, mapping_slot(key, map_slot), block).await
    }

    /// Proves a single storage slot of `contract`.
    pub async fn prove_slot(
        &self,
        contract: Address,
        slot: B256,
        block: BlockId,
    ) -> Result<StorageProofParams, StorageProofError> {
        info!(target: "filler::prover", %contract, %slot, %block, "Getting storage proof");

        let proof = self
            .client
            .get_proof(contract, vec![slot], block)
            .await
            .map_err(StorageProofError::Rpc)?;
        let storage = proof.storage_proof.first().ok_or(StorageProofError::NoStorageProof)?;

        debug!(
            target: "filler::prover",
            address = %proof.address,
            storage_hash = %proof.storage_hash,
            account_proof_len = proof.account_proof.len(),
            storage_proof_len = storage.proof.len(),
            key = %storage.key,
            value = %storage.value,
            "Raw proof data"
        );

        let account_proof = proof
            .account_proof
            .iter()
            .enumerate()
            .map(|(index, node)| {
                safe_hex_decode(node)
                    .map(Bytes::from)
                    .map_err(|source| StorageProofError::AccountProofItem { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let storage_proof = storage
            .proof
            .iter()
            .enumerate()
            .map(|(index, node)| {
                safe_hex_decode(node)
                    .map(Bytes::from)
                    .map_err(|source| StorageProofError::StorageProofItem { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let storage_value = decode_word(&storage.value)?;

        info!(
            target: "filler::prover",
            %slot,
            %storage_value,
            account_proof_len = account_proof.len(),
            storage_proof_len = storage_proof.len(),
            "Storage proof"
        );

        Ok(StorageProofParams { storage_key: slot, storage_value, account_proof, storage_proof })
    }
}

fn decode_word(value: &str) -> Result<B256, StorageProofError> {
    let bytes = safe_hex_decode(value).map_err(|_| StorageProofError::StorageValue)?;
    if bytes.len() > 32 {
        return Err(StorageProofError::StorageValue);
    }
    Ok(B256::left_padding_from(&bytes))
}
