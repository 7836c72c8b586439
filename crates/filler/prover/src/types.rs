//! The proof bundle and its parts.

use crate::RollupProofError;
use alloy_primitives::{B256, Bytes, U256};
use alloy_sol_types::SolValue;
use filler_types::bindings::{
    AssertionState, GlobalState, RRC7755Proof, StateProofParameters, StorageProofParameters,
};
use serde::{Deserialize, Serialize};

/// Beacon-anchored proof of an L1 execution state root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct L1StateProof {
    /// Beacon block root committing to the execution payload.
    pub beacon_root: B256,
    /// Timestamp under which the beacon root is stored in the beacon-roots oracle.
    pub beacon_timestamp: u64,
    /// L1 execution state root.
    pub execution_state_root: B256,
    /// SSZ proof from the beacon root to the execution state root.
    pub state_root_proof: Vec<B256>,
}

impl From<&L1StateProof> for StateProofParameters {
    fn from(proof: &L1StateProof) -> Self {
        Self {
            beaconRoot: proof.beacon_root,
            beaconOracleTimestamp: U256::from(proof.beacon_timestamp),
            executionStateRoot: proof.execution_state_root,
            stateRootProof: proof.state_root_proof.clone(),
        }
    }
}

/// Status of the Arbitrum sequencer machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum MachineStatus {
    /// Still executing.
    #[default]
    Running = 0,
    /// Execution completed.
    Finished = 1,
    /// Execution failed.
    Errored = 2,
}

impl TryFrom<u8> for MachineStatus {
    type Error = RollupProofError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Running),
            1 => Ok(Self::Finished),
            2 => Ok(Self::Errored),
            other => Err(RollupProofError::InvalidMachineStatus(other)),
        }
    }
}

/// Arbitrum global state after an assertion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalStateData {
    /// L2 block hash and send root.
    pub bytes32_vals: [B256; 2],
    /// Inbox position and position in message.
    pub u64_vals: [u64; 2],
}

impl GlobalStateData {
    /// Hash of the L2 block the assertion ends at.
    pub const fn block_hash(&self) -> B256 {
        self.bytes32_vals[0]
    }

    /// Root of the outgoing message accumulator.
    pub const fn send_root(&self) -> B256 {
        self.bytes32_vals[1]
    }
}

/// Arbitrum assertion state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssertionStateData {
    /// Global state.
    pub global_state: GlobalStateData,
    /// Machine status.
    pub machine_status: MachineStatus,
    /// Root of the execution history.
    pub end_history_root: B256,
}

impl TryFrom<AssertionState> for AssertionStateData {
    type Error = RollupProofError;

    fn try_from(state: AssertionState) -> Result<Self, Self::Error> {
        Ok(Self {
            global_state: GlobalStateData {
                bytes32_vals: state.globalState.bytes32Vals,
                u64_vals: state.globalState.u64Vals,
            },
            machine_status: state.machineStatus.try_into()?,
            end_history_root: state.endHistoryRoot,
        })
    }
}

impl From<&AssertionStateData> for AssertionState {
    fn from(state: &AssertionStateData) -> Self {
        Self {
            globalState: GlobalState {
                bytes32Vals: state.global_state.bytes32_vals,
                u64Vals: state.global_state.u64_vals,
            },
            machineStatus: state.machine_status as u8,
            endHistoryRoot: state.end_history_root,
        }
    }
}

/// The destination rollup's confirmed assertion and the L2 block it ends at.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollupAssertion {
    /// RLP-encoded L2 block header. Hashes to the assertion's block hash.
    pub encoded_block_array: Bytes,
    /// State after the assertion.
    pub after_state: AssertionStateData,
    /// Parent assertion hash.
    pub prev_assertion_hash: B256,
    /// Sequencer inbox accumulator after the assertion.
    pub sequencer_batch_acc: B256,
}

/// Proof of a single storage slot, account proof included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageProofParams {
    /// Proven slot.
    pub storage_key: B256,
    /// Slot value.
    pub storage_value: B256,
    /// Account proof nodes.
    pub account_proof: Vec<Bytes>,
    /// Storage proof nodes.
    pub storage_proof: Vec<Bytes>,
}

impl StorageProofParams {
    /// RLP list of the account proof nodes.
    pub fn account_proof_rlp(&self) -> Bytes {
        alloy_rlp::encode(&self.account_proof).into()
    }

    /// RLP list of the storage proof nodes.
    pub fn storage_proof_rlp(&self) -> Bytes {
        alloy_rlp::encode(&self.storage_proof).into()
    }
}

impl From<&StorageProofParams> for StorageProofParameters {
    fn from(params: &StorageProofParams) -> Self {
        Self {
            storageKey: Bytes::copy_from_slice(params.storage_key.as_slice()),
            storageValue: Bytes::copy_from_slice(params.storage_value.as_slice()),
            accountProof: params.account_proof_rlp(),
            storageProof: params.storage_proof_rlp(),
        }
    }
}

/// The nested proof that a fulfillment record exists on a destination chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofBundle {
    /// L1 execution state root, anchored in the beacon chain.
    pub l1_state_proof: L1StateProof,
    /// Destination rollup assertion confirmed on L1.
    pub dest_rollup_assertion: RollupAssertion,
    /// Proof of the assertion in the rollup contract's storage on L1.
    pub dest_l2_state_root_proof: StorageProofParams,
    /// Proof of the fulfillment record in the inbox's storage on L2.
    pub dest_l2_account_proof: StorageProofParams,
}

impl ProofBundle {
    /// The bundle as the on-chain proof tuple.
    pub fn to_sol(&self) -> RRC7755Proof {
        let assertion = &self.dest_rollup_assertion;
        RRC7755Proof {
            encodedBlockArray: assertion.encoded_block_array.clone(),
            afterState: (&assertion.after_state).into(),
            prevAssertionHash: assertion.prev_assertion_hash,
            sequencerBatchAcc: assertion.sequencer_batch_acc,
            stateProofParams: (&self.l1_state_proof).into(),
            dstL2StateRootProofParams: (&self.dest_l2_state_root_proof).into(),
            dstL2AccountProofParams: (&self.dest_l2_account_proof).into(),
        }
    }

    /// ABI encoding of the bundle, the `proof` argument of `claimReward`.
    pub fn abi_encode(&self) -> Bytes {
        self.to_sol().abi_encode().into()
    }
}
