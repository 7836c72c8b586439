//! Errors of the proof pipeline, one enum per step plus the composer's wrapper.

use alloy_eips::BlockNumberOrTag;
use alloy_primitives::{B256, hex::FromHexError};
use filler_core::ChainClientError;
use filler_types::DecodeError;
use thiserror::Error;

/// Errors of the storage proof step.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StorageProofError {
    /// `eth_getProof` failed.
    #[error("failed to get proof from RPC: {0}")]
    Rpc(#[source] ChainClientError),

    /// The node returned no storage proof for the requested slot.
    #[error("no storage proof returned")]
    NoStorageProof,

    /// An account proof node is not valid hex.
    #[error("failed to decode account proof item {index}: {source}")]
    AccountProofItem {
        /// Node index.
        index: usize,
        /// Decoding error.
        #[source]
        source: FromHexError,
    },

    /// A storage proof node is not valid hex.
    #[error("failed to decode storage proof item {index}: {source}")]
    StorageProofItem {
        /// Node index.
        index: usize,
        /// Decoding error.
        #[source]
        source: FromHexError,
    },

    /// The slot value is not valid hex or is wider than a word.
    #[error("failed to decode storage value")]
    StorageValue,
}

/// Errors of the L1 state step.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum L1ProofError {
    /// Beacon-chain proofs are only stubbed on devnets.
    #[error("production beacon chain proof generation not implemented")]
    ProductionNotImplemented,

    /// Fetching the L1 block failed.
    #[error("failed to get L1 block: {0}")]
    Rpc(#[source] ChainClientError),

    /// The L1 node does not know the block.
    #[error("L1 block not found: {0}")]
    BlockNotFound(BlockNumberOrTag),
}

/// Errors of the rollup assertion step.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RollupProofError {
    /// No L1 block was captured.
    #[error("l1 block cannot be nil")]
    MissingL1Block,

    /// Reading `latestConfirmed()` failed.
    #[error("reading latest confirmed assertion: {0}")]
    LatestConfirmed(#[source] ChainClientError),

    /// The `latestConfirmed()` return data could not be decoded.
    #[error("decoding latest confirmed assertion: {0}")]
    LatestConfirmedReturn(String),

    /// Fetching `AssertionCreated` logs failed.
    #[error("fetching assertion logs: {0}")]
    AssertionLogs(#[source] ChainClientError),

    /// No `AssertionCreated` log was found within the look-back window.
    #[error("assertion {assertion_hash} not found in L1 blocks {from_block}..={to_block}")]
    AssertionNotFound {
        /// Confirmed assertion hash.
        assertion_hash: B256,
        /// First searched block.
        from_block: u64,
        /// Last searched block.
        to_block: u64,
    },

    /// The `AssertionCreated` log could not be decoded.
    #[error("decoding AssertionCreated log: {0}")]
    AssertionDecode(String),

    /// The machine status is outside the known range.
    #[error("invalid machine status: {0}")]
    InvalidMachineStatus(u8),

    /// Fetching the L2 header failed.
    #[error("failed to get L2 block: {0}")]
    L2Block(#[source] ChainClientError),

    /// The L2 node does not know the asserted block.
    #[error("L2 block not found: {0}")]
    L2BlockNotFound(B256),

    /// The encoded L2 header does not hash to the asserted block hash.
    #[error("L2 header hash mismatch, want: {expected}, got: {actual}")]
    BlockHashMismatch {
        /// Asserted block hash.
        expected: B256,
        /// Hash of the encoded header.
        actual: B256,
    },

    /// Proving the assertion in the rollup's storage failed.
    #[error(transparent)]
    StorageProof(#[from] StorageProofError),
}

/// Errors of proof composition.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProverError {
    /// Step 1 failed.
    #[error("failed to generate L1 state proof: {0}")]
    L1State(#[source] L1ProofError),

    /// Step 2 failed.
    #[error("failed to generate arbitrum state proof: {0}")]
    RollupState(#[source] RollupProofError),

    /// Step 3 failed.
    #[error("failed to generate inbox storage proof: {0}")]
    InboxStorage(#[source] StorageProofError),

    /// Composition was cancelled between steps.
    #[error("proof composition cancelled")]
    Cancelled,
}

/// Errors reading the inbox's fulfillment record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InboxError {
    /// Calling `getFulfillmentInfo` failed.
    #[error("reading fulfillment info: {0}")]
    Call(#[source] ChainClientError),

    /// The `getFulfillmentInfo` return data could not be decoded.
    #[error("decoding fulfillment info: {0}")]
    Decode(String),

    /// The inbox has no fulfillment recorded for the message.
    #[error("message {0} has not been fulfilled")]
    NotFulfilled(B256),
}

/// Errors looking up the posted message a claim is made for.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClaimError {
    /// Fetching `MessagePosted` logs failed.
    #[error("fetching posted message logs: {0}")]
    Logs(#[source] ChainClientError),

    /// No outbox emitted the message in the searched range.
    #[error("message {0} not found on the source chain")]
    MessageNotFound(B256),

    /// The matching log is not a valid `MessagePosted` event.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}
