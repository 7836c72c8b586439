//! Proofs that an RRC-7755 message was fulfilled on a destination rollup.
//!
//! A [`ProofBundle`] nests three proofs: the L1 execution state root, the destination rollup's
//! confirmed assertion in L1 storage, and the inbox's fulfillment record in L2 storage. The
//! [`ProofComposer`] produces them in that order.
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod claim;
pub use claim::{build_claim_call, find_posted_message};

mod composer;
pub use composer::ProofComposer;

mod error;
pub use error::{ClaimError, InboxError, L1ProofError, ProverError, RollupProofError, StorageProofError};

mod hex;
pub use hex::safe_hex_decode;

mod inbox;
pub use inbox::fulfillment_info;

mod l1;
pub use l1::{L1StateCapture, L1StateProver};

pub mod rollup;
pub use rollup::{ArbitrumStateProver, RollupStateProof, RollupStateProver};

mod storage;
pub use storage::{FULFILLMENT_INFO_SLOT, StorageProver, mapping_slot};

mod types;
pub use types::{
    AssertionStateData, GlobalStateData, L1StateProof, MachineStatus, ProofBundle,
    RollupAssertion, StorageProofParams,
};
