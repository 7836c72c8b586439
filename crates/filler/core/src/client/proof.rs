//! The `eth_getProof` response, with proof nodes and values kept as the node returned them.
//!
//! Some nodes return odd-length or unprefixed hex, so the strings are decoded leniently by the
//! prover rather than by serde.

use alloy_primitives::{Address, B256};
use serde::{Deserialize, Serialize};

/// Account proof returned by `eth_getProof`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAccountProof {
    /// Proven account.
    pub address: Address,
    /// Merkle-Patricia nodes from the state root to the account.
    #[serde(default)]
    pub account_proof: Vec<String>,
    /// Storage root of the account.
    #[serde(default)]
    pub storage_hash: B256,
    /// One entry per requested storage key.
    #[serde(default)]
    pub storage_proof: Vec<RawStorageProof>,
}

/// Storage proof of a single slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawStorageProof {
    /// Requested slot.
    pub key: String,
    /// Slot value, hex quantity.
    pub value: String,
    /// Merkle-Patricia nodes from the storage root to the slot.
    #[serde(default)]
    pub proof: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_get_proof_response() {
        let json = r#"{
            "address": "0x1bb8dacba30b1cd82ce1d3d7f24e16ee549aebe8",
            "accountProof": ["0xf90211a01643f30c6975912b99246fe648654aefeb0ef560685615c13758ce99bc7a5acf"],
            "balance": "0x0",
            "codeHash": "0xc5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470",
            "nonce": "0x1",
            "storageHash": "0x56e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421",
            "storageProof": [{
                "key": "0xc8d3d25a93f51f19c8ccc231e6bd32c5e3cde64a1e819275035a770b9bf96282",
                "value": "0xe4a3711462d371a7736f26b5f83150f907c4e8ef000000000000000067d2a8ee",
                "proof": ["0xe2a0", "0x1"]
            }]
        }"#;

        let proof: RawAccountProof = serde_json::from_str(json).unwrap();
        assert_eq!(proof.account_proof.len(), 1);
        assert_eq!(proof.storage_proof.len(), 1);
        assert_eq!(proof.storage_proof[0].proof, vec!["0xe2a0".to_string(), "0x1".to_string()]);
    }
}
