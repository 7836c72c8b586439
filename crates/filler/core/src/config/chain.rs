use alloy_primitives::{Address, B256};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Static configuration of a single chain the filler talks to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ChainEndpoint {
    /// Numeric chain id. Checked against the node at startup.
    pub chain_id: u64,

    /// JSON-RPC endpoint of the chain's node.
    pub node_url: String,

    /// Accept invalid TLS certificates from the node.
    #[serde(default)]
    pub node_insecure_skip_verify: bool,

    /// Outboxes watched for posted messages, keyed by a display name.
    #[serde(default)]
    pub outbox_addresses: BTreeMap<String, Address>,

    /// Inbox receiving direct-call fulfillments.
    #[serde(default)]
    pub inbox_address: Address,

    /// ERC-4337 entrypoint receiving user-operation fulfillments.
    #[serde(default)]
    pub entrypoint_address: Address,

    /// Contract on L1 holding this chain's state commitments.
    #[serde(default)]
    pub l2_oracle: Address,

    /// Mapping slot of the oracle's state commitments. Zero if the chain is never proven.
    #[serde(default)]
    pub l2_oracle_storage_key: B256,
}

impl ChainEndpoint {
    /// Returns `true` if `address` is one of the configured outboxes.
    pub fn is_outbox(&self, address: &Address) -> bool {
        self.outbox_addresses.values().any(|outbox| outbox == address)
    }

    /// Display name of an outbox address, if configured.
    pub fn outbox_name(&self, address: &Address) -> Option<&str> {
        self.outbox_addresses
            .iter()
            .find_map(|(name, outbox)| (outbox == address).then_some(name.as_str()))
    }
}
