//! The chain registry: a connection handle and static configuration per chain id.

use crate::{
    client::{ChainClientError, ChainReader, NodeClient},
    config::ChainEndpoint,
};
use std::{collections::HashMap, sync::Arc};
use thiserror::Error;
use tracing::info;

/// A configured chain and its client.
#[derive(Debug)]
pub struct ChainHandle<C> {
    /// Static configuration.
    pub endpoint: ChainEndpoint,
    /// Connection to the chain's node.
    pub client: Arc<C>,
}

impl<C> Clone for ChainHandle<C> {
    fn clone(&self) -> Self {
        Self { endpoint: self.endpoint.clone(), client: Arc::clone(&self.client) }
    }
}

/// Errors raised while building the registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// The node could not be reached or built.
    #[error("connecting to chain {chain_id}: {source}")]
    Client {
        /// Configured chain id.
        chain_id: u64,
        /// The client error.
        #[source]
        source: ChainClientError,
    },

    /// The node serves a different chain than configured.
    #[error("chain id mismatch, want: {expected}, got: {actual}")]
    ChainIdMismatch {
        /// Configured chain id.
        expected: u64,
        /// Chain id reported by the node.
        actual: u64,
    },

    /// The chain id is registered twice.
    #[error("chain {0} is already registered")]
    Duplicate(u64),
}

/// Read-only lookup of chains by id. Built once at startup and shared behind an [`Arc`].
#[derive(Debug)]
pub struct ChainRegistry<C> {
    chains: HashMap<u64, ChainHandle<C>>,
}

impl<C> Default for ChainRegistry<C> {
    fn default() -> Self {
        Self { chains: HashMap::new() }
    }
}

impl<C> ChainRegistry<C> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a chain without contacting its node.
    pub fn insert(&mut self, endpoint: ChainEndpoint, client: Arc<C>) -> Result<(), RegistryError> {
        let chain_id = endpoint.chain_id;
        if self.chains.contains_key(&chain_id) {
            return Err(RegistryError::Duplicate(chain_id));
        }
        self.chains.insert(chain_id, ChainHandle { endpoint, client });
        Ok(())
    }

    /// Looks up a chain.
    pub fn get(&self, chain_id: u64) -> Option<&ChainHandle<C>> {
        self.chains.get(&chain_id)
    }

    /// Looks up a chain's configuration.
    pub fn endpoint(&self, chain_id: u64) -> Option<&ChainEndpoint> {
        self.get(chain_id).map(|handle| &handle.endpoint)
    }

    /// Looks up a chain's client.
    pub fn client(&self, chain_id: u64) -> Option<&Arc<C>> {
        self.get(chain_id).map(|handle| &handle.client)
    }

    /// Registered chain ids.
    pub fn chain_ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.chains.keys().copied()
    }

    /// All registered chains.
    pub fn iter(&self) -> impl Iterator<Item = &ChainHandle<C>> {
        self.chains.values()
    }

    /// Number of registered chains.
    pub fn len(&self) -> usize {
        self.chains.len()
    }

    /// Returns `true` if no chain is registered.
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}

impl<C: ChainReader> ChainRegistry<C> {
    /// Registers a chain after checking that its node serves the configured chain id.
    pub async fn insert_verified(
        &mut self,
        endpoint: ChainEndpoint,
        client: Arc<C>,
    ) -> Result<(), RegistryError> {
        let expected = endpoint.chain_id;
        let actual = client
            .chain_id()
            .await
            .map_err(|source| RegistryError::Client { chain_id: expected, source })?;
        if actual != expected {
            return Err(RegistryError::ChainIdMismatch { expected, actual });
        }

        info!(target: "filler::registry", chain_id = expected, node = %endpoint.node_url, "Connected to chain");
        self.insert(endpoint, client)
    }
}

impl ChainRegistry<NodeClient> {
    /// Connects to every configured chain.
    pub async fn connect<'a>(
        endpoints: impl IntoIterator<Item = &'a ChainEndpoint>,
    ) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for endpoint in endpoints {
            let client = NodeClient::from_endpoint(endpoint)
                .map_err(|source| RegistryError::Client { chain_id: endpoint.chain_id, source })?;
            registry.insert_verified(endpoint.clone(), Arc::new(client)).await?;
        }
        Ok(registry)
    }
}
