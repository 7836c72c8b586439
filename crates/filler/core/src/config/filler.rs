use super::{ChainEndpoint, ConfigError, WalletConfig};
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeMap, HashSet},
    fmt,
    path::Path,
    str::FromStr,
    time::Duration,
};

/// Top-level filler configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FillerConfig {
    /// Chains keyed by a display name.
    pub chains: BTreeMap<String, ChainEndpoint>,

    /// Relayer wallet.
    pub wallets: WalletConfig,

    /// Fulfillment runtime settings.
    #[serde(default)]
    pub fulfillment: FulfillmentConfig,

    /// Proof composition settings. Only required by `prove`.
    #[serde(default)]
    pub prover: Option<ProverConfig>,
}

impl FillerConfig {
    /// Reads, parses and validates the configuration file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        contents.parse()
    }

    /// Checks the cross-field constraints of a parsed configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chains.is_empty() {
            return Err(ConfigError::NoChains);
        }

        let mut seen = HashSet::with_capacity(self.chains.len());
        for endpoint in self.chains.values() {
            if !seen.insert(endpoint.chain_id) {
                return Err(ConfigError::DuplicateChainId(endpoint.chain_id));
            }
        }

        if self.fulfillment.queue_capacity == 0 {
            return Err(ConfigError::ZeroQueueCapacity);
        }

        if let Some(prover) = &self.prover &&
            !seen.contains(&prover.l1_chain_id)
        {
            return Err(ConfigError::UnknownL1Chain(prover.l1_chain_id));
        }

        self.wallets.verified_signer().map(|_| ())
    }

    /// Looks up a chain by id.
    pub fn chain(&self, chain_id: u64) -> Option<&ChainEndpoint> {
        self.chains.values().find(|endpoint| endpoint.chain_id == chain_id)
    }
}

impl FromStr for FillerConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}

/// How posted messages are spread over fulfillment consumers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Topology {
    /// One consumer for every destination.
    #[default]
    Single,
    /// One consumer per destination chain, fed by a dispatcher.
    PerDestination,
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => f.write_str("single"),
            Self::PerDestination => f.write_str("per-destination"),
        }
    }
}

impl FromStr for Topology {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(Self::Single),
            "per-destination" => Ok(Self::PerDestination),
            other => Err(ConfigError::UnknownTopology(other.to_string())),
        }
    }
}

/// Fulfillment runtime settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct FulfillmentConfig {
    /// Capacity of every message queue.
    pub queue_capacity: usize,
    /// Interval between log filter polls, in milliseconds.
    pub poll_interval_ms: u64,
    /// Consumer topology.
    pub topology: Topology,
}

impl FulfillmentConfig {
    /// Default queue capacity.
    pub const DEFAULT_QUEUE_CAPACITY: usize = 10;
    /// Default poll interval.
    pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2_000;

    /// The poll interval as a [`Duration`].
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for FulfillmentConfig {
    fn default() -> Self {
        Self {
            queue_capacity: Self::DEFAULT_QUEUE_CAPACITY,
            poll_interval_ms: Self::DEFAULT_POLL_INTERVAL_MS,
            topology: Topology::Single,
        }
    }
}

/// Proof composition settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ProverConfig {
    /// Chain id of the settlement layer.
    pub l1_chain_id: u64,
    /// Whether the L1 is a devnet without a beacon chain.
    #[serde(default)]
    pub devnet: bool,
    /// How many L1 blocks back to search for the confirmed assertion.
    #[serde(default = "ProverConfig::default_assertion_lookback_blocks")]
    pub assertion_lookback_blocks: u64,
}

impl ProverConfig {
    /// Default assertion look-back window.
    pub const DEFAULT_ASSERTION_LOOKBACK_BLOCKS: u64 = 100_000;

    const fn default_assertion_lookback_blocks() -> u64 {
        Self::DEFAULT_ASSERTION_LOOKBACK_BLOCKS
    }
}
