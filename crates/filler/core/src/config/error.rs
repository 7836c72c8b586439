use alloy_primitives::Address;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating the filler configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("reading config file {path}: {source}")]
    Io {
        /// The path that failed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML or does not match the schema.
    #[error("parsing config: {0}")]
    Parse(#[from] toml::de::Error),

    /// No chains are configured.
    #[error("no chains configured")]
    NoChains,

    /// Two chain entries share a chain id.
    #[error("duplicate chain id: {0}")]
    DuplicateChainId(u64),

    /// The wallet's private key could not be parsed.
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// The private key does not derive the configured from-address.
    #[error("wallet from-address mismatch, want: {expected}, got: {actual}")]
    FromAddressMismatch {
        /// Configured address.
        expected: Address,
        /// Address derived from the key.
        actual: Address,
    },

    /// The fulfillment queue capacity is zero.
    #[error("fulfillment queue capacity must be positive")]
    ZeroQueueCapacity,

    /// The prover's L1 chain is not among the configured chains.
    #[error("prover l1 chain is not configured: {0}")]
    UnknownL1Chain(u64),

    /// An unrecognised topology name.
    #[error("unknown fulfillment topology: {0}")]
    UnknownTopology(String),
}

impl PartialEq for ConfigError {
    fn eq(&self, other: &Self) -> bool {
        use ConfigError::*;
        match (self, other) {
            (Io { path: a, source: sa }, Io { path: b, source: sb }) => {
                a == b && sa.kind() == sb.kind()
            }
            (Parse(a), Parse(b)) => a == b,
            (NoChains, NoChains) | (ZeroQueueCapacity, ZeroQueueCapacity) => true,
            (DuplicateChainId(a), DuplicateChainId(b)) | (UnknownL1Chain(a), UnknownL1Chain(b)) => {
                a == b
            }
            (InvalidPrivateKey(a), InvalidPrivateKey(b)) | (UnknownTopology(a), UnknownTopology(b)) => {
                a == b
            }
            (
                FromAddressMismatch { expected: ea, actual: aa },
                FromAddressMismatch { expected: eb, actual: ab },
            ) => ea == eb && aa == ab,
            _ => false,
        }
    }
}

impl Eq for ConfigError {}
