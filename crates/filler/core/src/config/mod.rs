//! Filler configuration, loaded from a TOML file.

mod chain;
pub use chain::ChainEndpoint;

mod wallet;
pub use wallet::WalletConfig;

mod filler;
pub use filler::{FillerConfig, FulfillmentConfig, ProverConfig, Topology};

mod error;
pub use error::ConfigError;
