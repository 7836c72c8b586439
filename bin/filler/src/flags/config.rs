//! The configuration file flag.

use anyhow::{Context, Result};
use clap::Args;
use filler_core::FillerConfig;
use std::path::PathBuf;
use tracing::info;

/// Location of the filler's TOML configuration.
#[derive(Args, Default, PartialEq, Eq, Debug, Clone)]
pub struct ConfigArgs {
    /// Path to the TOML configuration file.
    #[arg(long = "config", short = 'c', env = "FILLER_CONFIG")]
    pub config: PathBuf,
}

impl ConfigArgs {
    /// Loads and validates the configuration file.
    pub fn load(&self) -> Result<FillerConfig> {
        let config = FillerConfig::load(&self.config)
            .with_context(|| format!("failed to load config from {}", self.config.display()))?;
        info!(
            target: "filler::cli",
            path = %self.config.display(),
            chains = config.chains.len(),
            "Loaded configuration"
        );
        Ok(config)
    }
}
