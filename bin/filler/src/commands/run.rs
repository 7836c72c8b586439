//! Run Subcommand

use crate::flags::{ConfigArgs, GlobalArgs};
use anyhow::Result;
use clap::Parser;
use filler_cli::LogConfig;
use filler_core::Topology;
use filler_service::Service;
use tracing::{error, info};

/// The `run` Subcommand
///
/// Watches every configured outbox and fulfills posted messages until interrupted.
///
/// # Usage
///
/// ```sh
/// filler run --config filler.toml
/// ```
#[derive(Parser, Default, PartialEq, Eq, Debug, Clone)]
#[command(about = "Runs the filler service.")]
pub struct RunCommand {
    /// Configuration file.
    #[command(flatten)]
    pub config: ConfigArgs,
    /// Overrides the configured fulfillment topology. One of: single, per-destination.
    #[arg(long = "fulfillment.topology", env = "FILLER_FULFILLMENT_TOPOLOGY")]
    pub topology: Option<Topology>,
}

impl RunCommand {
    /// Initializes the logging system based on global arguments.
    pub fn init_logs(&self, args: &GlobalArgs) -> Result<()> {
        LogConfig::new(args.log_args.clone())
            .for_command("run")
            .init_tracing_subscriber(None)?;
        Ok(())
    }

    /// Runs the filler service until it stops or Ctrl-C is received, then shuts it down.
    pub async fn run(&self, _args: &GlobalArgs) -> Result<()> {
        let mut config = self.config.load()?;
        if let Some(topology) = self.topology {
            config.fulfillment.topology = topology;
        }

        let mut service = Service::connect(&config).await?;
        service.initialise()?;

        tokio::select! {
            res = service.run() => {
                if let Err(err) = res {
                    error!(target: "filler::cli", %err, "Error running filler service");
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!(target: "filler::cli", "Ctrl+C received, initiating service shutdown...");
            }
        }

        service.shutdown().await?;
        info!(target: "filler::cli", "Filler service shut down gracefully.");
        Ok(())
    }
}
