//! Contains the filler CLI.

use crate::{
    commands::{ProveCommand, RunCommand, SendTestCommand},
    flags::GlobalArgs,
    metrics::VersionInfo,
    version,
};
use anyhow::Result;
use clap::{Parser, Subcommand};
use filler_cli::cli_styles;
use tokio_util::sync::CancellationToken;

/// Subcommands for the CLI.
#[derive(Debug, PartialEq, Eq, Clone, Subcommand)]
pub enum Commands {
    /// Runs the filler service.
    #[command(alias = "r")]
    Run(RunCommand),
    /// Proves the fulfillment of a message.
    #[command(alias = "p")]
    Prove(ProveCommand),
    /// Sends a test transfer from the relayer wallet.
    SendTest(SendTestCommand),
}

/// The filler CLI.
#[derive(Parser, Clone, Debug)]
#[command(
    author,
    version = version::SHORT_VERSION,
    long_version = version::LONG_VERSION,
    about,
    styles = cli_styles(),
    long_about = None
)]
pub struct Cli {
    /// The subcommand to run.
    #[command(subcommand)]
    pub subcommand: Commands,
    /// Global arguments for the CLI.
    #[command(flatten)]
    pub global: GlobalArgs,
}

impl Cli {
    /// Runs the CLI.
    pub fn run(self) -> Result<()> {
        self.global.metrics.init_metrics()?;
        if self.global.metrics.enabled {
            VersionInfo::from_build().register_version_metrics();
        }

        match self.subcommand {
            Commands::Run(ref run) => run.init_logs(&self.global)?,
            Commands::Prove(ref prove) => prove.init_logs(&self.global)?,
            Commands::SendTest(ref send_test) => send_test.init_logs(&self.global)?,
        }

        let rt = Self::tokio_runtime()?;
        match self.subcommand {
            // The service handles Ctrl-C itself so it can shut its actors down.
            Commands::Run(run) => rt.block_on(run.run(&self.global)),
            Commands::Prove(prove) => {
                let cancel = CancellationToken::new();
                let guard = cancel.clone();
                rt.block_on(async move {
                    tokio::select! {
                        res = prove.run(&self.global, cancel) => res,
                        _ = tokio::signal::ctrl_c() => {
                            guard.cancel();
                            tracing::info!(target: "filler::cli", "Received Ctrl-C, aborting proof");
                            Ok(())
                        }
                    }
                })
            }
            Commands::SendTest(send_test) => {
                Self::run_until_ctrl_c(&rt, send_test.run(&self.global))
            }
        }
    }

    /// Run until ctrl-c is pressed.
    pub fn run_until_ctrl_c<F>(rt: &tokio::runtime::Runtime, fut: F) -> Result<()>
    where
        F: std::future::Future<Output = Result<()>>,
    {
        rt.block_on(async move {
            tokio::select! {
                res = fut => res,
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!(target: "filler::cli", "Received Ctrl-C, shutting down...");
                    Ok(())
                }
            }
        })
    }

    /// Creates a new default tokio multi-thread [Runtime](tokio::runtime::Runtime) with all
    /// features enabled
    pub fn tokio_runtime() -> Result<tokio::runtime::Runtime, std::io::Error> {
        tokio::runtime::Builder::new_multi_thread().enable_all().build()
    }
}
