//! Global arguments shared by every subcommand.

use clap::Parser;
use filler_cli::{LogArgs, MetricsArgs};

/// Global arguments for the CLI.
#[derive(Parser, Default, Clone, Debug)]
pub struct GlobalArgs {
    /// Logging arguments.
    #[command(flatten)]
    pub log_args: LogArgs,
    /// Prometheus metrics arguments.
    #[command(flatten)]
    pub metrics: MetricsArgs,
}
