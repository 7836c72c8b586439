//! Prometheus metrics arguments.

use std::net::{IpAddr, Ipv4Addr};

use clap::Args;
use serde::{Deserialize, Serialize};

use crate::init_prometheus_server;

/// Configuration for Prometheus metrics.
#[derive(Args, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[command(next_help_heading = "Metrics")]
pub struct MetricsArgs {
    /// Controls whether Prometheus metrics are enabled. Disabled by default.
    #[arg(
        long = "metrics.enabled",
        global = true,
        default_value_t = false,
        env = "FILLER_METRICS_ENABLED"
    )]
    pub enabled: bool,

    /// The interval for process metrics collection in seconds.
    #[arg(
        long = "metrics.interval",
        global = true,
        default_value = "30",
        env = "FILLER_METRICS_INTERVAL"
    )]
    pub interval: u64,

    /// The port to serve Prometheus metrics on.
    #[arg(
        id = "metrics_port",
        long = "metrics.port",
        global = true,
        default_value = "9090",
        env = "FILLER_METRICS_PORT"
    )]
    pub port: u16,

    /// The IP address to serve Prometheus metrics on.
    #[arg(
        long = "metrics.addr",
        global = true,
        default_value = "0.0.0.0",
        env = "FILLER_METRICS_ADDR"
    )]
    pub addr: IpAddr,
}

impl Default for MetricsArgs {
    fn default() -> Self {
        Self { enabled: false, interval: 30, port: 9090, addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED) }
    }
}

impl MetricsArgs {
    /// Installs the Prometheus recorder and starts serving metrics, if enabled.
    pub fn init_metrics(&self) -> Result<(), metrics_exporter_prometheus::BuildError> {
        if self.enabled {
            init_prometheus_server(self.addr, self.port, self.interval)?;
        }
        Ok(())
    }
}
