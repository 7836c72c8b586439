//! Utilities for spinning up a Prometheus metrics server.

use std::{
    net::{IpAddr, SocketAddr},
    thread::{self, sleep},
    time::Duration,
};

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use metrics_process::Collector;
use tracing::info;

/// Installs the Prometheus recorder with an HTTP listener on `addr:port` and collects process
/// metrics (CPU, memory, ...) every `interval` seconds.
pub fn init_prometheus_server(addr: IpAddr, port: u16, interval: u64) -> Result<(), BuildError> {
    let prometheus_addr = SocketAddr::from((addr, port));
    PrometheusBuilder::new().with_http_listener(prometheus_addr).install()?;

    let collector = Collector::default();
    collector.describe();

    thread::spawn(move || {
        loop {
            collector.collect();
            sleep(Duration::from_secs(interval));
        }
    });

    info!(target: "filler::cli", addr = %prometheus_addr, "Serving metrics");
    Ok(())
}
