//! Common CLI flags.

mod log;
pub use log::LogArgs;

mod metrics;
pub use metrics::MetricsArgs;
