//! Shared CLI utilities of the RRC-7755 filler: log and metrics flags, the tracing subscriber and
//! the Prometheus exporter.
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod flags;
pub use flags::{LogArgs, MetricsArgs};

mod logs;
pub use logs::{DEFAULT_LOG_FILE_NAME, FileLogConfig, LogConfig, LogRotation, StdoutLogConfig};

mod tracing;
pub use self::tracing::{LogFormat, QUIET_TARGETS, filler_env_filter, init_test_tracing};

mod prometheus;
pub use prometheus::init_prometheus_server;

mod styles;
pub use styles::cli_styles;
