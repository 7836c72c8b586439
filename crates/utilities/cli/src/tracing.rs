//! [tracing_subscriber] utilities.

use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;
use tracing_appender::rolling;
use tracing_subscriber::{
    EnvFilter, Layer,
    filter::Directive,
    prelude::__tracing_subscriber_SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
};

use crate::{LogConfig, LogRotation};

/// Transport and RPC dependencies capped at `warn` when `RUST_LOG` is unset.
pub const QUIET_TARGETS: [&str; 5] =
    ["hyper", "hyper_util", "reqwest", "alloy_transport_http", "alloy_rpc_client"];

/// Builds the subscriber filter for `level`.
///
/// With `rust_log` set, its directives are used as given. Otherwise [`QUIET_TARGETS`] are capped
/// at `warn`. The global level is added in both cases.
pub fn filler_env_filter(level: LevelFilter, rust_log: Option<&str>) -> EnvFilter {
    let Some(rust_log) = rust_log else {
        let quiet = level.min(LevelFilter::WARN);
        return QUIET_TARGETS
            .iter()
            .filter_map(|target| format!("{target}={quiet}").parse::<Directive>().ok())
            .fold(EnvFilter::default().add_directive(level.into()), EnvFilter::add_directive);
    };
    EnvFilter::builder().parse_lossy(rust_log).add_directive(level.into())
}

/// The format of the logs.
#[derive(
    Default, Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[clap(rename_all = "lowercase")]
pub enum LogFormat {
    /// Full format (default).
    #[default]
    Full,
    /// JSON format.
    Json,
    /// Pretty format.
    Pretty,
    /// Compact format.
    Compact,
}

impl LogConfig {
    /// Installs the global tracing subscriber: stdout and file layers per this configuration,
    /// filtered by `env_filter` with the global level added as a directive, or by
    /// [`filler_env_filter`] when none is given.
    pub fn init_tracing_subscriber(
        &self,
        env_filter: Option<EnvFilter>,
    ) -> Result<(), TryInitError> {
        let file_layer = self.file_logs.as_ref().map(|file_logs| {
            let directory = file_logs.directory_path.clone();
            let file_name = file_logs.file_name.as_str();

            let appender = match file_logs.rotation {
                LogRotation::Minutely => rolling::minutely(directory, file_name),
                LogRotation::Hourly => rolling::hourly(directory, file_name),
                LogRotation::Daily => rolling::daily(directory, file_name),
                LogRotation::Never => rolling::never(directory, file_name),
            };

            match file_logs.format {
                LogFormat::Full => tracing_subscriber::fmt::layer().with_writer(appender).boxed(),
                LogFormat::Json => {
                    tracing_subscriber::fmt::layer().json().with_writer(appender).boxed()
                }
                LogFormat::Pretty => {
                    tracing_subscriber::fmt::layer().pretty().with_writer(appender).boxed()
                }
                LogFormat::Compact => {
                    tracing_subscriber::fmt::layer().compact().with_writer(appender).boxed()
                }
            }
        });

        let stdout_layer = self.stdout_logs.as_ref().map(|stdout_logs| match stdout_logs.format {
            LogFormat::Full => tracing_subscriber::fmt::layer().boxed(),
            LogFormat::Json => tracing_subscriber::fmt::layer().json().boxed(),
            LogFormat::Pretty => tracing_subscriber::fmt::layer().pretty().boxed(),
            LogFormat::Compact => tracing_subscriber::fmt::layer().compact().boxed(),
        });

        let env_filter = match env_filter {
            Some(filter) => filter.add_directive(self.global_level.into()),
            None => filler_env_filter(
                self.global_level,
                std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref(),
            ),
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(file_layer)
            .with(stdout_layer)
            .try_init()?;

        Ok(())
    }
}

/// Installs a debug-level subscriber for tests. Ignores an already installed subscriber.
pub fn init_test_tracing() {
    let config = LogConfig { global_level: LevelFilter::DEBUG, ..Default::default() };
    let _ = config.init_tracing_subscriber(None);
}
