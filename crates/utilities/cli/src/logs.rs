//! Logging configuration types.

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;

use crate::{LogArgs, LogFormat};

/// Log file name used when no subcommand names its own.
pub const DEFAULT_LOG_FILE_NAME: &str = "filler.log";

/// The rotation of the log files. Defaults to daily.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    /// Rotate the log files every minute.
    Minutely,
    /// Rotate the log files hourly.
    Hourly,
    /// Rotate the log files daily.
    #[default]
    Daily,
    /// Do not rotate the log files.
    Never,
}

/// Configuration for file logging.
#[derive(Debug, Clone)]
pub struct FileLogConfig {
    /// The directory the log files are written to.
    pub directory_path: PathBuf,
    /// Base name of the log files. The rotation appends the date.
    pub file_name: String,
    /// The format of the logs written to the log file.
    pub format: LogFormat,
    /// The rotation of the log files.
    pub rotation: LogRotation,
}

/// Configuration for stdout logging.
#[derive(Debug, Clone)]
pub struct StdoutLogConfig {
    /// The format of the logs printed to stdout.
    pub format: LogFormat,
}

/// Global configuration for logging.
/// Default is to only print logs to stdout in full format.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Global verbosity level for logging.
    pub global_level: LevelFilter,
    /// The configuration for stdout logging.
    pub stdout_logs: Option<StdoutLogConfig>,
    /// The configuration for file logging.
    pub file_logs: Option<FileLogConfig>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            global_level: LevelFilter::INFO,
            stdout_logs: Some(StdoutLogConfig { format: LogFormat::Full }),
            file_logs: None,
        }
    }
}

impl From<LogArgs> for LogConfig {
    fn from(args: LogArgs) -> Self {
        Self::new(args)
    }
}

impl LogConfig {
    /// Creates a new `LogConfig` from `LogArgs`.
    pub fn new(args: LogArgs) -> Self {
        let level = match args.level {
            0 => LevelFilter::OFF,
            1 => LevelFilter::ERROR,
            2 => LevelFilter::WARN,
            3 => LevelFilter::INFO,
            4 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        };

        let stdout_logs =
            (!args.stdout_quiet).then_some(StdoutLogConfig { format: args.stdout_format });

        let file_logs = args.file_directory.map(|directory_path| FileLogConfig {
            directory_path,
            file_name: DEFAULT_LOG_FILE_NAME.to_string(),
            format: args.file_format,
            rotation: args.file_rotation,
        });

        Self { global_level: level, stdout_logs, file_logs }
    }

    /// Names the log files after `command`, e.g. `filler-run.log`.
    pub fn for_command(mut self, command: &str) -> Self {
        if let Some(file_logs) = self.file_logs.as_mut() {
            file_logs.file_name = format!("filler-{command}.log");
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::off(0, LevelFilter::OFF)]
    #[case::error(1, LevelFilter::ERROR)]
    #[case::warn(2, LevelFilter::WARN)]
    #[case::info(3, LevelFilter::INFO)]
    #[case::debug(4, LevelFilter::DEBUG)]
    #[case::trace(5, LevelFilter::TRACE)]
    fn test_verbosity_to_level(#[case] level: u8, #[case] expected: LevelFilter) {
        let config = LogConfig::new(LogArgs { level, ..Default::default() });
        assert_eq!(config.global_level, expected);
    }

    #[test]
    fn test_quiet_disables_stdout() {
        let config = LogConfig::new(LogArgs { stdout_quiet: true, ..Default::default() });
        assert!(config.stdout_logs.is_none());
    }

    #[test]
    fn test_file_logs() {
        let config = LogConfig::new(LogArgs {
            file_directory: Some(PathBuf::from("/tmp/filler")),
            file_format: LogFormat::Json,
            ..Default::default()
        });
        let file_logs = config.file_logs.unwrap();
        assert_eq!(file_logs.directory_path, PathBuf::from("/tmp/filler"));
        assert_eq!(file_logs.file_name, DEFAULT_LOG_FILE_NAME);
        assert_eq!(file_logs.format, LogFormat::Json);
        assert_eq!(file_logs.rotation, LogRotation::Daily);
    }

    #[rstest]
    #[case::run("run", "filler-run.log")]
    #[case::prove("prove", "filler-prove.log")]
    #[case::send_test("send-test", "filler-send-test.log")]
    fn test_file_name_per_command(#[case] command: &str, #[case] expected: &str) {
        let config = LogConfig::new(LogArgs {
            file_directory: Some(PathBuf::from("/var/log/filler")),
            ..Default::default()
        })
        .for_command(command);
        assert_eq!(config.file_logs.unwrap().file_name, expected);
    }

    #[test]
    fn test_for_command_without_file_logs() {
        let config = LogConfig::new(LogArgs::default()).for_command("run");
        assert!(config.file_logs.is_none());
    }
}
