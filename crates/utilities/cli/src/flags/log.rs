//! Arguments for logging.

use std::path::PathBuf;

use clap::{ArgAction, Args};
use serde::{Deserialize, Serialize};

use crate::{LogFormat, LogRotation};

/// Global logging arguments.
#[derive(Args, Debug, Default, Serialize, Deserialize, Clone)]
pub struct LogArgs {
    /// Verbosity level (1-5). Defaults to 3 (info).
    ///
    /// Shared by stdout and file logging.
    #[arg(
        short = 'v',
        global = true,
        default_value = "3",
        env = "FILLER_LOG_LEVEL",
        action = ArgAction::Count,
    )]
    pub level: u8,
    /// If set, no logs are printed to stdout.
    #[arg(
        long = "log.stdout.quiet",
        short = 'q',
        global = true,
        default_value = "false",
        env = "FILLER_LOG_STDOUT_QUIET"
    )]
    pub stdout_quiet: bool,
    /// The format of the logs printed to stdout. One of: full, json, pretty, compact.
    #[arg(
        long = "log.stdout.format",
        global = true,
        default_value = "full",
        env = "FILLER_LOG_STDOUT_FORMAT"
    )]
    pub stdout_format: LogFormat,
    /// The directory to store the log files in. If not set, no logs are written to files.
    #[arg(long = "log.file.directory", global = true, env = "FILLER_LOG_FILE_DIRECTORY")]
    pub file_directory: Option<PathBuf>,
    /// The format of the logs written to files. One of: full, json, pretty, compact.
    #[arg(
        long = "log.file.format",
        global = true,
        default_value = "full",
        env = "FILLER_LOG_FILE_FORMAT"
    )]
    pub file_format: LogFormat,
    /// The rotation of the log files. One of: minutely, hourly, daily, never.
    #[arg(
        long = "log.file.rotation",
        global = true,
        default_value = "daily",
        env = "FILLER_LOG_FILE_ROTATION"
    )]
    pub file_rotation: LogRotation,
}
