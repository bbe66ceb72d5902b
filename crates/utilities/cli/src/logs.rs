//! Logging Configuration Types

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;

use crate::LogFormat;

/// The rotation of the log files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum, Default)]
#[serde(rename_all = "lowercase")]
#[clap(rename_all = "lowercase")]
pub enum LogRotation {
    /// Rotate the log files every minute.
    Minutely,
    /// Rotate the log files hourly.
    Hourly,
    /// Rotate the log files daily.
    Daily,
    /// Do not rotate the log files.
    #[default]
    Never,
}

/// Configuration for file logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLogConfig {
    /// The path to the directory where the log files are stored.
    pub directory_path: PathBuf,
    /// The format of the logs printed to the log file.
    pub format: LogFormat,
    /// The rotation of the log files.
    pub rotation: LogRotation,
}

/// Configuration for stdout logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StdoutLogConfig {
    /// The format of the logs printed to stdout.
    pub format: LogFormat,
}

/// Global configuration for logging.
/// Default is to only print logs to stdout in full format.
#[derive(Debug, Clone, PartialEq, Eq)]
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

impl LogConfig {
    /// Maps a `-v` style verbosity count to a level filter.
    ///
    /// `0` silences everything, `1` is errors only and anything above `4` is trace.
    pub const fn level_from_verbosity(verbosity: u8) -> LevelFilter {
        match verbosity {
            0 => LevelFilter::OFF,
            1 => LevelFilter::ERROR,
            2 => LevelFilter::WARN,
            3 => LevelFilter::INFO,
            4 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }

    /// Returns the config with the global level derived from a verbosity count.
    pub const fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.global_level = Self::level_from_verbosity(verbosity);
        self
    }

    /// Returns the config with stdout logging set to the given format, or disabled.
    pub const fn with_stdout(mut self, format: Option<LogFormat>) -> Self {
        self.stdout_logs = match format {
            Some(format) => Some(StdoutLogConfig { format }),
            None => None,
        };
        self
    }

    /// Returns the config with rolling file logs written to `directory_path`.
    pub fn with_file_logs(
        mut self,
        directory_path: impl Into<PathBuf>,
        format: LogFormat,
        rotation: LogRotation,
    ) -> Self {
        self.file_logs =
            Some(FileLogConfig { directory_path: directory_path.into(), format, rotation });
        self
    }
}
