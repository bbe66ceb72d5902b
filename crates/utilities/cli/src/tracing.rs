//! [tracing_subscriber] utilities.

use serde::{Deserialize, Serialize};
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::{
    EnvFilter, Layer,
    prelude::__tracing_subscriber_SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
};

use crate::{LogConfig, LogRotation};

/// The file name prefix of rolling log files.
pub const LOG_FILE_NAME: &str = "loam.log";

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

impl LogRotation {
    /// Builds the rolling appender for this rotation policy.
    fn appender(self, directory: &std::path::Path) -> RollingFileAppender {
        match self {
            Self::Minutely => tracing_appender::rolling::minutely(directory, LOG_FILE_NAME),
            Self::Hourly => tracing_appender::rolling::hourly(directory, LOG_FILE_NAME),
            Self::Daily => tracing_appender::rolling::daily(directory, LOG_FILE_NAME),
            Self::Never => tracing_appender::rolling::never(directory, LOG_FILE_NAME),
        }
    }
}

impl LogConfig {
    /// Initializes the global tracing subscriber.
    ///
    /// The `env_filter` defaults to `RUST_LOG`; the configured global level is always added as a
    /// directive on top of it. Fails if a global subscriber is already installed.
    pub fn init_tracing_subscriber(
        &self,
        env_filter: Option<EnvFilter>,
    ) -> Result<(), TryInitError> {
        let file_layer = self.file_logs.as_ref().map(|file_logs| {
            let appender = file_logs.rotation.appender(&file_logs.directory_path);

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

        let env_filter = env_filter
            .unwrap_or_else(EnvFilter::from_default_env)
            .add_directive(self.global_level.into());

        tracing_subscriber::registry()
            .with(env_filter)
            .with(file_layer)
            .with(stdout_layer)
            .try_init()?;

        Ok(())
    }
}

/// Installs the default [`LogConfig`] subscriber for tests.
///
/// Safe to call from every test: the error from a second installation is ignored.
pub fn init_test_tracing() {
    let _ = LogConfig::default().init_tracing_subscriber(None::<EnvFilter>);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_serde() {
        let format: LogFormat = serde_json::from_str("\"json\"").unwrap();
        assert_eq!(format, LogFormat::Json);
        assert_eq!(serde_json::to_string(&LogFormat::Compact).unwrap(), "\"compact\"");
    }

    #[test]
    fn test_log_format_value_enum() {
        use clap::ValueEnum;
        assert_eq!(LogFormat::from_str("pretty", false), Ok(LogFormat::Pretty));
        assert!(LogFormat::from_str("verbose", false).is_err());
    }

    #[test]
    fn test_init_test_tracing_twice() {
        init_test_tracing();
        init_test_tracing();
        tracing::info!(target: "loam-cli", "tracing initialized twice without panicking");
    }
}
