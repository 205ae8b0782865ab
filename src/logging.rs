use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

const LOG_FILE: &str = "ideaboard.log";

#[derive(Debug, Error)]
pub(crate) enum LoggingError {
    #[error("invalid log filter {filter:?}: {source}")]
    InvalidFilter {
        filter: String,
        source: tracing_subscriber::filter::ParseError,
    },
    #[error("log directory unavailable: {0}")]
    Directory(#[from] std::io::Error),
    #[error("failed to install subscriber: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

/// Sends tracing output to a file; the terminal belongs to the UI.
pub(crate) fn init_logging(config: &Config) -> Result<(), LoggingError> {
    let env_filter =
        EnvFilter::try_new(&config.log_filter).map_err(|source| LoggingError::InvalidFilter {
            filter: config.log_filter.clone(),
            source,
        })?;
    let file_appender = tracing_appender::rolling::never(config.log_dir()?, LOG_FILE);
    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_target(true)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()?;
    Ok(())
}
