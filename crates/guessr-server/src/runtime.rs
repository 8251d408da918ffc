use tracing_subscriber::{prelude::*, EnvFilter};

use crate::config::{LogFormat, LoggingConfig};

pub const DEFAULT_LOG_FILTER: &str = "guessr_server=info,guessr_db=info,sqlx=warn";

fn build_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let directives = config
            .filter
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_LOG_FILTER);
        EnvFilter::try_new(directives).unwrap_or_else(|err| {
            eprintln!("invalid logging.filter {directives:?}: {err}");
            EnvFilter::new(DEFAULT_LOG_FILTER)
        })
    })
}

/// Installs the global subscriber. Logs go to stderr so command output on
/// stdout stays machine-readable.
pub fn init_tracing(config: &LoggingConfig) {
    let registry = tracing_subscriber::registry().with(build_filter(config));
    match config.format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_current_span(true)
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}
