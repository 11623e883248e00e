use crate::config::TelemetryConfig;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("log filter '{directive}' is not a valid tracing directive")]
    BadDirective {
        directive: String,
        #[source]
        source: ParseError,
    },
    #[error("global subscriber rejected: {0}")]
    Install(Box<dyn std::error::Error + Send + Sync>),
}

/// Installs the global tracing subscriber. A `RUST_LOG` variable in the
/// environment wins over the configured level.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| {
        EnvFilter::try_new(&config.log_level).map_err(|source| TelemetryError::BadDirective {
            directive: config.log_level.clone(),
            source,
        })
    })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .compact()
        .try_init()
        .map_err(TelemetryError::Install)
}
