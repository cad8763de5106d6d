use std::fmt;
use std::str::FromStr;

use tracing_subscriber::filter::{LevelFilter, ParseError};
use tracing_subscriber::EnvFilter;

use crate::config::{AppEnvironment, TelemetryConfig};

/// Crates under the portal that only get to speak at `warn`.
const QUIET_DEPENDENCIES: [&str; 3] = ["hyper", "tower", "axum_prometheus"];

#[derive(Debug)]
pub enum TelemetryError {
    UnknownLevel(String),
    EnvFilter { value: String, source: ParseError },
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::UnknownLevel(level) => {
                write!(f, "APP_LOG_LEVEL '{level}' is not one of off, error, warn, info, debug, trace")
            }
            TelemetryError::EnvFilter { value, .. } => {
                write!(f, "log filter '{value}' could not be parsed")
            }
            TelemetryError::Subscriber(err) => write!(f, "tracing subscriber rejected: {err}"),
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::UnknownLevel(_) => None,
            TelemetryError::EnvFilter { source, .. } => Some(source),
            TelemetryError::Subscriber(err) => Some(&**err),
        }
    }
}

/// Directives applied when `RUST_LOG` is absent: the configured level for the
/// portal, `warn` for the HTTP stack underneath it.
pub fn default_directives(config: &TelemetryConfig) -> Result<String, TelemetryError> {
    let level = LevelFilter::from_str(config.log_level.trim())
        .map_err(|_| TelemetryError::UnknownLevel(config.log_level.clone()))?;

    let mut directives = level.to_string().to_lowercase();
    for target in QUIET_DEPENDENCIES {
        directives.push_str(&format!(",{target}=warn"));
    }
    Ok(directives)
}

/// Pick the filter for this process. A parseable `RUST_LOG` wins; otherwise
/// the configured level is used.
pub fn build_filter(
    config: &TelemetryConfig,
    rust_log: Option<&str>,
) -> Result<EnvFilter, TelemetryError> {
    if let Some(filter) = rust_log
        .filter(|raw| !raw.trim().is_empty())
        .and_then(|raw| EnvFilter::try_new(raw).ok())
    {
        return Ok(filter);
    }

    let directives = default_directives(config)?;
    EnvFilter::try_new(&directives).map_err(|source| TelemetryError::EnvFilter {
        value: directives,
        source,
    })
}

/// Install the global subscriber. Targets are hidden in production, where
/// log lines are shipped as-is.
pub fn init(config: &TelemetryConfig, environment: AppEnvironment) -> Result<(), TelemetryError> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(config, rust_log.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(environment != AppEnvironment::Production)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Subscriber)
}
