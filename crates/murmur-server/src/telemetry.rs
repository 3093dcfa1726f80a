use murmur_config::{Logging, LoggingStyle};
use murmur_error::{ApiErrorCategory, Error, Result};
use thiserror::Error as ThisError;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Debug, ThisError)]
#[error("Failed to initialize tracing")]
pub struct TracingInitError;

pub fn init(config: &Logging) -> Result<(), TracingInitError> {
    let filter = make_env_filter(&config.targets);
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = match config.style {
        LoggingStyle::Full => builder.try_init(),
        LoggingStyle::Compact => builder.compact().try_init(),
        LoggingStyle::Pretty => builder.pretty().try_init(),
        LoggingStyle::Json => builder.json().try_init(),
    };

    result.map_err(|error| {
        Error::new(ApiErrorCategory::Unknown, TracingInitError)
            .attach_printable(format!("already initialized tracing: {error}"))
    })
}

fn make_env_filter(targets: &str) -> EnvFilter {
    let default_level = if murmur_utils::RELEASE {
        LevelFilter::INFO
    } else {
        LevelFilter::DEBUG
    };

    EnvFilter::builder()
        .with_default_directive(default_level.into())
        .parse_lossy(targets)
}
