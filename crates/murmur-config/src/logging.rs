use murmur_error::ext::ErrorResultExt;
use murmur_error::Result;
use murmur_utils::env;
use std::str::FromStr;
use thiserror::Error;

use crate::{vars, LoadConfigError};

#[derive(Debug, Clone)]
pub struct Logging {
    /// Target filter directives, same syntax as `RUST_LOG`.
    pub targets: String,
    pub style: LoggingStyle,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoggingStyle {
    Full,
    #[default]
    Compact,
    Pretty,
    Json,
}

#[derive(Debug, Error)]
#[error("unknown logging style, expected one of: full, compact, pretty, json")]
pub struct InvalidLoggingStyle;

impl FromStr for LoggingStyle {
    type Err = InvalidLoggingStyle;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(InvalidLoggingStyle),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PartialLogging {
    pub targets: Option<String>,
    pub style: Option<LoggingStyle>,
}

impl Logging {
    pub fn from_partial(partial: PartialLogging) -> Result<Self, LoadConfigError> {
        Ok(Self {
            targets: partial.targets.unwrap_or_default(),
            style: partial.style.unwrap_or_default(),
        })
    }
}

impl PartialLogging {
    pub fn from_env() -> Result<Self, LoadConfigError> {
        // RUST_LOG keeps working as the conventional escape hatch
        let targets = match env::var_opt(vars::LOGGING_TARGETS).change_context(LoadConfigError)? {
            Some(targets) => Some(targets),
            None => env::var_opt("RUST_LOG").change_context(LoadConfigError)?,
        };

        Ok(Self {
            targets,
            style: env::var_opt_parsed(vars::LOGGING_STYLE).change_context(LoadConfigError)?,
        })
    }
}
