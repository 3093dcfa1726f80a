use murmur_error::ext::ErrorResultExt;
use murmur_error::Result;
use murmur_utils::env;
use murmur_utils::Sensitive;
use std::time::Duration;

use crate::{vars, LoadConfigError};

/// Connection settings shared by the primary pool and the optional read
/// replica pool.
#[derive(Debug, Clone)]
pub struct DatabasePools {
    pub primary: DatabasePool,
    pub replica: Option<DatabasePool>,

    /// How long to wait for a connection before giving up.
    pub connection_timeout: Duration,
    /// How long an unused connection may sit in the pool.
    pub idle_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct DatabasePool {
    /// Connection URL, possibly carrying credentials.
    pub url: Sensitive<String>,
    pub min_connections: u32,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Default)]
pub struct PartialDatabasePools {
    pub primary_url: Option<String>,
    pub replica_url: Option<String>,
    pub min_connections: Option<u32>,
    pub max_connections: Option<u32>,
    pub connection_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

impl DatabasePools {
    pub(crate) const DEFAULT_MIN_CONNECTIONS: u32 = 0;
    pub(crate) const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    pub(crate) const DEFAULT_CONNECTION_TIMEOUT: Duration = Duration::from_secs(30);
    pub(crate) const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(600);

    pub fn from_partial(partial: PartialDatabasePools) -> Result<Self, LoadConfigError> {
        let Some(primary_url) = partial.primary_url else {
            return Err(murmur_error::Error::new(
                murmur_error::ApiErrorCategory::Unknown,
                LoadConfigError,
            )
            .attach_printable(format!(
                "either {} or {} must be set",
                vars::DB_PRIMARY_URL,
                vars::DATABASE_URL,
            )));
        };

        let min_connections = partial
            .min_connections
            .unwrap_or(Self::DEFAULT_MIN_CONNECTIONS);

        let max_connections = partial
            .max_connections
            .unwrap_or(Self::DEFAULT_MAX_CONNECTIONS);

        let primary = DatabasePool {
            url: Sensitive::new(primary_url),
            min_connections,
            max_connections,
        };

        let replica = partial.replica_url.map(|url| DatabasePool {
            url: Sensitive::new(url),
            min_connections,
            max_connections,
        });

        Ok(Self {
            primary,
            replica,
            connection_timeout: partial
                .connection_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(Self::DEFAULT_CONNECTION_TIMEOUT),
            idle_timeout: partial
                .idle_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(Self::DEFAULT_IDLE_TIMEOUT),
        })
    }
}

impl PartialDatabasePools {
    pub fn from_env() -> Result<Self, LoadConfigError> {
        let primary_url = match env::var_opt(vars::DB_PRIMARY_URL)
            .change_context(LoadConfigError)?
        {
            Some(url) => Some(url),
            None => env::var_opt(vars::DATABASE_URL).change_context(LoadConfigError)?,
        };

        Ok(Self {
            primary_url,
            replica_url: env::var_opt(vars::DB_REPLICA_URL).change_context(LoadConfigError)?,
            min_connections: env::var_opt_parsed(vars::DB_MIN_CONNECTIONS)
                .change_context(LoadConfigError)?,
            max_connections: env::var_opt_parsed(vars::DB_MAX_CONNECTIONS)
                .change_context(LoadConfigError)?,
            connection_timeout_secs: env::var_opt_parsed(vars::DB_CONNECTION_TIMEOUT)
                .change_context(LoadConfigError)?,
            idle_timeout_secs: env::var_opt_parsed(vars::DB_IDLE_TIMEOUT)
                .change_context(LoadConfigError)?,
        })
    }
}
