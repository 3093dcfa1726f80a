use murmur_error::Result;
use murmur_utils::env;
use std::net::{IpAddr, Ipv4Addr};
use std::num::NonZeroUsize;
use std::time::Duration;

use crate::db_pools::PartialDatabasePools;
use crate::logging::{Logging, PartialLogging};
use crate::{vars, Auth, DatabasePools, LoadConfigError, PartialAuth};

#[derive(Debug, Clone)]
pub struct Server {
    pub logging: Logging,
    pub database: DatabasePools,
    pub auth: Auth,

    /// **Environment variable**: `MURMUR_SERVER_IP`
    ///
    /// Defaults to `127.0.0.1`.
    pub ip: IpAddr,

    /// **Environment variable**: `MURMUR_SERVER_PORT`
    ///
    /// Defaults to `8080`.
    pub port: u16,

    /// **Environment variable**: `MURMUR_SERVER_WORKERS`
    ///
    /// Total amount of runtime worker threads. Defaults to `4` on
    /// machines with more than 4 cores, half the cores otherwise.
    pub workers: usize,

    /// **Environment variable**: `MURMUR_POSTS_PER_PAGE`
    ///
    /// How many posts a feed page holds. Defaults to `10`.
    pub posts_per_page: u64,

    /// **Environment variable**: `MURMUR_POST_MAX_CHARACTERS`
    ///
    /// Upper bound on post text length. Defaults to `10000`.
    pub post_max_characters: usize,

    /// **Environment variable**: `MURMUR_HOME_CACHE_TTL` (seconds)
    ///
    /// How long a rendered home feed page stays cached. Defaults to 20
    /// seconds.
    pub home_cache_ttl: Duration,
}

#[derive(Debug, Clone, Default)]
pub struct PartialServer {
    pub logging: PartialLogging,
    pub database: PartialDatabasePools,
    pub auth: PartialAuth,
    pub ip: Option<IpAddr>,
    pub port: Option<u16>,
    pub workers: Option<NonZeroUsize>,
    pub posts_per_page: Option<u64>,
    pub post_max_characters: Option<usize>,
    pub home_cache_ttl_secs: Option<u64>,
}

impl Server {
    pub(crate) const DEFAULT_PORT: u16 = 8080;
    pub(crate) const DEFAULT_POSTS_PER_PAGE: u64 = 10;
    pub(crate) const DEFAULT_POST_MAX_CHARACTERS: usize = 10_000;
    pub(crate) const DEFAULT_HOME_CACHE_TTL: Duration = Duration::from_secs(20);

    /// Loads the server configuration from the program's environment
    /// variables only.
    pub fn from_env() -> Result<Self, LoadConfigError> {
        Self::from_partial(PartialServer::from_env()?)
    }

    pub fn from_partial(partial: PartialServer) -> Result<Self, LoadConfigError> {
        let logging = Logging::from_partial(partial.logging)?;
        let database = DatabasePools::from_partial(partial.database)?;
        let auth = Auth::from_partial(partial.auth)?;

        Ok(Self {
            logging,
            database,
            auth,
            ip: partial.ip.unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST)),
            port: partial.port.unwrap_or(Self::DEFAULT_PORT),
            workers: partial
                .workers
                .map(NonZeroUsize::get)
                .unwrap_or_else(Self::default_workers),
            posts_per_page: partial
                .posts_per_page
                .unwrap_or(Self::DEFAULT_POSTS_PER_PAGE),
            post_max_characters: partial
                .post_max_characters
                .unwrap_or(Self::DEFAULT_POST_MAX_CHARACTERS),
            home_cache_ttl: partial
                .home_cache_ttl_secs
                .map(Duration::from_secs)
                .unwrap_or(Self::DEFAULT_HOME_CACHE_TTL),
        })
    }

    /// Loads a fixed configuration for tests, no environment involved.
    #[must_use]
    pub fn for_tests() -> Self {
        let partial = PartialServer {
            database: PartialDatabasePools {
                // never actually connected to, tests bring their own pool
                primary_url: Some("postgres://postgres@localhost:5432/murmur".to_string()),
                ..Default::default()
            },
            auth: PartialAuth {
                jwt_secret: Some("murmur-test-signing-secret".to_string()),
                token_expiry_secs: Some(3600),
                ..Default::default()
            },
            ..Default::default()
        };

        Self::from_partial(partial).expect("unable to load test server configuration")
    }

    fn default_workers() -> usize {
        let cores = num_cpus::get();
        if cores > 4 {
            4
        } else {
            (cores / 2).max(1)
        }
    }
}

impl PartialServer {
    pub fn from_env() -> Result<Self, LoadConfigError> {
        use murmur_error::ext::ErrorResultExt;

        Ok(Self {
            logging: PartialLogging::from_env()?,
            database: PartialDatabasePools::from_env()?,
            auth: PartialAuth::from_env()?,
            ip: env::var_opt_parsed(vars::SERVER_IP).change_context(LoadConfigError)?,
            port: env::var_opt_parsed(vars::SERVER_PORT).change_context(LoadConfigError)?,
            workers: env::var_opt_parsed(vars::SERVER_WORKERS).change_context(LoadConfigError)?,
            posts_per_page: env::var_opt_parsed(vars::POSTS_PER_PAGE)
                .change_context(LoadConfigError)?,
            post_max_characters: env::var_opt_parsed(vars::POST_MAX_CHARACTERS)
                .change_context(LoadConfigError)?,
            home_cache_ttl_secs: env::var_opt_parsed(vars::HOME_CACHE_TTL)
                .change_context(LoadConfigError)?,
        })
    }
}
