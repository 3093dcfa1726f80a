//! Server configuration, assembled from partial layers.
//!
//! Every section has a `Partial*` twin whose fields are all optional.
//! Partials are read from environment variables, then resolved against
//! the documented defaults with `from_partial`. Anything that must be
//! provided (the primary database URL, the JWT secret) fails resolution
//! with a [`LoadConfigError`] naming the missing variable.

mod auth;
mod db_pools;
mod logging;
mod server;

pub mod vars;

use thiserror::Error;

pub use self::auth::{Auth, PartialAuth};
pub use self::db_pools::{DatabasePool, DatabasePools, PartialDatabasePools};
pub use self::logging::{Logging, LoggingStyle, PartialLogging};
pub use self::server::{PartialServer, Server};

#[derive(Debug, Error)]
#[error("Could not load server configuration")]
pub struct LoadConfigError;
