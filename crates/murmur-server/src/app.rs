use axum::extract::{FromRequestParts, State};
use murmur_db::pool::{AcquireError, BeginTransactError};
use murmur_db::{PgPool, PgPooledConnection, Transaction};
use murmur_error::ext::ErrorResultExt;
use murmur_error::Result;
use thiserror::Error;

use std::fmt::Debug;
use std::ops::Deref;
use std::sync::Arc;
use tracing::warn;

use crate::cache::PageCache;

#[derive(Debug, Error)]
#[error("Could not build application state")]
pub struct BuildAppError;

#[derive(Clone, FromRequestParts)]
#[from_request(via(State))]
#[must_use]
pub struct App(Arc<AppInner>);

impl App {
    /// Creates a new [`App`] from a given [configuration](murmur_config::Server).
    pub fn new(config: murmur_config::Server) -> Result<Self, BuildAppError> {
        let primary_db = PgPool::build(&config.database, &config.database.primary)
            .change_context(BuildAppError)?;

        let replica_db = config
            .database
            .replica
            .as_ref()
            .map(|replica| PgPool::build(&config.database, replica))
            .transpose()
            .change_context(BuildAppError)?;

        let page_cache = PageCache::new(config.home_cache_ttl);

        Ok(Self(Arc::new(AppInner {
            config: Arc::new(config),
            primary_db,
            replica_db,
            page_cache,
        })))
    }

    /// Creates a new [`App`] on top of an already established pool, for
    /// testing purposes.
    #[cfg(test)]
    pub fn new_for_tests(pool: PgPool) -> Self {
        let config = murmur_config::Server::for_tests();
        let page_cache = PageCache::new(config.home_cache_ttl);

        Self(Arc::new(AppInner {
            config: Arc::new(config),
            primary_db: pool,
            replica_db: None,
            page_cache,
        }))
    }
}

impl App {
    /// Obtains a read/write transaction from the primary database pool.
    #[tracing::instrument(skip_all, name = "app.db_write")]
    pub async fn db_write(&self) -> Result<Transaction<'static>, BeginTransactError> {
        self.primary_db.begin().await
    }

    /// Obtains a readonly database connection from the replica pool or
    /// the primary pool, whichever is possible to obtain.
    ///
    /// The replica pool is tried first; on failure the primary pool
    /// serves the read.
    #[tracing::instrument(skip_all, name = "app.db_read")]
    pub async fn db_read(&self) -> Result<PgPooledConnection, AcquireError> {
        let Some(replica_pool) = self.replica_db.as_ref() else {
            return self.primary_db.acquire().await;
        };

        match replica_pool.acquire().await {
            Ok(connection) => Ok(connection),
            Err(error) => {
                warn!(%error, "Replica database is not available, falling back to primary");
                self.primary_db.acquire().await
            }
        }
    }
}

impl Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("config", &self.config)
            .field("primary_db", &self.primary_db)
            .field("replica_db", &self.replica_db)
            .field("page_cache", &self.page_cache)
            .finish()
    }
}

impl Deref for App {
    type Target = AppInner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Inner type of the [`App`] object.
pub struct AppInner {
    pub config: Arc<murmur_config::Server>,
    pub primary_db: PgPool,
    pub replica_db: Option<PgPool>,
    pub page_cache: PageCache,
}
