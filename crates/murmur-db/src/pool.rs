use murmur_error::ext::{ErrorResultExt, ResultExt};
use murmur_error::{ApiErrorCategory, Result};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use std::fmt::Debug;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;
use thiserror::Error;

pub type PgConnection = sqlx::PgConnection;
pub type PgPooledConnection = sqlx::pool::PoolConnection<sqlx::Postgres>;

#[derive(Debug, Error)]
#[error("Could not build database pool")]
pub struct BuildPoolError;

#[derive(Debug, Error)]
#[error("Could not acquire database connection")]
pub struct AcquireError;

#[derive(Debug, Error)]
#[error("Could not begin database transaction")]
pub struct BeginTransactError;

#[derive(Debug, Error)]
#[error("Could not apply database migrations")]
pub struct MigrationError;

#[derive(Debug, Error)]
#[error("Could not commit database transaction")]
pub struct CommitTransactError;

/// A Postgres connection pool.
///
/// Connections are established lazily, so building a pool never touches
/// the network; the first `acquire`/`begin` does.
#[derive(Clone)]
pub struct PgPool {
    inner: sqlx::PgPool,
}

impl PgPool {
    pub fn build(
        pools: &murmur_config::DatabasePools,
        pool: &murmur_config::DatabasePool,
    ) -> Result<Self, BuildPoolError> {
        let connect_opts = PgConnectOptions::from_str(pool.url.value())
            .change_context(BuildPoolError)
            .attach_printable("invalid database connection URL")?;

        let pool_opts = PgPoolOptions::new()
            .acquire_timeout(pools.connection_timeout)
            .idle_timeout(pools.idle_timeout)
            .min_connections(pool.min_connections)
            .max_connections(pool.max_connections);

        Ok(Self {
            inner: pool_opts.connect_lazy_with(connect_opts),
        })
    }

    /// Amount of connections the pool currently holds.
    #[must_use]
    pub fn connections(&self) -> u32 {
        self.inner.size()
    }

    #[tracing::instrument(skip_all, name = "db.acquire")]
    pub async fn acquire(&self) -> Result<PgPooledConnection, AcquireError> {
        self.inner
            .acquire()
            .await
            .change_context(AcquireError)
            .category(ApiErrorCategory::Outage)
    }

    #[tracing::instrument(skip_all, name = "db.begin")]
    pub async fn begin(&self) -> Result<Transaction<'static>, BeginTransactError> {
        let inner = self
            .inner
            .begin()
            .await
            .change_context(BeginTransactError)
            .category(ApiErrorCategory::Outage)?;

        Ok(Transaction { inner })
    }

    /// Waits for one connection to be successfully established, within
    /// the pool's configured acquire timeout.
    #[tracing::instrument(skip_all, name = "db.wait_until_healthy")]
    pub async fn wait_until_healthy(&self) -> Result<(), AcquireError> {
        self.acquire().await.map(drop)
    }

    /// Applies every pending [embedded migration](crate::MIGRATIONS).
    #[tracing::instrument(skip_all, name = "db.migrate")]
    pub async fn run_migrations(&self) -> Result<(), MigrationError> {
        crate::MIGRATIONS
            .run(&self.inner)
            .await
            .change_context(MigrationError)
    }
}

impl From<sqlx::PgPool> for PgPool {
    fn from(inner: sqlx::PgPool) -> Self {
        Self { inner }
    }
}

impl Debug for PgPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgPool")
            .field("connections", &self.connections())
            .finish_non_exhaustive()
    }
}

/// An in-progress database transaction.
///
/// Dropping it without calling [`commit`](Transaction::commit) rolls
/// every change back.
pub struct Transaction<'c> {
    inner: sqlx::Transaction<'c, sqlx::Postgres>,
}

impl Transaction<'_> {
    #[tracing::instrument(skip_all, name = "db.commit")]
    pub async fn commit(self) -> Result<(), CommitTransactError> {
        self.inner.commit().await.change_context(CommitTransactError)
    }
}

impl<'c> Deref for Transaction<'c> {
    type Target = sqlx::Transaction<'c, sqlx::Postgres>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for Transaction<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

impl Debug for Transaction<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transaction").finish_non_exhaustive()
    }
}
