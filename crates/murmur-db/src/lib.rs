//! Database access layer: connection pools, transactions and embedded
//! schema migrations.

pub mod pool;
pub mod testing;

pub use self::pool::{PgConnection, PgPool, PgPooledConnection, Transaction};

use sqlx::migrate::Migrator;

/// Embedded schema migrations, applied on server startup and when a test
/// database is set up.
pub static MIGRATIONS: Migrator = sqlx::migrate!();
