//! Names of every environment variable the server reads.

pub const SERVER_IP: &str = "MURMUR_SERVER_IP";
pub const SERVER_PORT: &str = "MURMUR_SERVER_PORT";
pub const SERVER_WORKERS: &str = "MURMUR_SERVER_WORKERS";

pub const DB_PRIMARY_URL: &str = "MURMUR_DB_PRIMARY_URL";
/// Fallback for [`DB_PRIMARY_URL`], kept for tooling that expects the
/// conventional name.
pub const DATABASE_URL: &str = "DATABASE_URL";
pub const DB_REPLICA_URL: &str = "MURMUR_DB_REPLICA_URL";
pub const DB_MIN_CONNECTIONS: &str = "MURMUR_DB_MIN_CONNECTIONS";
pub const DB_MAX_CONNECTIONS: &str = "MURMUR_DB_MAX_CONNECTIONS";
pub const DB_CONNECTION_TIMEOUT: &str = "MURMUR_DB_CONNECTION_TIMEOUT";
pub const DB_IDLE_TIMEOUT: &str = "MURMUR_DB_IDLE_TIMEOUT";

pub const AUTH_JWT_SECRET: &str = "MURMUR_AUTH_JWT_SECRET";
pub const AUTH_TOKEN_EXPIRY: &str = "MURMUR_AUTH_TOKEN_EXPIRY";

pub const POSTS_PER_PAGE: &str = "MURMUR_POSTS_PER_PAGE";
pub const POST_MAX_CHARACTERS: &str = "MURMUR_POST_MAX_CHARACTERS";
pub const HOME_CACHE_TTL: &str = "MURMUR_HOME_CACHE_TTL";

pub const LOGGING_TARGETS: &str = "MURMUR_LOG_TARGETS";
pub const LOGGING_STYLE: &str = "MURMUR_LOG_STYLE";
