//! Connection pool for Diesel SQLite connections.
//!
//! Wraps `diesel::r2d2` to provide a pooled, pragma-configured connection
//! source for the persistence layer. Checkout is blocking; the repository
//! adapters run every Diesel call on `spawn_blocking` so the async runtime
//! is never blocked.

use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel::SqliteConnection;

/// Errors that can occur during pool operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// Failed to check out a connection from the pool.
    #[error("failed to get connection from pool: {message}")]
    Checkout { message: String },

    /// Failed to build the connection pool.
    #[error("failed to build connection pool: {message}")]
    Build { message: String },
}

impl PoolError {
    /// Create a checkout error with the given message.
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    /// Create a build error with the given message.
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }
}

/// Configuration for the database connection pool.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
    connection_timeout: Duration,
}

impl PoolConfig {
    /// Create a new configuration with the given database URL or file path.
    ///
    /// Uses sensible defaults:
    /// - `max_size`: 10 connections
    /// - `connection_timeout`: 30 seconds
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: 10,
            connection_timeout: Duration::from_secs(30),
        }
    }

    /// Set the maximum number of connections in the pool.
    ///
    /// Tests against an in-memory database should use `1`, since every
    /// SQLite `:memory:` connection opens a distinct database.
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    /// Set the connection checkout timeout.
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// Get the database URL.
    pub fn database_url(&self) -> &str {
        &self.database_url
    }
}

/// Session pragmas applied to every pooled connection.
#[derive(Debug, Clone, Copy)]
struct SqlitePragmas;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute("PRAGMA busy_timeout = 5000; PRAGMA foreign_keys = ON;")
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Checked-out connection handle.
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Connection pool for SQLite via Diesel.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<ConnectionManager<SqliteConnection>>,
}

impl DbPool {
    /// Create a new connection pool with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Build`] if the pool cannot be constructed
    /// (e.g. an unopenable database path).
    pub fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let manager = ConnectionManager::<SqliteConnection>::new(config.database_url());

        let pool = Pool::builder()
            .max_size(config.max_size)
            .connection_timeout(config.connection_timeout)
            .connection_customizer(Box::new(SqlitePragmas))
            .build(manager)
            .map_err(|err| PoolError::build(err.to_string()))?;

        Ok(Self { inner: pool })
    }

    /// Get a connection from the pool, blocking up to the configured
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Checkout`] if no connection becomes available.
    pub fn get(&self) -> Result<DbConnection, PoolError> {
        self.inner
            .get()
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_config_default_values() {
        let config = PoolConfig::new(":memory:");

        assert_eq!(config.database_url(), ":memory:");
        assert_eq!(config.max_size, 10);
        assert_eq!(config.connection_timeout, Duration::from_secs(30));
    }

    #[rstest]
    fn pool_config_builder_pattern() {
        let config = PoolConfig::new("clinic.db")
            .with_max_size(1)
            .with_connection_timeout(Duration::from_secs(5));

        assert_eq!(config.max_size, 1);
        assert_eq!(config.connection_timeout, Duration::from_secs(5));
    }

    #[rstest]
    fn in_memory_pool_hands_out_connections() {
        let pool = DbPool::new(PoolConfig::new(":memory:").with_max_size(1))
            .expect("pool builds against memory database");
        pool.get().expect("connection checks out");
    }
}
