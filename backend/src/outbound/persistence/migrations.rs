//! Embedded, versioned schema migrations.
//!
//! Migrations live under `backend/migrations/` and are compiled into the
//! binary. They run at startup before the server accepts traffic, and can
//! equally be applied by an operator against a copy of the database; the
//! application never creates schema implicitly.

use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use super::pool::DbPool;

/// All versioned migrations shipped with this build.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while applying migrations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to apply migrations: {message}")]
pub struct MigrationError {
    message: String,
}

/// Apply any pending migrations using a pooled connection.
///
/// Blocking; callers on the async runtime should wrap this in
/// `spawn_blocking`.
pub fn run_pending_migrations(pool: &DbPool) -> Result<(), MigrationError> {
    let mut conn = pool.get().map_err(|err| MigrationError {
        message: err.to_string(),
    })?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError {
            message: err.to_string(),
        })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outbound::persistence::PoolConfig;
    use rstest::rstest;

    #[rstest]
    fn migrations_apply_cleanly_to_an_empty_database() {
        let pool = DbPool::new(PoolConfig::new(":memory:").with_max_size(1))
            .expect("pool builds against memory database");
        run_pending_migrations(&pool).expect("migrations apply");
        // Re-running must be a no-op.
        run_pending_migrations(&pool).expect("migrations are idempotent");
    }
}
