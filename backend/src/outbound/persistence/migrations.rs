//! Embedded Diesel migrations, applied idempotently at startup.

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use super::pool::DbPool;

/// Migrations compiled into the binary from `backend/migrations/`.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Failure while applying the embedded migrations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum MigrationError {
    /// The pool could not supply a connection.
    #[error("failed to get connection for migrations: {0}")]
    Pool(#[from] super::pool::PoolError),

    /// A migration failed to apply.
    #[error("failed to apply migrations: {message}")]
    Apply { message: String },
}

/// Apply any pending migrations. Safe to call on every startup.
pub fn run_migrations(pool: &DbPool) -> Result<(), MigrationError> {
    let mut conn = pool.get()?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Apply {
            message: err.to_string(),
        })?;

    if !applied.is_empty() {
        info!(count = applied.len(), "applied database migrations");
    }
    Ok(())
}
