//! Shared helpers for integration tests: throwaway databases and handler
//! state wired to a fixture resolver.

use std::sync::Arc;

use gym_backend::domain::ports::MxResolver;
use gym_backend::inbound::http::HttpState;
use gym_backend::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use tempfile::TempDir;

/// Open a migrated throwaway database.
///
/// The returned directory guard must be kept alive for the duration of
/// the test; dropping it deletes the database file.
pub fn test_pool() -> (TempDir, DbPool) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("test.db");
    let pool = DbPool::new(PoolConfig::new(path.to_string_lossy()).with_max_size(2))
        .expect("build pool");
    run_migrations(&pool).expect("apply migrations");
    (dir, pool)
}

/// Handler state over a throwaway database and the given resolver.
pub fn test_state(resolver: impl MxResolver + 'static) -> (TempDir, HttpState) {
    let (dir, pool) = test_pool();
    (dir, HttpState::new(pool, Arc::new(resolver)))
}
