//! `PostgreSQL` pool construction and schema set-up.

use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use thiserror::Error;
use tracing::info;

/// Connection pool shared by the identity and task repositories.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Schema migrations in application order. Each script is idempotent.
pub const MIGRATIONS: [(&str, &str); 2] = [
    (
        "2026-10-01-000000_create_identities",
        include_str!("../migrations/2026-10-01-000000_create_identities/up.sql"),
    ),
    (
        "2026-10-01-000001_create_tasks",
        include_str!("../migrations/2026-10-01-000001_create_tasks/up.sql"),
    ),
];

/// Errors raised while preparing the database.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// The pool could not be built or a connection checked out.
    #[error("connection pool error: {0}")]
    Pool(#[from] PoolError),
    /// A migration script failed.
    #[error("migration {name} failed: {source}")]
    Migration {
        /// Migration directory name.
        name: &'static str,
        /// Underlying database error.
        source: diesel::result::Error,
    },
    /// The blocking set-up task panicked or was cancelled.
    #[error("database set-up task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Builds a pool for `url` and applies [`MIGRATIONS`].
///
/// # Errors
///
/// Returns [`DatabaseError`] when the database is unreachable or a migration
/// fails.
pub async fn connect(url: &str) -> Result<PgPool, DatabaseError> {
    let manager = ConnectionManager::<PgConnection>::new(url);
    tokio::task::spawn_blocking(move || -> Result<PgPool, DatabaseError> {
        let pool = Pool::builder().build(manager)?;
        let mut connection = pool.get()?;
        apply_migrations(&mut connection)?;
        Ok(pool)
    })
    .await?
}

/// Runs every migration script against `connection`.
///
/// # Errors
///
/// Returns [`DatabaseError::Migration`] naming the first script that fails.
pub fn apply_migrations(connection: &mut PgConnection) -> Result<(), DatabaseError> {
    for (name, script) in MIGRATIONS {
        connection
            .batch_execute(script)
            .map_err(|source| DatabaseError::Migration { name, source })?;
        info!(migration = name, "migration applied");
    }
    Ok(())
}
