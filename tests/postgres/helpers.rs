//! Shared helpers for `PostgreSQL` integration tests.
//!
//! Tests run only when `TASKFLOW_TEST_DATABASE_URL` names a reachable
//! server. Each test gets a private schema that is dropped afterwards.

use std::env;

use diesel::Connection;
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::r2d2::{self, ConnectionManager, CustomizeConnection, Pool};
use mockable::DefaultClock;
use rstest::fixture;
use taskflow::database::{PgPool, apply_migrations};
use taskflow::identity::adapters::postgres::PostgresIdentityRepository;
use taskflow::identity::domain::{
    Identity, IdentityDraft, IdentityProfile, NewIdentity, PasswordHash,
};
use taskflow::identity::ports::IdentityRepository;
use taskflow::task::adapters::postgres::PostgresTaskRepository;
use tracing::warn;
use uuid::Uuid;

/// Environment variable naming the test server.
pub const TEST_DATABASE_URL_ENV: &str = "TASKFLOW_TEST_DATABASE_URL";

#[derive(Debug)]
struct SearchPath(String);

impl CustomizeConnection<PgConnection, r2d2::Error> for SearchPath {
    fn on_acquire(&self, connection: &mut PgConnection) -> Result<(), r2d2::Error> {
        connection
            .batch_execute(&format!("SET search_path TO {}", self.0))
            .map_err(r2d2::Error::QueryError)
    }
}

/// A migrated private schema with repositories over it.
pub struct TestDatabase {
    /// Identity repository bound to the schema.
    url: String,
    schema: String,
    pub identities: PostgresIdentityRepository,
    /// Task repository bound to the schema.
    pub tasks: PostgresTaskRepository,
}

impl Drop for TestDatabase {
    fn drop(&mut self) {
        let dropped = PgConnection::establish(&self.url)
            .map_err(|err| err.to_string())
            .and_then(|mut connection| {
                connection
                    .batch_execute(&format!("DROP SCHEMA IF EXISTS {} CASCADE", self.schema))
                    .map_err(|err| err.to_string())
            });
        if let Err(err) = dropped {
            warn!(schema = %self.schema, error = %err, "failed to drop test schema");
        }
    }
}

/// Provides a migrated database, or `None` when no test server is
/// configured.
///
/// # Errors
///
/// Returns an error if the configured server cannot be prepared.
#[fixture]
pub fn database() -> Result<Option<TestDatabase>, eyre::Report> {
    let Ok(url) = env::var(TEST_DATABASE_URL_ENV) else {
        return Ok(None);
    };
    let schema = format!("taskflow_test_{}", Uuid::new_v4().simple());

    let mut admin = PgConnection::establish(&url)?;
    admin.batch_execute(&format!("CREATE SCHEMA {schema}"))?;

    let pool: PgPool = Pool::builder()
        .max_size(2)
        .connection_customizer(Box::new(SearchPath(schema.clone())))
        .build(ConnectionManager::<PgConnection>::new(&url))?;
    apply_migrations(&mut *pool.get()?)?;

    Ok(Some(TestDatabase {
        identities: PostgresIdentityRepository::new(pool.clone()),
        tasks: PostgresTaskRepository::new(pool),
        url,
        schema,
    }))
}

/// Stores an active identity named `username`.
///
/// # Errors
///
/// Returns an error if the profile is invalid or the insert fails.
pub async fn store_identity(
    database: &TestDatabase,
    username: &str,
    is_staff: bool,
) -> Result<Identity, eyre::Report> {
    let profile = IdentityProfile::parse(IdentityDraft {
        username: username.to_owned(),
        email: format!("{username}@example.com"),
        is_staff,
        is_active: true,
        ..IdentityDraft::default()
    })
    .map_err(|err| eyre::eyre!("invalid profile: {err}"))?;
    let draft = NewIdentity::new(
        profile,
        Some(PasswordHash::new("$2b$04$abcdefghijklmnopqrstuu")),
        &DefaultClock,
    );
    Ok(database.identities.create(&draft).await?)
}
