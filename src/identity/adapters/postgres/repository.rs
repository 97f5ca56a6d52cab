//! `PostgreSQL` repository implementation for identity storage.

use super::{
    models::{IdentityRow, IdentityValues},
    schema::identities,
};
use crate::identity::{
    domain::{
        Identity, IdentityId, IdentityProfile, NewIdentity, PasswordHash, PersistedIdentityData,
        Username,
    },
    ports::{IdentityRepository, IdentityRepositoryError, IdentityRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by identity adapters.
pub type IdentityPgPool = Pool<ConnectionManager<PgConnection>>;

const USERNAME_UNIQUE_CONSTRAINT: &str = "identities_username_unique";

/// `PostgreSQL`-backed identity repository.
#[derive(Debug, Clone)]
pub struct PostgresIdentityRepository {
    pool: IdentityPgPool,
}

impl PostgresIdentityRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: IdentityPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> IdentityRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> IdentityRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(IdentityRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(IdentityRepositoryError::persistence)?
    }
}

#[async_trait]
impl IdentityRepository for PostgresIdentityRepository {
    async fn create(&self, identity: &NewIdentity) -> IdentityRepositoryResult<Identity> {
        let username = identity.profile().username().clone();
        let values = to_values(
            identity.profile(),
            identity.password_hash(),
            identity.date_joined(),
        );

        self.run_blocking(move |connection| {
            let row = diesel::insert_into(identities::table)
                .values(&values)
                .returning(IdentityRow::as_returning())
                .get_result::<IdentityRow>(connection)
                .map_err(|err| map_write_error(err, &username))?;
            row_to_identity(row)
        })
        .await
    }

    async fn find_by_id(&self, id: IdentityId) -> IdentityRepositoryResult<Option<Identity>> {
        self.run_blocking(move |connection| {
            let row = identities::table
                .find(id.value())
                .select(IdentityRow::as_select())
                .first::<IdentityRow>(connection)
                .optional()
                .map_err(IdentityRepositoryError::persistence)?;
            row.map(row_to_identity).transpose()
        })
        .await
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> IdentityRepositoryResult<Option<Identity>> {
        let lookup = username.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = identities::table
                .filter(identities::username.eq(lookup))
                .select(IdentityRow::as_select())
                .first::<IdentityRow>(connection)
                .optional()
                .map_err(IdentityRepositoryError::persistence)?;
            row.map(row_to_identity).transpose()
        })
        .await
    }

    async fn list(&self) -> IdentityRepositoryResult<Vec<Identity>> {
        self.run_blocking(move |connection| {
            identities::table
                .order(identities::id.asc())
                .select(IdentityRow::as_select())
                .load::<IdentityRow>(connection)
                .map_err(IdentityRepositoryError::persistence)?
                .into_iter()
                .map(row_to_identity)
                .collect()
        })
        .await
    }

    async fn update(&self, identity: &Identity) -> IdentityRepositoryResult<()> {
        let id = identity.id();
        let username = identity.username().clone();
        let values = to_values(
            identity.profile(),
            identity.password_hash(),
            identity.date_joined(),
        );

        self.run_blocking(move |connection| {
            let affected = diesel::update(identities::table.find(id.value()))
                .set(&values)
                .execute(connection)
                .map_err(|err| map_write_error(err, &username))?;
            if affected == 0 {
                return Err(IdentityRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: IdentityId) -> IdentityRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(identities::table.find(id.value()))
                .execute(connection)
                .map_err(IdentityRepositoryError::persistence)?;
            Ok(affected > 0)
        })
        .await
    }
}

fn to_values(
    profile: &IdentityProfile,
    password_hash: Option<&PasswordHash>,
    date_joined: DateTime<Utc>,
) -> IdentityValues {
    IdentityValues {
        username: profile.username().as_str().to_owned(),
        first_name: profile.first_name().to_owned(),
        last_name: profile.last_name().to_owned(),
        email: profile.email().to_owned(),
        is_staff: profile.is_staff(),
        is_active: profile.is_active(),
        password_hash: password_hash.map(|hash| hash.as_str().to_owned()),
        date_joined,
    }
}

fn row_to_identity(row: IdentityRow) -> IdentityRepositoryResult<Identity> {
    let IdentityRow {
        id,
        username,
        first_name,
        last_name,
        email,
        is_staff,
        is_active,
        password_hash,
        date_joined,
    } = row;

    let data = PersistedIdentityData {
        id: IdentityId::new(id),
        username: Username::new(username).map_err(IdentityRepositoryError::persistence)?,
        first_name,
        last_name,
        email,
        is_staff,
        is_active,
        password_hash: password_hash.map(PasswordHash::new),
        date_joined,
    };
    Ok(Identity::from_persisted(data))
}

fn map_write_error(err: DieselError, username: &Username) -> IdentityRepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
            if is_username_unique_violation(info.as_ref()) =>
        {
            IdentityRepositoryError::DuplicateUsername(username.clone())
        }
        _ => IdentityRepositoryError::persistence(err),
    }
}

fn is_username_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == USERNAME_UNIQUE_CONSTRAINT)
}
