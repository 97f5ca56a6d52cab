//! Diesel row models for identity persistence.

use super::schema::identities;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for identity records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = identities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct IdentityRow {
    /// Store-assigned identifier.
    pub id: i64,
    /// Unique login handle.
    pub username: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact email.
    pub email: String,
    /// Staff flag.
    pub is_staff: bool,
    /// Active flag.
    pub is_active: bool,
    /// Encoded password hash.
    pub password_hash: Option<String>,
    /// Join timestamp.
    pub date_joined: DateTime<Utc>,
}

/// Insert and update model for identity records.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = identities)]
#[diesel(treat_none_as_null = true)]
pub struct IdentityValues {
    /// Unique login handle.
    pub username: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact email.
    pub email: String,
    /// Staff flag.
    pub is_staff: bool,
    /// Active flag.
    pub is_active: bool,
    /// Encoded password hash.
    pub password_hash: Option<String>,
    /// Join timestamp.
    pub date_joined: DateTime<Utc>,
}
