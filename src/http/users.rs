//! Account endpoints: registration, own profile, and staff administration.

use super::{ApiError, AppState, extract::RecordId};
use crate::identity::{
    domain::{Caller, Identity, IdentityDraft, IdentityId},
    services::RegistrationRequest,
};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account representation; the password hash is never included.
#[derive(Debug, Serialize)]
pub(super) struct IdentityBody {
    id: i64,
    username: String,
    first_name: String,
    last_name: String,
    email: String,
    is_staff: bool,
    is_active: bool,
    date_joined: DateTime<Utc>,
}

impl From<&Identity> for IdentityBody {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id().value(),
            username: identity.username().as_str().to_owned(),
            first_name: identity.first_name().to_owned(),
            last_name: identity.last_name().to_owned(),
            email: identity.email().to_owned(),
            is_staff: identity.is_staff(),
            is_active: identity.is_active(),
            date_joined: identity.date_joined(),
        }
    }
}

/// The caller's own profile.
#[derive(Debug, Serialize)]
pub(super) struct ProfileBody {
    username: String,
    email: String,
    first_name: String,
    last_name: String,
    is_admin: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct RegisterRequest {
    username: String,
    first_name: String,
    last_name: String,
    email: String,
    password: String,
    consent_given: bool,
}

#[derive(Debug, Deserialize)]
pub(super) struct IdentityRequest {
    #[serde(default)]
    username: String,
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    is_staff: bool,
    #[serde(default = "active_by_default")]
    is_active: bool,
}

const fn active_by_default() -> bool {
    true
}

impl From<IdentityRequest> for IdentityDraft {
    fn from(request: IdentityRequest) -> Self {
        Self {
            username: request.username,
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            is_staff: request.is_staff,
            is_active: request.is_active,
        }
    }
}

pub(super) async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<IdentityBody>), ApiError> {
    let Json(request) = payload?;
    let identity = state
        .registration
        .register(RegistrationRequest {
            username: request.username,
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            password: request.password,
            consent_given: request.consent_given,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(IdentityBody::from(&identity))))
}

pub(super) async fn me(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<ProfileBody>, ApiError> {
    let identity = state.identities.profile(&caller).await?;
    Ok(Json(ProfileBody {
        username: identity.username().as_str().to_owned(),
        email: identity.email().to_owned(),
        first_name: identity.first_name().to_owned(),
        last_name: identity.last_name().to_owned(),
        is_admin: identity.is_staff(),
    }))
}

pub(super) async fn list(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<Vec<IdentityBody>>, ApiError> {
    let identities = state.identities.list(&caller).await?;
    Ok(Json(identities.iter().map(IdentityBody::from).collect()))
}

pub(super) async fn create(
    State(state): State<AppState>,
    caller: Caller,
    payload: Result<Json<IdentityRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<IdentityBody>), ApiError> {
    let Json(request) = payload?;
    let identity = state.identities.create(&caller, request.into()).await?;
    Ok((StatusCode::CREATED, Json(IdentityBody::from(&identity))))
}

pub(super) async fn retrieve(
    State(state): State<AppState>,
    caller: Caller,
    RecordId(identity_id): RecordId,
) -> Result<Json<IdentityBody>, ApiError> {
    let identity = state
        .identities
        .get(&caller, IdentityId::new(identity_id))
        .await?;
    Ok(Json(IdentityBody::from(&identity)))
}

pub(super) async fn update(
    State(state): State<AppState>,
    caller: Caller,
    RecordId(identity_id): RecordId,
    payload: Result<Json<IdentityRequest>, JsonRejection>,
) -> Result<Json<IdentityBody>, ApiError> {
    let Json(request) = payload?;
    let identity = state
        .identities
        .update(&caller, IdentityId::new(identity_id), request.into())
        .await?;
    Ok(Json(IdentityBody::from(&identity)))
}

pub(super) async fn destroy(
    State(state): State<AppState>,
    caller: Caller,
    RecordId(identity_id): RecordId,
) -> Result<StatusCode, ApiError> {
    state
        .identities
        .delete(&caller, IdentityId::new(identity_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
