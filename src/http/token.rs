//! Token issuance and refresh endpoints.

use super::{ApiError, AppState};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct ObtainPairRequest {
    username: String,
    password: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct RefreshRequest {
    refresh: String,
}

#[derive(Debug, Serialize)]
pub(super) struct TokenPairBody {
    access: String,
    refresh: String,
    access_expires_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub(super) struct AccessTokenBody {
    access: String,
    access_expires_at: DateTime<Utc>,
}

pub(super) async fn obtain_pair(
    State(state): State<AppState>,
    payload: Result<Json<ObtainPairRequest>, JsonRejection>,
) -> Result<Json<TokenPairBody>, ApiError> {
    let Json(request) = payload?;
    let pair = state
        .auth
        .obtain_pair(&request.username, &request.password)
        .await?;
    Ok(Json(TokenPairBody {
        access: pair.access.token,
        refresh: pair.refresh.token,
        access_expires_at: pair.access.expires_at,
    }))
}

pub(super) async fn refresh(
    State(state): State<AppState>,
    payload: Result<Json<RefreshRequest>, JsonRejection>,
) -> Result<Json<AccessTokenBody>, ApiError> {
    let Json(request) = payload?;
    let access = state.auth.refresh(&request.refresh).await?;
    Ok(Json(AccessTokenBody {
        access: access.token,
        access_expires_at: access.expires_at,
    }))
}
