//! Bearer credential extractor.

use super::{ApiError, AppState, CREDENTIALS_MISSING_MESSAGE, error::not_found};
use crate::identity::domain::Caller;
use axum::{
    extract::{FromRequestParts, Path},
    http::{HeaderMap, header, request::Parts},
};
use tracing::debug;

const BEARER_PREFIX: &str = "Bearer ";

impl FromRequestParts<AppState> for Caller {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .ok_or_else(|| ApiError::Unauthenticated(CREDENTIALS_MISSING_MESSAGE.to_owned()))?;
        Ok(state.auth.authenticate(token).await?)
    }
}

/// Numeric record identifier taken from the `{id}` path segment.
///
/// Segments that are not an `i64` read as a missing record.
pub(super) struct RecordId(pub(super) i64);

impl<S: Send + Sync> FromRequestParts<S> for RecordId {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                debug!(%rejection, "unparseable record id");
                not_found()
            })?;
        Ok(Self(id))
    }
}

/// Returns the token of an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
