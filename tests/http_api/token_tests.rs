//! Token endpoint tests.

use super::helpers::{PASSWORD, TestApp, app};
use axum::http::{Method, StatusCode};
use rstest::rstest;
use serde_json::json;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn health_is_public(app: TestApp) -> Result<(), eyre::Report> {
    let response = app.send(Method::GET, "/health", None, None).await?;
    eyre::ensure!(response.status == StatusCode::OK, "{response:?}");
    eyre::ensure!(response.body["status"] == "ok", "{response:?}");
    Ok(())
}

#[rstest]
#[case("alice", "wrong password")]
#[case("nobody", PASSWORD)]
#[case("", "")]
#[tokio::test(flavor = "multi_thread")]
async fn bad_credentials_are_unauthorized(
    app: TestApp,
    #[case] username: &str,
    #[case] password: &str,
) -> Result<(), eyre::Report> {
    app.register("alice").await?;

    let response = app
        .send(
            Method::POST,
            "/token",
            None,
            Some(json!({ "username": username, "password": password })),
        )
        .await?;

    eyre::ensure!(response.status == StatusCode::UNAUTHORIZED, "{response:?}");
    eyre::ensure!(
        response.body["detail"] == "No active account found with the given credentials",
        "{response:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn refresh_tokens_only_refresh(app: TestApp) -> Result<(), eyre::Report> {
    app.register("alice").await?;
    let pair = app
        .send(
            Method::POST,
            "/token",
            None,
            Some(json!({ "username": "alice", "password": PASSWORD })),
        )
        .await?;
    eyre::ensure!(pair.status == StatusCode::OK, "{pair:?}");
    eyre::ensure!(pair.body["access_expires_at"].is_string(), "{pair:?}");
    let access = pair.body["access"]
        .as_str()
        .ok_or_else(|| eyre::eyre!("missing access token"))?;
    let refresh = pair.body["refresh"]
        .as_str()
        .ok_or_else(|| eyre::eyre!("missing refresh token"))?;

    let as_bearer = app.send(Method::GET, "/tasks", Some(refresh), None).await?;
    eyre::ensure!(as_bearer.status == StatusCode::UNAUTHORIZED, "{as_bearer:?}");

    let wrong_kind = app
        .send(
            Method::POST,
            "/token/refresh",
            None,
            Some(json!({ "refresh": access })),
        )
        .await?;
    eyre::ensure!(wrong_kind.status == StatusCode::UNAUTHORIZED, "{wrong_kind:?}");

    let renewed = app
        .send(
            Method::POST,
            "/token/refresh",
            None,
            Some(json!({ "refresh": refresh })),
        )
        .await?;
    eyre::ensure!(renewed.status == StatusCode::OK, "{renewed:?}");
    let fresh = renewed.body["access"]
        .as_str()
        .ok_or_else(|| eyre::eyre!("missing refreshed access token"))?;

    let listing = app.send(Method::GET, "/tasks", Some(fresh), None).await?;
    eyre::ensure!(listing.status == StatusCode::OK, "{listing:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn malformed_bodies_are_bad_requests(app: TestApp) -> Result<(), eyre::Report> {
    let response = app
        .send(Method::POST, "/token", None, Some(json!("not an object")))
        .await?;
    eyre::ensure!(response.status == StatusCode::BAD_REQUEST, "{response:?}");
    eyre::ensure!(response.body["detail"].is_string(), "{response:?}");
    Ok(())
}
