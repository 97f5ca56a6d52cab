//! Route table and middleware stack.

use super::{AppState, contact, tasks, token, users};
use axum::{
    Json, Router,
    http::HeaderValue,
    routing::{get, post},
};
use serde_json::{Value, json};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

/// Builds the application router.
///
/// Any origin is allowed when `allowed_origins` is empty.
#[must_use]
pub fn router(state: AppState, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/token", post(token::obtain_pair))
        .route("/token/refresh", post(token::refresh))
        .route("/contact", post(contact::submit))
        .route("/users/register", post(users::register))
        .route("/users/me", get(users::me))
        .route("/users", get(users::list).post(users::create))
        .route(
            "/users/{id}",
            get(users::retrieve).put(users::update).delete(users::destroy),
        )
        .route("/tasks", get(tasks::list).post(tasks::create))
        .route(
            "/tasks/{id}",
            get(tasks::retrieve)
                .put(tasks::replace)
                .patch(tasks::patch)
                .delete(tasks::destroy),
        )
        .route("/tasks/{id}/mark_complete", post(tasks::mark_complete))
        .route("/tasks/{id}/mark_pending", post(tasks::mark_pending))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if allowed_origins.is_empty() {
        return layer.allow_origin(Any);
    }
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| {
            HeaderValue::from_str(origin)
                .inspect_err(|_| warn!(origin = %origin, "ignoring malformed CORS origin"))
                .ok()
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}
