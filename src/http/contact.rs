//! Public contact-form endpoint.

use super::{ApiError, AppState};
use crate::contact::domain::ContactSubmission;
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};

const SUCCESS_MESSAGE: &str = "Message sent successfully!";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct ContactRequest {
    name: String,
    email: String,
    subject: String,
    message: String,
}

#[derive(Debug, Serialize)]
pub(super) struct ContactAccepted {
    success: &'static str,
}

pub(super) async fn submit(
    State(state): State<AppState>,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> Result<Json<ContactAccepted>, ApiError> {
    let Json(request) = payload?;
    state
        .contact
        .submit(ContactSubmission {
            name: request.name,
            email: request.email,
            subject: request.subject,
            message: request.message,
        })
        .await?;
    Ok(Json(ContactAccepted {
        success: SUCCESS_MESSAGE,
    }))
}
