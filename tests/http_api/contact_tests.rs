//! Contact endpoint tests.

use super::helpers::{MAILBOX, RecordingMailer, TestApp, app};
use axum::http::{Method, StatusCode};
use rstest::rstest;
use serde_json::json;

fn submission() -> serde_json::Value {
    json!({
        "name": "  john smith ",
        "email": "john@example.com",
        "subject": "Hello there",
        "message": "I would like to know more about taskflow.",
    })
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn valid_submissions_are_relayed(app: TestApp) -> Result<(), eyre::Report> {
    let response = app
        .send(Method::POST, "/contact", None, Some(submission()))
        .await?;

    eyre::ensure!(response.status == StatusCode::OK, "{response:?}");
    eyre::ensure!(
        response.body == json!({ "success": "Message sent successfully!" }),
        "{response:?}"
    );

    let sent = app
        .mailer
        .sent
        .lock()
        .map_err(|_| eyre::eyre!("mailer lock poisoned"))?
        .clone();
    let mail = sent
        .first()
        .ok_or_else(|| eyre::eyre!("no mail was sent"))?;
    eyre::ensure!(sent.len() == 1, "expected one mail, found {}", sent.len());
    eyre::ensure!(mail.from == MAILBOX && mail.to == vec![MAILBOX.to_owned()], "{mail:?}");
    eyre::ensure!(mail.subject == "Contact Form: Hello there", "{mail:?}");
    eyre::ensure!(
        mail.body
            == "From: John Smith <john@example.com>\n\nMessage:\nI would like to know more about taskflow.",
        "{mail:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_submissions_report_every_field(app: TestApp) -> Result<(), eyre::Report> {
    let response = app
        .send(
            Method::POST,
            "/contact",
            None,
            Some(json!({
                "name": "John123",
                "email": "john",
                "subject": "Hi",
                "message": "Too short",
            })),
        )
        .await?;

    eyre::ensure!(response.status == StatusCode::BAD_REQUEST, "{response:?}");
    eyre::ensure!(
        response.body["name"] == json!(["Name should contain only letters and spaces"]),
        "{response:?}"
    );
    for field in ["email", "subject", "message"] {
        eyre::ensure!(response.body[field].is_array(), "{field} missing: {response:?}");
    }
    let nothing_sent = app
        .mailer
        .sent
        .lock()
        .map_err(|_| eyre::eyre!("mailer lock poisoned"))?
        .is_empty();
    eyre::ensure!(nothing_sent, "invalid submissions must not be sent");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn transport_failures_are_server_errors() -> Result<(), eyre::Report> {
    let failing = TestApp::new(RecordingMailer {
        fail: true,
        ..RecordingMailer::default()
    });

    let response = failing
        .send(Method::POST, "/contact", None, Some(submission()))
        .await?;

    eyre::ensure!(
        response.status == StatusCode::INTERNAL_SERVER_ERROR,
        "{response:?}"
    );
    eyre::ensure!(
        response.body["error"]
            .as_str()
            .is_some_and(|message| message.contains("connection refused")),
        "{response:?}"
    );
    Ok(())
}
