//! Shared helpers for router-level tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use rstest::fixture;
use serde_json::{Value, json};
use taskflow::auth::TokenSettings;
use taskflow::contact::{
    domain::OutboundMail,
    ports::{Mailer, MailerError},
};
use taskflow::http::{AppState, Backends, router};
use taskflow::identity::adapters::{
    hasher::BcryptPasswordHasher, memory::InMemoryIdentityRepository,
};
use taskflow::task::adapters::memory::InMemoryTaskRepository;
use tower::ServiceExt;

/// Password used by every test account.
pub const PASSWORD: &str = "correct horse battery staple";

/// Mailbox that sends and receives contact mail.
pub const MAILBOX: &str = "webmaster@localhost";

/// Records outbound mail instead of delivering it.
#[derive(Debug, Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<OutboundMail>>,
    pub fail: bool,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, mail: &OutboundMail) -> Result<(), MailerError> {
        if self.fail {
            return Err(MailerError::transport(std::io::Error::other(
                "connection refused",
            )));
        }
        self.sent
            .lock()
            .map_err(|_| MailerError::InvalidMessage("mailer lock poisoned".to_owned()))?
            .push(mail.clone());
        Ok(())
    }
}

/// A router over fresh in-memory stores.
pub struct TestApp {
    pub state: AppState,
    pub router: Router,
    pub mailer: Arc<RecordingMailer>,
}

/// A decoded response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// Provides an application with a working mailer.
#[fixture]
pub fn app() -> TestApp {
    TestApp::new(RecordingMailer::default())
}

impl TestApp {
    /// Builds an application delivering contact mail to `mailer`.
    #[must_use]
    pub fn new(recorder: RecordingMailer) -> Self {
        let mailer = Arc::new(recorder);
        let state = AppState::new(
            Backends {
                identities: Arc::new(InMemoryIdentityRepository::new()),
                tasks: Arc::new(InMemoryTaskRepository::new()),
                hasher: Arc::new(BcryptPasswordHasher::new(4)),
                mailer: Arc::clone(&mailer) as Arc<dyn Mailer>,
            },
            &TokenSettings::new("router-test-secret"),
            MAILBOX,
            10,
        );
        Self {
            router: router(state.clone(), &[]),
            state,
            mailer,
        }
    }

    /// Sends one request and decodes the JSON response body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be built or the body is not
    /// JSON.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Result<TestResponse, eyre::Report> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(bearer) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {bearer}"));
        }
        let request = match body {
            Some(payload) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))?,
            None => builder.body(Body::empty())?,
        };
        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;
        let decoded = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };
        Ok(TestResponse {
            status,
            body: decoded,
        })
    }

    /// Registers a member through the API.
    ///
    /// # Errors
    ///
    /// Returns an error unless registration answers 201.
    pub async fn register(&self, username: &str) -> Result<Value, eyre::Report> {
        let response = self
            .send(
                Method::POST,
                "/users/register",
                None,
                Some(json!({
                    "username": username,
                    "email": format!("{username}@example.com"),
                    "password": PASSWORD,
                    "consent_given": true,
                })),
            )
            .await?;
        eyre::ensure!(
            response.status == StatusCode::CREATED,
            "registration failed: {response:?}"
        );
        Ok(response.body)
    }

    /// Obtains an access token for `username`.
    ///
    /// # Errors
    ///
    /// Returns an error unless the token endpoint answers 200.
    pub async fn login(&self, username: &str) -> Result<String, eyre::Report> {
        let response = self
            .send(
                Method::POST,
                "/token",
                None,
                Some(json!({ "username": username, "password": PASSWORD })),
            )
            .await?;
        eyre::ensure!(response.status == StatusCode::OK, "login failed: {response:?}");
        response.body["access"]
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| eyre::eyre!("missing access token in {response:?}"))
    }

    /// Registers `username` and returns its access token.
    ///
    /// # Errors
    ///
    /// Returns an error if registration or login fails.
    pub async fn member(&self, username: &str) -> Result<String, eyre::Report> {
        self.register(username).await?;
        self.login(username).await
    }

    /// Bootstraps a staff account named `admin` and returns its access token.
    ///
    /// # Errors
    ///
    /// Returns an error if the bootstrap or login fails.
    pub async fn staff(&self) -> Result<String, eyre::Report> {
        self.state
            .administration()
            .ensure_staff("admin", PASSWORD)
            .await?;
        self.login("admin").await
    }

    /// Creates a task and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns an error unless creation answers 201.
    pub async fn create_task(&self, token: &str, description: &str) -> Result<i64, eyre::Report> {
        let response = self
            .send(
                Method::POST,
                "/tasks",
                Some(token),
                Some(json!({ "description": description })),
            )
            .await?;
        eyre::ensure!(
            response.status == StatusCode::CREATED,
            "task creation failed: {response:?}"
        );
        response.body["id"]
            .as_i64()
            .ok_or_else(|| eyre::eyre!("missing task id in {response:?}"))
    }
}
