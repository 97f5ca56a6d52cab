//! Runs the taskflow HTTP API.
//!
//! Configuration is read from the environment; see
//! [`AppConfig`](taskflow::config::AppConfig). Without `DATABASE_URL` the
//! server keeps all data in memory and loses it on exit.

use std::sync::Arc;
use taskflow::config::{AppConfig, EmailBackend};
use taskflow::contact::{
    adapters::{LogMailer, SesMailer},
    ports::Mailer,
};
use taskflow::database;
use taskflow::http::{AppState, Backends, router};
use taskflow::identity::{
    adapters::{
        hasher::BcryptPasswordHasher,
        memory::InMemoryIdentityRepository,
        postgres::PostgresIdentityRepository,
    },
    ports::{IdentityRepository, PasswordHasher},
};
use taskflow::task::{
    adapters::{memory::InMemoryTaskRepository, postgres::PostgresTaskRepository},
    ports::TaskRepository,
};
use taskflow::telemetry;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

type Stores = (Arc<dyn IdentityRepository>, Arc<dyn TaskRepository>);

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    telemetry::init()?;
    let config = AppConfig::from_env()?;
    if config.uses_insecure_secret() {
        warn!("SECRET_KEY is not set; tokens are signed with a development secret");
    }

    let (identities, tasks) = match config.database_url.as_deref() {
        Some(url) => postgres_stores(url).await?,
        None => {
            warn!("DATABASE_URL is not set; data is kept in memory");
            in_memory_stores()
        }
    };
    let hasher: Arc<dyn PasswordHasher> = Arc::new(BcryptPasswordHasher::new(config.bcrypt_cost));
    let mailer = mailer(config.email_backend).await;

    let state = AppState::new(
        Backends {
            identities,
            tasks,
            hasher,
            mailer,
        },
        &config.tokens,
        config.default_from_email.clone(),
        config.page_size,
    );

    if let Some(admin) = &config.admin {
        let staff = state
            .administration()
            .ensure_staff(&admin.username, &admin.password)
            .await?;
        info!(username = %staff.username(), "staff account ready");
    }

    let listener = TcpListener::bind(config.bind).await?;
    info!(address = %config.bind, "taskflow listening");
    axum::serve(listener, router(state, &config.cors_allowed_origins))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("taskflow stopped");
    Ok(())
}

async fn postgres_stores(url: &str) -> Result<Stores, BoxError> {
    let pool = database::connect(url).await?;
    Ok((
        Arc::new(PostgresIdentityRepository::new(pool.clone())),
        Arc::new(PostgresTaskRepository::new(pool)),
    ))
}

fn in_memory_stores() -> Stores {
    (
        Arc::new(InMemoryIdentityRepository::new()),
        Arc::new(InMemoryTaskRepository::new()),
    )
}

async fn mailer(backend: EmailBackend) -> Arc<dyn Mailer> {
    match backend {
        EmailBackend::Log => Arc::new(LogMailer),
        EmailBackend::Ses => Arc::new(SesMailer::from_env().await),
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
