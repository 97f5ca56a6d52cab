//! Process configuration read once from the environment at start-up.

use crate::auth::TokenSettings;
use chrono::TimeDelta;
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use thiserror::Error;

/// Signing secret used when `SECRET_KEY` is unset. Development only.
pub const INSECURE_DEFAULT_SECRET: &str = "taskflow-insecure-dev-key-change-this";

const DEFAULT_BIND: &str = "0.0.0.0:8000";
const DEFAULT_FROM_EMAIL: &str = "webmaster@localhost";
const DEFAULT_PAGE_SIZE: u32 = 10;

/// Longest accepted token lifetime: ten 365-day years.
pub const MAX_TOKEN_LIFETIME_SECS: i64 = 10 * 365 * 24 * 60 * 60;

/// Outbound mail transport selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailBackend {
    /// Write messages to the log.
    Log,
    /// Deliver through Amazon SES.
    Ses,
}

impl FromStr for EmailBackend {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "log" | "console" => Ok(Self::Log),
            "ses" => Ok(Self::Ses),
            _ => Err("expected `log` or `ses`".to_owned()),
        }
    }
}

/// Credentials of the staff account ensured at start-up.
#[derive(Clone, PartialEq, Eq)]
pub struct AdminBootstrap {
    /// Staff username.
    pub username: String,
    /// Staff password.
    pub password: String,
}

impl std::fmt::Debug for AdminBootstrap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminBootstrap")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Errors raised for malformed configuration values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable holds a value that cannot be parsed.
    #[error("invalid value for {key}: {reason}")]
    Invalid {
        /// Environment variable name.
        key: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
    /// Only one of a pair of required-together variables is set.
    #[error("{present} is set but {missing} is not")]
    Incomplete {
        /// The variable that is set.
        present: &'static str,
        /// The variable that is missing.
        missing: &'static str,
    },
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Listen address (`TASKFLOW_BIND`).
    pub bind: SocketAddr,
    /// `PostgreSQL` URL (`DATABASE_URL`); the in-memory store is used when
    /// absent.
    pub database_url: Option<String>,
    /// Token signing secret and lifetimes (`SECRET_KEY`,
    /// `ACCESS_TOKEN_LIFETIME_SECS`, `REFRESH_TOKEN_LIFETIME_SECS`).
    pub tokens: TokenSettings,
    /// Sender and recipient of contact mail (`DEFAULT_FROM_EMAIL`).
    pub default_from_email: String,
    /// Mail transport (`EMAIL_BACKEND`).
    pub email_backend: EmailBackend,
    /// Task listing page size (`PAGE_SIZE`).
    pub page_size: u32,
    /// Allowed CORS origins (`CORS_ALLOWED_ORIGINS`, comma separated); any
    /// origin is allowed when empty.
    pub cors_allowed_origins: Vec<String>,
    /// bcrypt work factor (`BCRYPT_COST`).
    pub bcrypt_cost: u32,
    /// Staff account ensured at start-up (`TASKFLOW_ADMIN_USERNAME`,
    /// `TASKFLOW_ADMIN_PASSWORD`).
    pub admin: Option<AdminBootstrap>,
}

impl AppConfig {
    /// Reads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which returns the raw value of
    /// a variable if set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a value is malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let bind = parse_or("TASKFLOW_BIND", read("TASKFLOW_BIND"), DEFAULT_BIND.parse())?;
        let secret = read("SECRET_KEY").unwrap_or_else(|| INSECURE_DEFAULT_SECRET.to_owned());
        let mut tokens = TokenSettings::new(secret);
        let access_key = "ACCESS_TOKEN_LIFETIME_SECS";
        if let Some(lifetime) = parse_seconds(access_key, read(access_key))? {
            tokens.access_lifetime = lifetime;
        }
        let refresh_key = "REFRESH_TOKEN_LIFETIME_SECS";
        if let Some(lifetime) = parse_seconds(refresh_key, read(refresh_key))? {
            tokens.refresh_lifetime = lifetime;
        }

        let email_backend = read("EMAIL_BACKEND")
            .map(|raw| {
                raw.parse::<EmailBackend>()
                    .map_err(|reason| ConfigError::Invalid {
                        key: "EMAIL_BACKEND",
                        reason,
                    })
            })
            .transpose()?
            .unwrap_or(EmailBackend::Log);

        let page_size = parse_or("PAGE_SIZE", read("PAGE_SIZE"), Ok(DEFAULT_PAGE_SIZE))?;
        if page_size == 0 {
            return Err(invalid("PAGE_SIZE", "must be at least 1"));
        }

        let bcrypt_cost = parse_or("BCRYPT_COST", read("BCRYPT_COST"), Ok(bcrypt::DEFAULT_COST))?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(invalid("BCRYPT_COST", "must be between 4 and 31"));
        }

        let cors_allowed_origins = read("CORS_ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default();

        let admin = match (read("TASKFLOW_ADMIN_USERNAME"), read("TASKFLOW_ADMIN_PASSWORD")) {
            (Some(username), Some(password)) => Some(AdminBootstrap { username, password }),
            (None, None) => None,
            (Some(_), None) => {
                return Err(ConfigError::Incomplete {
                    present: "TASKFLOW_ADMIN_USERNAME",
                    missing: "TASKFLOW_ADMIN_PASSWORD",
                });
            }
            (None, Some(_)) => {
                return Err(ConfigError::Incomplete {
                    present: "TASKFLOW_ADMIN_PASSWORD",
                    missing: "TASKFLOW_ADMIN_USERNAME",
                });
            }
        };

        Ok(Self {
            bind,
            database_url: read("DATABASE_URL"),
            tokens,
            default_from_email: read("DEFAULT_FROM_EMAIL")
                .unwrap_or_else(|| DEFAULT_FROM_EMAIL.to_owned()),
            email_backend,
            page_size,
            cors_allowed_origins,
            bcrypt_cost,
            admin,
        })
    }

    /// Returns `true` when tokens are signed with the built-in development
    /// secret.
    #[must_use]
    pub fn uses_insecure_secret(&self) -> bool {
        self.tokens.secret == INSECURE_DEFAULT_SECRET
    }
}

fn invalid(key: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        key,
        reason: reason.to_owned(),
    }
}

fn parse_or<T>(
    key: &'static str,
    raw: Option<String>,
    default: Result<T, T::Err>,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.map_or(default, |value| value.parse::<T>())
        .map_err(|err| ConfigError::Invalid {
            key,
            reason: err.to_string(),
        })
}

fn parse_seconds(
    key: &'static str,
    raw: Option<String>,
) -> Result<Option<TimeDelta>, ConfigError> {
    let Some(value) = raw else {
        return Ok(None);
    };
    let secs = value.parse::<i64>().map_err(|err| ConfigError::Invalid {
        key,
        reason: err.to_string(),
    })?;
    if secs <= 0 {
        return Err(invalid(key, "must be a positive number of seconds"));
    }
    if secs > MAX_TOKEN_LIFETIME_SECS {
        return Err(invalid(key, "must not exceed ten years"));
    }
    TimeDelta::try_seconds(secs)
        .map(Some)
        .ok_or_else(|| invalid(key, "out of range"))
}
