use crate::{
    api::{self, AuthState},
    auth::{SessionConfig, SessionKeys},
    cli::telemetry,
    store::PgAccountStore,
};
use anyhow::{Context, Result};
use secrecy::{ExposeSecret, SecretString};
use sqlx::postgres::PgPoolOptions;
use std::{sync::Arc, time::Duration};
use tracing::info;
use url::Url;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub dsn: String,
    pub session_secret: SecretString,
    pub session_ttl_seconds: i64,
    pub cookie_secure: bool,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the database is unreachable, the session secret is rejected,
/// or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    info!(
        port = args.port,
        dsn = %redact_dsn(&args.dsn),
        session_ttl_seconds = args.session_ttl_seconds,
        cookie_secure = args.cookie_secure,
        "Startup configuration"
    );

    let keys = SessionKeys::new(args.session_secret.expose_secret().as_bytes())
        .context("Invalid session secret")?;
    let config = SessionConfig::new()
        .with_ttl_seconds(args.session_ttl_seconds)
        .with_cookie_secure(args.cookie_secure);

    let pool = PgPoolOptions::new()
        .min_connections(1)
        .max_connections(5)
        .max_lifetime(Duration::from_secs(60 * 2))
        .test_before_acquire(true)
        .connect(&args.dsn)
        .await
        .context("Failed to connect to database")?;

    let store = Arc::new(PgAccountStore::new(pool));
    let auth_state = Arc::new(AuthState::new(store, keys, config));

    let result = api::new(args.port, auth_state).await;

    telemetry::shutdown_tracer();

    result
}

fn redact_dsn(dsn: &str) -> String {
    match Url::parse(dsn) {
        Ok(mut parsed) => {
            if parsed.password().is_some() {
                let _ = parsed.set_password(Some("REDACTED"));
            }
            parsed.to_string()
        }
        Err(_) => "invalid-dsn".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redact_dsn_hides_password() {
        let redacted = redact_dsn("postgres://app:hunter2@db:5432/gatehouse");
        assert_eq!(redacted, "postgres://app:REDACTED@db:5432/gatehouse");
    }

    #[test]
    fn redact_dsn_without_password_is_unchanged() {
        let redacted = redact_dsn("postgres://app@db:5432/gatehouse");
        assert_eq!(redacted, "postgres://app@db:5432/gatehouse");
    }

    #[test]
    fn redact_dsn_invalid() {
        assert_eq!(redact_dsn("not a url"), "invalid-dsn");
    }
}
