use clap::{Arg, ArgAction, ArgMatches, Command};
use secrecy::{ExposeSecret, SecretString};

use crate::auth::session::{DEFAULT_SESSION_TTL_SECONDS, MIN_SECRET_LEN};

pub const ARG_SESSION_SECRET: &str = "session-secret";
pub const ARG_SESSION_TTL_SECONDS: &str = "session-ttl-seconds";
pub const ARG_COOKIE_SECURE: &str = "cookie-secure";

#[derive(Debug)]
pub struct Options {
    pub secret: SecretString,
    pub ttl_seconds: i64,
    pub cookie_secure: bool,
}

impl Options {
    /// Parse session arguments from matches.
    ///
    /// # Errors
    /// Returns an error if the secret is missing or too short, or the TTL is not positive.
    pub fn parse(matches: &ArgMatches) -> anyhow::Result<Self> {
        let secret = matches
            .get_one::<String>(ARG_SESSION_SECRET)
            .cloned()
            .filter(|v| !v.trim().is_empty())
            .map(SecretString::from)
            .ok_or_else(|| anyhow::anyhow!("missing required argument: --{ARG_SESSION_SECRET}"))?;

        if secret.expose_secret().len() < MIN_SECRET_LEN {
            anyhow::bail!("--{ARG_SESSION_SECRET} must be at least {MIN_SECRET_LEN} bytes");
        }

        let ttl_seconds = matches
            .get_one::<i64>(ARG_SESSION_TTL_SECONDS)
            .copied()
            .unwrap_or(DEFAULT_SESSION_TTL_SECONDS);
        if ttl_seconds <= 0 {
            anyhow::bail!("--{ARG_SESSION_TTL_SECONDS} must be greater than zero");
        }

        Ok(Self {
            secret,
            ttl_seconds,
            cookie_secure: matches.get_flag(ARG_COOKIE_SECURE),
        })
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_SESSION_SECRET)
                .long(ARG_SESSION_SECRET)
                .help("Secret used to sign session tokens (at least 32 bytes)")
                .env("GATEHOUSE_SESSION_SECRET")
                .hide_env_values(true)
                .required(true),
        )
        .arg(
            Arg::new(ARG_SESSION_TTL_SECONDS)
                .long(ARG_SESSION_TTL_SECONDS)
                .help("Session lifetime in seconds")
                .env("GATEHOUSE_SESSION_TTL_SECONDS")
                .default_value("2592000")
                .value_parser(clap::value_parser!(i64)),
        )
        .arg(
            Arg::new(ARG_COOKIE_SECURE)
                .long(ARG_COOKIE_SECURE)
                .help("Mark the session cookie Secure (serve over HTTPS)")
                .env("GATEHOUSE_COOKIE_SECURE")
                .action(ArgAction::SetTrue),
        )
}
