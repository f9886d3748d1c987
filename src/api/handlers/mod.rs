//! Route handlers and the form/validation helpers they share.

pub mod dashboard;
pub mod health;
pub mod login;
pub mod logout;
pub mod register;

use axum::http::{header::LOCATION, header::SET_COOKIE, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use regex::Regex;
use serde::Deserialize;
use tracing::error;
use utoipa::ToSchema;

use super::AuthState;
use crate::auth::{
    session::{now_unix_seconds, session_cookie},
    Identity,
};

pub const MIN_PASSWORD_LEN: usize = 6;

/// Form-encoded `{email, password}` pair posted by the sign-in and sign-up
/// pages. Missing fields deserialize as empty strings so they fail closed.
#[derive(ToSchema, Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for CredentialsForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsForm")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Basic email format check on already-normalized input.
pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|re| re.is_match(email))
}

pub fn valid_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
}

pub async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// Issue a session for `identity` and redirect to the dashboard.
pub(crate) fn start_session(auth_state: &AuthState, identity: &Identity) -> Response {
    let token = match auth_state.keys().issue(
        identity,
        now_unix_seconds(),
        auth_state.config().ttl_seconds(),
    ) {
        Ok(token) => token,
        Err(err) => {
            error!("Failed to issue session token: {err}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let cookie = match session_cookie(auth_state.config(), &token) {
        Ok(cookie) => cookie,
        Err(err) => {
            error!("Failed to build session cookie: {err}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie);
    headers.insert(LOCATION, HeaderValue::from_static("/"));
    (StatusCode::SEE_OTHER, headers).into_response()
}
