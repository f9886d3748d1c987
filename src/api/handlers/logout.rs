use axum::{
    extract::Extension,
    http::{
        header::{LOCATION, SET_COOKIE},
        HeaderMap, HeaderValue, StatusCode,
    },
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::error;

use crate::{
    api::AuthState,
    auth::{policy::LOGIN_PATH, session::clear_session_cookie},
};

#[utoipa::path(
    post,
    path = "/logout",
    responses(
        (status = 303, description = "Session cookie cleared, redirect to the sign-in page"),
        (status = 401, description = "No active session")
    ),
    tag = "auth"
)]
pub async fn logout(auth_state: Extension<Arc<AuthState>>) -> impl IntoResponse {
    // Tokens are stateless; signing out means dropping the cookie.
    let mut headers = HeaderMap::new();
    match clear_session_cookie(auth_state.config()) {
        Ok(cookie) => {
            headers.insert(SET_COOKIE, cookie);
        }
        Err(err) => error!("Failed to build session cookie: {err}"),
    }
    headers.insert(LOCATION, HeaderValue::from_static(LOGIN_PATH));
    (StatusCode::SEE_OTHER, headers)
}
