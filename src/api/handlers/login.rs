use axum::{
    extract::{Extension, Form},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{error, info, instrument};

use super::{start_session, CredentialsForm};
use crate::{
    api::{
        pages::{auth_form, AuthForm},
        AuthState,
    },
    auth::credentials::verify,
};

pub const INVALID_CREDENTIALS: &str = "Invalid credentials!";

pub async fn login_page() -> impl IntoResponse {
    auth_form(AuthForm::SignIn, None, "")
}

#[utoipa::path(
    post,
    path = "/login",
    request_body(content = CredentialsForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Signed in; session cookie set, redirect to the dashboard"),
        (status = 401, description = "Invalid credentials", content_type = "text/html"),
        (status = 500, description = "Account store unavailable")
    ),
    tag = "auth"
)]
#[instrument(skip(auth_state))]
pub async fn login(
    auth_state: Extension<Arc<AuthState>>,
    Form(form): Form<CredentialsForm>,
) -> Response {
    match verify(auth_state.store(), &form.email, &form.password).await {
        Ok(Some(identity)) => {
            info!(user_id = %identity.id, "Login successful");
            start_session(&auth_state, &identity)
        }
        Ok(None) => (
            StatusCode::UNAUTHORIZED,
            auth_form(AuthForm::SignIn, Some(INVALID_CREDENTIALS), &form.email),
        )
            .into_response(),
        Err(err) => {
            error!("Error verifying credentials: {err:?}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
