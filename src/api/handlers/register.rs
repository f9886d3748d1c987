use axum::{
    extract::{Extension, Form},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

use super::{start_session, valid_email, valid_password, CredentialsForm};
use crate::{
    api::{
        pages::{auth_form, AuthForm},
        AuthState,
    },
    auth::{credentials::normalize_email, password::hash_password, Identity},
    store::CreateAccountError,
};

pub const INVALID_SUBMISSION: &str = "Failed validating your submission!";
pub const ACCOUNT_EXISTS: &str = "Account already exists!";
pub const CREATE_FAILED: &str = "Failed to create account!";

pub async fn register_page() -> impl IntoResponse {
    auth_form(AuthForm::SignUp, None, "")
}

#[utoipa::path(
    post,
    path = "/register",
    request_body(content = CredentialsForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Account created and signed in; redirect to the dashboard"),
        (status = 409, description = "An account with this email already exists", content_type = "text/html"),
        (status = 422, description = "Invalid email or password too short", content_type = "text/html"),
        (status = 500, description = "Account could not be created", content_type = "text/html")
    ),
    tag = "auth"
)]
#[instrument(skip(auth_state))]
pub async fn register(
    auth_state: Extension<Arc<AuthState>>,
    Form(form): Form<CredentialsForm>,
) -> Response {
    let email = normalize_email(&form.email);
    let failure = |status: StatusCode, message: &str| {
        (status, auth_form(AuthForm::SignUp, Some(message), &form.email)).into_response()
    };

    if !valid_email(&email) || !valid_password(&form.password) {
        debug!("Invalid registration payload");
        return failure(StatusCode::UNPROCESSABLE_ENTITY, INVALID_SUBMISSION);
    }

    let password_hash = match hash_password(&form.password) {
        Ok(hash) => hash,
        Err(err) => {
            error!("Error hashing password: {err:?}");
            return failure(StatusCode::INTERNAL_SERVER_ERROR, CREATE_FAILED);
        }
    };

    match auth_state.store().create_account(&email, &password_hash).await {
        Ok(account) => {
            info!(user_id = %account.id, "Account created");
            let identity = Identity {
                id: account.id,
                email: account.email,
            };
            start_session(&auth_state, &identity)
        }
        Err(CreateAccountError::AccountExists) => {
            debug!("Account already exists");
            failure(StatusCode::CONFLICT, ACCOUNT_EXISTS)
        }
        Err(CreateAccountError::Store(err)) => {
            error!("Error creating account: {err:?}");
            failure(StatusCode::INTERNAL_SERVER_ERROR, CREATE_FAILED)
        }
    }
}
