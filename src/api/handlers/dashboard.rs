use axum::{
    extract::Extension,
    response::{IntoResponse, Redirect, Response},
};

use crate::{
    api::pages,
    auth::{policy::LOGIN_PATH, Identity},
};

/// Dashboard page. The authorization middleware only lets signed-in requests
/// through; a missing identity still falls back to the sign-in page.
pub async fn dashboard(identity: Option<Extension<Identity>>) -> Response {
    match identity {
        Some(Extension(identity)) => pages::dashboard(&identity.email).into_response(),
        None => Redirect::to(LOGIN_PATH).into_response(),
    }
}
