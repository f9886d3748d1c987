//! Request gate in front of every page.
//!
//! Resolve the session token, ask the policy, then pass the request through,
//! redirect it, or block it. A verified identity is attached to the request
//! extensions for the handlers downstream.

use axum::{
    extract::{Extension, Request},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tracing::debug;

use super::AuthState;
use crate::auth::{
    decide,
    session::{extract_session_token, now_unix_seconds},
    Decision, Identity,
};

/// Resolve the identity carried by the request, if any.
///
/// Invalid or expired tokens are treated as anonymous.
pub(crate) fn session_identity(auth_state: &AuthState, request: &Request) -> Option<Identity> {
    let token = extract_session_token(request.headers())?;
    match auth_state.keys().validate(&token, now_unix_seconds()) {
        Ok(claims) => Some(claims.identity()),
        Err(err) => {
            debug!("Ignoring session token: {err}");
            None
        }
    }
}

pub(crate) async fn authorize(
    Extension(auth_state): Extension<Arc<AuthState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let identity = session_identity(&auth_state, &request);
    let decision = decide(identity.is_some(), request.uri().path());

    match decision {
        Decision::Allow => {
            if let Some(identity) = identity {
                request.extensions_mut().insert(identity);
            }
            next.run(request).await
        }
        Decision::RedirectTo(target) => Redirect::to(target).into_response(),
        Decision::Deny => StatusCode::UNAUTHORIZED.into_response(),
    }
}
