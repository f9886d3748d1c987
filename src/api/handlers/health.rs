use axum::{
    extract::Extension,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;

use crate::{api::AuthState, GIT_COMMIT_HASH};

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct Health {
    commit: String,
    name: String,
    version: String,
    database: String,
}

#[utoipa::path(
    get,
    path= "/health",
    responses (
        (status = 200, description = "Account store is reachable", body = [Health]),
        (status = 503, description = "Account store is unreachable", body = [Health])
    ),
    tag= "health"
)]
// axum handler for health
pub async fn health(auth_state: Extension<Arc<AuthState>>) -> impl IntoResponse {
    let database = match auth_state.store().ping().await {
        Ok(()) => Ok(()),
        Err(err) => {
            error!("Account store health check failed: {err:?}");
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    };

    let health = Health {
        commit: GIT_COMMIT_HASH.to_string(),
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: if database.is_ok() {
            "ok".to_string()
        } else {
            "error".to_string()
        },
    };

    let short_hash = GIT_COMMIT_HASH.get(0..7).unwrap_or("");

    let mut headers = HeaderMap::new();
    let app = format!(
        "{}:{}:{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        short_hash
    );
    if let Ok(value) = HeaderValue::from_str(&app) {
        headers.insert("x-app", value);
    }

    let status = database.map_or_else(|status| status, |()| StatusCode::OK);

    (status, headers, Json(health))
}
