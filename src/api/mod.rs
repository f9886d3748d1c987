use crate::{
    auth::{SessionConfig, SessionKeys},
    store::AccountStore,
};
use anyhow::Result;
use axum::{
    body::Body,
    extract::MatchedPath,
    http::{HeaderName, HeaderValue, Request},
    middleware,
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::PropagateRequestIdLayer, set_header::SetRequestHeaderLayer, trace::TraceLayer,
};
use tracing::{info, info_span, Span};
use ulid::Ulid;
use utoipa::OpenApi;

pub(crate) mod authorize;
pub(crate) mod handlers;
mod pages;

/// Shared, read-only state handed to every handler through an `Extension`.
pub struct AuthState {
    store: Arc<dyn AccountStore>,
    keys: SessionKeys,
    config: SessionConfig,
}

impl AuthState {
    #[must_use]
    pub fn new(store: Arc<dyn AccountStore>, keys: SessionKeys, config: SessionConfig) -> Self {
        Self {
            store,
            keys,
            config,
        }
    }

    #[must_use]
    pub fn store(&self) -> &dyn AccountStore {
        self.store.as_ref()
    }

    #[must_use]
    pub fn keys(&self) -> &SessionKeys {
        &self.keys
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health,
        handlers::login::login,
        handlers::register::register,
        handlers::logout::logout
    ),
    components(schemas(handlers::health::Health, handlers::CredentialsForm)),
    tags(
        (name = "gatehouse", description = "Email/password sign-in and session-gated dashboard")
    )
)]
struct ApiDoc;

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

/// Build the application router.
///
/// Every route except `/health` runs behind the authorization middleware,
/// including the fallback, so unknown paths are still subject to the policy.
pub fn router(auth_state: Arc<AuthState>) -> Router {
    Router::new()
        .route("/", get(handlers::dashboard::dashboard))
        .route("/dashboard", get(handlers::dashboard::dashboard))
        .route(
            "/login",
            get(handlers::login::login_page).post(handlers::login::login),
        )
        .route(
            "/register",
            get(handlers::register::register_page).post(handlers::register::register),
        )
        .route("/logout", post(handlers::logout::logout))
        .fallback(handlers::not_found)
        .layer(middleware::from_fn(authorize::authorize))
        .route("/health", get(handlers::health::health))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(Extension(auth_state)),
        )
}

/// Start the server
/// # Errors
/// Return error if failed to bind or serve
pub async fn new(port: u16, auth_state: Arc<AuthState>) -> Result<()> {
    let app = router(auth_state);

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl-c: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to listen for SIGTERM: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Gracefully shutdown");
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}
