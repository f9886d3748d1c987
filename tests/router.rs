#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::{
    body::{to_bytes, Body},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE},
        Method, Request, StatusCode,
    },
    response::Response,
    Router,
};
use gatehouse::{
    api::{self, AuthState},
    auth::{
        password::hash_password,
        session::{now_unix_seconds, SESSION_COOKIE_NAME},
        Identity, SessionConfig, SessionKeys,
    },
    store::{Account, MemoryAccountStore},
};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

const SECRET: &[u8] = b"router-tests-secret-0123456789abcdef";
const EMAIL: &str = "a@b.com";
const PASSWORD: &str = "Secret1!";

struct TestApp {
    store: Arc<MemoryAccountStore>,
    state: Arc<AuthState>,
}

impl TestApp {
    fn new() -> Self {
        let store = Arc::new(MemoryAccountStore::new());
        store.insert(Account {
            id: Uuid::from_u128(1),
            email: EMAIL.to_string(),
            password_hash: hash_password(PASSWORD).expect("hash"),
        });
        let keys = SessionKeys::new(SECRET).expect("keys");
        let state = Arc::new(AuthState::new(store.clone(), keys, SessionConfig::new()));
        Self { store, state }
    }

    fn router(&self) -> Router {
        api::router(self.state.clone())
    }

    fn session_token(&self) -> String {
        let identity = Identity {
            id: Uuid::from_u128(1),
            email: EMAIL.to_string(),
        };
        self.state
            .keys()
            .issue(&identity, now_unix_seconds(), 3600)
            .expect("token")
    }

    async fn get(&self, path: &str, token: Option<&str>) -> Response {
        let mut builder = Request::builder().method(Method::GET).uri(path);
        if let Some(token) = token {
            builder = builder.header(COOKIE, format!("{SESSION_COOKIE_NAME}={token}"));
        }
        self.router()
            .oneshot(builder.body(Body::empty()).expect("request"))
            .await
            .expect("response")
    }

    async fn post_form(&self, path: &str, body: &str, token: Option<&str>) -> Response {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri(path)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(token) = token {
            builder = builder.header(COOKIE, format!("{SESSION_COOKIE_NAME}={token}"));
        }
        self.router()
            .oneshot(builder.body(Body::from(body.to_string())).expect("request"))
            .await
            .expect("response")
    }
}

fn location(response: &Response) -> Option<&str> {
    response
        .headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
}

fn set_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get(SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .map(ToString::to_string)
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    String::from_utf8(bytes.to_vec()).expect("utf-8")
}

#[tokio::test]
async fn anonymous_dashboard_redirects_to_login() {
    let app = TestApp::new();
    for path in ["/", "/dashboard"] {
        let response = app.get(path, None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{path}");
        assert_eq!(location(&response), Some("/login"));
    }
}

#[tokio::test]
async fn anonymous_can_open_login_and_register() {
    let app = TestApp::new();

    let response = app.get("/login", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Sign In"));

    let response = app.get("/register", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Sign Up"));
}

#[tokio::test]
async fn signed_in_login_and_register_redirect_home() {
    let app = TestApp::new();
    let token = app.session_token();

    for path in ["/login", "/register"] {
        let response = app.get(path, Some(&token)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{path}");
        assert_eq!(location(&response), Some("/"));
    }
}

#[tokio::test]
async fn signed_in_dashboard_shows_email() {
    let app = TestApp::new();
    let token = app.session_token();

    let response = app.get("/", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Signed In"));
    assert!(body.contains(EMAIL));
}

#[tokio::test]
async fn bearer_token_is_accepted() {
    let app = TestApp::new();
    let token = app.session_token();

    let request = Request::builder()
        .uri("/dashboard")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .expect("request");
    let response = app.router().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn tampered_token_is_anonymous() {
    let app = TestApp::new();
    let mut token = app.session_token();
    token.push('x');

    let response = app.get("/", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/login"));
}

#[tokio::test]
async fn unknown_path_is_denied_for_anonymous() {
    let app = TestApp::new();
    let response = app.get("/settings", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_path_is_not_found_when_signed_in() {
    let app = TestApp::new();
    let token = app.session_token();
    let response = app.get("/settings", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn login_success_sets_session_cookie() {
    let app = TestApp::new();

    let response = app
        .post_form("/login", "email=A%40B.com&password=Secret1%21", None)
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/"));

    let cookie = set_cookie(&response).expect("set-cookie");
    assert!(cookie.starts_with(&format!("{SESSION_COOKIE_NAME}=")));
    assert!(cookie.contains("HttpOnly"));

    let token = cookie
        .split(';')
        .next()
        .and_then(|pair| pair.split_once('='))
        .map(|(_, value)| value.to_string())
        .expect("token");
    let response = app.get("/", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn login_failure_is_unauthorized() {
    let app = TestApp::new();

    let wrong_password = app
        .post_form("/login", "email=a%40b.com&password=nope", None)
        .await;
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert!(set_cookie(&wrong_password).is_none());
    let wrong_password = body_text(wrong_password).await;
    assert!(wrong_password.contains("Invalid credentials!"));

    let unknown_email = app
        .post_form("/login", "email=x%40b.com&password=Secret1%21", None)
        .await;
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    let unknown_email = body_text(unknown_email).await;
    assert!(unknown_email.contains("Invalid credentials!"));
}

#[tokio::test]
async fn login_with_missing_fields_is_unauthorized() {
    let app = TestApp::new();
    let response = app.post_form("/login", "", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(app.store.lookups(), 0);
}

#[tokio::test]
async fn login_store_outage_is_server_error() {
    let app = TestApp::new();
    app.store.set_offline(true);

    let response = app
        .post_form("/login", "email=a%40b.com&password=Secret1%21", None)
        .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn register_creates_account_and_signs_in() {
    let app = TestApp::new();

    let response = app
        .post_form("/register", "email=new%40b.com&password=hunter22", None)
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/"));
    assert!(set_cookie(&response).is_some());

    let response = app
        .post_form("/login", "email=new%40b.com&password=hunter22", None)
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn register_duplicate_is_conflict() {
    let app = TestApp::new();
    let response = app
        .post_form("/register", "email=A%40b.com&password=another1", None)
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert!(body_text(response).await.contains("Account already exists!"));
}

#[tokio::test]
async fn register_invalid_submission_is_unprocessable() {
    let app = TestApp::new();
    for body in [
        "email=not-an-email&password=hunter22",
        "email=c%40b.com&password=short",
    ] {
        let response = app.post_form("/register", body, None).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY, "{body}");
        assert!(body_text(response)
            .await
            .contains("Failed validating your submission!"));
    }
}

#[tokio::test]
async fn logout_clears_cookie() {
    let app = TestApp::new();
    let token = app.session_token();

    let response = app.post_form("/logout", "", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/login"));
    let cookie = set_cookie(&response).expect("set-cookie");
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn logout_without_session_is_denied() {
    let app = TestApp::new();
    let response = app.post_form("/logout", "", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn health_reports_store_state() {
    let app = TestApp::new();

    let response = app.get("/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-app"));
    assert!(response.headers().contains_key("x-request-id"));
    let json: serde_json::Value =
        serde_json::from_str(&body_text(response).await).expect("json");
    assert_eq!(json["name"], "gatehouse");
    assert_eq!(json["database"], "ok");

    app.store.set_offline(true);
    let response = app.get("/health", None).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
