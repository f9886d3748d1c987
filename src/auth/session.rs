//! Stateless signed session tokens and the cookie that carries them.
//!
//! Token format: `base64url(claims JSON) "." base64url(HMAC-SHA256(claims part))`.
//! Nothing is persisted server-side; sign-out clears the cookie and expiry is
//! enforced from the `exp` claim.

use axum::http::{
    header::{InvalidHeaderValue, AUTHORIZATION, COOKIE},
    HeaderMap, HeaderValue,
};
use base64ct::{Base64UrlUnpadded, Encoding};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::time::SystemTime;
use thiserror::Error;
use uuid::Uuid;

use super::Identity;

type HmacSha256 = Hmac<Sha256>;

pub const SESSION_COOKIE_NAME: &str = "gatehouse_session";
pub const TOKEN_VERSION: u8 = 1;
pub const MIN_SECRET_LEN: usize = 32;
pub const DEFAULT_SESSION_TTL_SECONDS: i64 = 30 * 24 * 60 * 60;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("session secret must be at least {MIN_SECRET_LEN} bytes")]
    WeakSecret,
    #[error("invalid token format")]
    Format,
    #[error("invalid base64url encoding")]
    Base64,
    #[error("invalid signature")]
    Signature,
    #[error("invalid claims")]
    Claims,
    #[error("invalid token version")]
    Version,
    #[error("token expired")]
    Expired,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    pub v: u8,
    pub sub: Uuid,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

impl SessionClaims {
    #[must_use]
    pub fn identity(&self) -> Identity {
        Identity {
            id: self.sub,
            email: self.email.clone(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SessionConfig {
    ttl_seconds: i64,
    cookie_secure: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            ttl_seconds: DEFAULT_SESSION_TTL_SECONDS,
            cookie_secure: false,
        }
    }

    #[must_use]
    pub fn with_ttl_seconds(mut self, seconds: i64) -> Self {
        self.ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_cookie_secure(mut self, secure: bool) -> Self {
        self.cookie_secure = secure;
        self
    }

    #[must_use]
    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    #[must_use]
    pub fn cookie_secure(&self) -> bool {
        self.cookie_secure
    }
}

/// Signing key for session tokens.
#[derive(Clone)]
pub struct SessionKeys {
    mac: HmacSha256,
}

impl std::fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionKeys(..)")
    }
}

impl SessionKeys {
    /// # Errors
    /// Returns [`TokenError::WeakSecret`] for secrets shorter than [`MIN_SECRET_LEN`].
    pub fn new(secret: &[u8]) -> Result<Self, TokenError> {
        if secret.len() < MIN_SECRET_LEN {
            return Err(TokenError::WeakSecret);
        }
        let mac = HmacSha256::new_from_slice(secret).map_err(|_| TokenError::WeakSecret)?;
        Ok(Self { mac })
    }

    fn sign(&self, payload: &str) -> Vec<u8> {
        let mut mac = self.mac.clone();
        mac.update(payload.as_bytes());
        mac.finalize().into_bytes().to_vec()
    }

    /// Issue a token for `identity`, valid for `ttl_seconds` from `now`.
    ///
    /// # Errors
    /// Returns [`TokenError::Claims`] if the claims cannot be serialized.
    pub fn issue(
        &self,
        identity: &Identity,
        now_unix_seconds: i64,
        ttl_seconds: i64,
    ) -> Result<String, TokenError> {
        let claims = SessionClaims {
            v: TOKEN_VERSION,
            sub: identity.id,
            email: identity.email.clone(),
            iat: now_unix_seconds,
            exp: now_unix_seconds.saturating_add(ttl_seconds),
        };
        let json = serde_json::to_vec(&claims).map_err(|_| TokenError::Claims)?;
        let payload = Base64UrlUnpadded::encode_string(&json);
        let signature = Base64UrlUnpadded::encode_string(&self.sign(&payload));
        Ok(format!("{payload}.{signature}"))
    }

    /// Check signature and expiry and return the claims.
    ///
    /// # Errors
    /// Returns a [`TokenError`] describing why the token is not acceptable.
    pub fn validate(&self, token: &str, now_unix_seconds: i64) -> Result<SessionClaims, TokenError> {
        let (payload, signature) = token.split_once('.').ok_or(TokenError::Format)?;
        if payload.is_empty() || signature.contains('.') {
            return Err(TokenError::Format);
        }

        let signature = Base64UrlUnpadded::decode_vec(signature).map_err(|_| TokenError::Base64)?;
        let mut mac = self.mac.clone();
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::Signature)?;

        let json = Base64UrlUnpadded::decode_vec(payload).map_err(|_| TokenError::Base64)?;
        let claims: SessionClaims = serde_json::from_slice(&json).map_err(|_| TokenError::Claims)?;
        if claims.v != TOKEN_VERSION {
            return Err(TokenError::Version);
        }
        if claims.exp <= now_unix_seconds {
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }
}

#[must_use]
pub fn now_unix_seconds() -> i64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

/// Build a secure `HttpOnly` cookie for the session token.
///
/// # Errors
/// Returns an error if the token contains bytes not allowed in a header.
pub fn session_cookie(config: &SessionConfig, token: &str) -> Result<HeaderValue, InvalidHeaderValue> {
    let ttl_seconds = config.ttl_seconds();
    let mut cookie = format!(
        "{SESSION_COOKIE_NAME}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={ttl_seconds}"
    );
    // Only mark cookies secure when served over HTTPS.
    if config.cookie_secure() {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

/// # Errors
/// Never fails in practice; the cookie is built from constants.
pub fn clear_session_cookie(config: &SessionConfig) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut cookie = format!("{SESSION_COOKIE_NAME}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
    if config.cookie_secure() {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

/// Find the session token on a request: bearer header first, then the cookie.
#[must_use]
pub fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = extract_bearer_token(headers) {
        return Some(token);
    }
    for header in headers.get_all(COOKIE) {
        let Ok(value) = header.to_str() else {
            continue;
        };
        for pair in value.split(';') {
            let Some((key, val)) = pair.trim().split_once('=') else {
                continue;
            };
            if key.trim() == SESSION_COOKIE_NAME && !val.trim().is_empty() {
                return Some(val.trim().to_string());
            }
        }
    }
    None
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let trimmed = value.trim();
    let token = trimmed
        .strip_prefix("Bearer ")
        .or_else(|| trimmed.strip_prefix("bearer "))?
        .trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
