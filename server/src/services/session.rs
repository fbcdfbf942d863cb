//! Session tokens, the session store seam, and the signed session cookie.
//!
//! ARCHITECTURE
//! ============
//! A session is a random [`SessionToken`] that names a row in the session
//! store; the row carries the user id and an expiry. The token travels to the
//! browser in an HTTP-only cookie whose value is `<token>.<hmac>`, signed with
//! `SESSION_SECRET`. A cookie that fails signature checks never reaches the
//! store.
//!
//! TRADE-OFFS
//! ==========
//! Keeping a server-side row (instead of a fully self-contained cookie) costs
//! one lookup per request, but makes logout final: a replayed cookie after
//! logout verifies against nothing.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;
use uuid::Uuid;

use crate::config::CookieConfig;
use crate::store::StoreError;

type HmacSha256 = Hmac<Sha256>;

const TOKEN_BYTES: usize = 32;

// =============================================================================
// SESSION TOKEN
// =============================================================================

/// Opaque session identifier: 32 random bytes, hex encoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    /// Generate a cryptographically random token.
    #[must_use]
    pub fn generate() -> Self {
        let bytes: [u8; TOKEN_BYTES] = rand::rng().random();
        Self(hex::encode(bytes))
    }

    /// Accept a token only if it has the shape [`SessionToken::generate`] produces.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let well_formed = raw.len() == TOKEN_BYTES * 2 && raw.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
        well_formed.then(|| Self(raw.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// =============================================================================
// SESSION STORE
// =============================================================================

/// Server-side session registry.
#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    /// Start a session for `user_id` and return its token.
    async fn create(&self, user_id: Uuid) -> Result<SessionToken, StoreError>;

    /// Resolve a token to its user id; `None` if unknown or expired.
    async fn verify(&self, token: &SessionToken) -> Result<Option<Uuid>, StoreError>;

    /// End a session. Destroying an unknown token is not an error.
    async fn destroy(&self, token: &SessionToken) -> Result<(), StoreError>;
}

// =============================================================================
// SESSION COOKIE
// =============================================================================

/// Encodes session tokens into signed cookies and back.
#[derive(Clone)]
pub struct SessionCookies {
    key: Vec<u8>,
    config: CookieConfig,
}

impl SessionCookies {
    #[must_use]
    pub fn new(secret: &str, config: CookieConfig) -> Self {
        Self { key: secret.as_bytes().to_vec(), config }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.config.name
    }

    fn mac(&self) -> HmacSha256 {
        // HMAC accepts keys of any length.
        HmacSha256::new_from_slice(&self.key).unwrap_or_else(|_| unreachable!("hmac key length is unrestricted"))
    }

    /// Produce the signed cookie value `<token>.<signature>`.
    #[must_use]
    pub fn sign(&self, token: &SessionToken) -> String {
        let mut mac = self.mac();
        mac.update(token.as_str().as_bytes());
        let signature = mac.finalize().into_bytes();
        format!("{}.{}", token.as_str(), hex::encode(signature))
    }

    /// Check a signed cookie value, returning the token only if the signature matches.
    #[must_use]
    pub fn unsign(&self, value: &str) -> Option<SessionToken> {
        let (raw_token, raw_signature) = value.split_once('.')?;
        let token = SessionToken::parse(raw_token)?;
        let signature = hex::decode(raw_signature).ok()?;

        let mut mac = self.mac();
        mac.update(token.as_str().as_bytes());
        mac.verify_slice(&signature).ok()?;
        Some(token)
    }

    /// Read and verify the session token from a request's cookie jar.
    #[must_use]
    pub fn read(&self, jar: &CookieJar) -> Option<SessionToken> {
        jar.get(self.name()).and_then(|cookie| self.unsign(cookie.value()))
    }

    /// True if the request carried a session cookie at all, valid or not.
    #[must_use]
    pub fn present(&self, jar: &CookieJar) -> bool {
        jar.get(self.name()).is_some()
    }

    /// Cookie that establishes the session in the browser.
    #[must_use]
    pub fn issue(&self, token: &SessionToken) -> Cookie<'static> {
        Cookie::build((self.config.name.clone(), self.sign(token)))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.config.secure)
            .max_age(self.config.ttl)
            .build()
    }

    /// Cookie that immediately expires the session in the browser.
    #[must_use]
    pub fn clear(&self) -> Cookie<'static> {
        Cookie::build((self.config.name.clone(), ""))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.config.secure)
            .max_age(time::Duration::ZERO)
            .build()
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
