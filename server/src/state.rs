//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the credential and session stores behind trait objects, the password
//! hasher, and the session cookie codec. Nothing in it is mutated per request;
//! the only shared resource is the database pool inside the Postgres stores.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::services::password::PasswordHasher;
use crate::services::session::{SessionCookies, SessionStore};
use crate::store::UserStore;
use crate::store::sessions::PgSessionStore;
use crate::store::users::PgUserStore;

/// Shared application state, injected into Axum handlers via State extractor.
/// Cheap to clone; every field is an `Arc` or a small value.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub sessions: Arc<dyn SessionStore>,
    pub passwords: PasswordHasher,
    pub cookies: SessionCookies,
}

impl AppState {
    #[must_use]
    pub fn new(
        users: Arc<dyn UserStore>,
        sessions: Arc<dyn SessionStore>,
        passwords: PasswordHasher,
        cookies: SessionCookies,
    ) -> Self {
        Self { users, sessions, passwords, cookies }
    }

    /// Wire the Postgres-backed stores for a running server.
    #[must_use]
    pub fn from_pool(pool: PgPool, config: &Config) -> Self {
        Self::new(
            Arc::new(PgUserStore::new(pool.clone())),
            Arc::new(PgSessionStore::new(pool, config.cookie.ttl)),
            PasswordHasher::default(),
            SessionCookies::new(&config.session_secret, config.cookie.clone()),
        )
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
