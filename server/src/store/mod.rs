//! Credential and session persistence.
//!
//! ARCHITECTURE
//! ============
//! Handlers talk to the stores through the [`UserStore`] and
//! [`SessionStore`](crate::services::session::SessionStore) traits so the
//! same auth flow runs against Postgres in production and in-memory maps in
//! tests. Email uniqueness is owned by the store (a `UNIQUE` constraint), not
//! by application-level locking.

#[cfg(test)]
pub mod memory;
pub mod sessions;
pub mod users;

use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique constraint rejected the write.
    #[error("duplicate record")]
    Duplicate,
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

impl StoreError {
    /// Classify a raw SQLx error, folding unique violations into [`StoreError::Duplicate`].
    pub(crate) fn from_insert(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => Self::Duplicate,
            _ => Self::Db(err),
        }
    }
}

/// A stored user row, including the password hash.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub created_at: OffsetDateTime,
}

/// Client-facing projection of [`User`]; never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self { id: user.id, email: user.email.clone(), created_at: user.created_at }
    }
}

/// Persistence for user credentials.
#[async_trait::async_trait]
pub trait UserStore: Send + Sync {
    /// Total number of registered users.
    async fn count(&self) -> Result<i64, StoreError>;

    /// Look up a user by normalized email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Look up a user by id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// Insert a new user.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Duplicate`] if the email is already taken.
    async fn insert(&self, email: &str, password_hash: &str) -> Result<User, StoreError>;

    /// Remove a user. Used to undo a registration whose session never started.
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
