//! Postgres-backed [`SessionStore`].

use sqlx::PgPool;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use super::StoreError;
use crate::services::session::{SessionStore, SessionToken};

pub struct PgSessionStore {
    pool: PgPool,
    ttl: Duration,
}

impl PgSessionStore {
    #[must_use]
    pub fn new(pool: PgPool, ttl: Duration) -> Self {
        Self { pool, ttl }
    }
}

#[async_trait::async_trait]
impl SessionStore for PgSessionStore {
    /// Starts a session and sweeps rows that have already expired.
    async fn create(&self, user_id: Uuid) -> Result<SessionToken, StoreError> {
        sqlx::query("DELETE FROM sessions WHERE expires_at <= now()")
            .execute(&self.pool)
            .await?;

        let token = SessionToken::generate();
        sqlx::query("INSERT INTO sessions (token, user_id, expires_at) VALUES ($1, $2, $3)")
            .bind(token.as_str())
            .bind(user_id)
            .bind(OffsetDateTime::now_utc() + self.ttl)
            .execute(&self.pool)
            .await?;
        Ok(token)
    }

    async fn verify(&self, token: &SessionToken) -> Result<Option<Uuid>, StoreError> {
        let user_id: Option<Uuid> =
            sqlx::query_scalar("SELECT user_id FROM sessions WHERE token = $1 AND expires_at > now()")
                .bind(token.as_str())
                .fetch_optional(&self.pool)
                .await?;
        Ok(user_id)
    }

    async fn destroy(&self, token: &SessionToken) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token.as_str())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(all(test, feature = "live-db-tests"))]
#[path = "sessions_test.rs"]
mod tests;
