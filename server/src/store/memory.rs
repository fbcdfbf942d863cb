//! In-memory stores for route and service tests.
//!
//! Both stores can be told to fail their next `n` calls with a pool timeout,
//! which is how tests reach the 500 paths.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use time::OffsetDateTime;
use uuid::Uuid;

use super::{StoreError, User, UserStore};
use crate::services::session::{SessionStore, SessionToken};

/// Countdown of injected failures shared by both memory stores.
#[derive(Default)]
struct Faults(AtomicUsize);

impl Faults {
    fn arm(&self, n: usize) {
        self.0.store(n, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), StoreError> {
        let tripped = self
            .0
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if tripped { Err(StoreError::Db(sqlx::Error::PoolTimedOut)) } else { Ok(()) }
    }
}

#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<HashMap<Uuid, User>>,
    faults: Faults,
}

impl MemoryUserStore {
    /// Drop a user, simulating deletion behind a live session.
    pub fn remove(&self, id: Uuid) {
        self.users.lock().unwrap().remove(&id);
    }

    pub fn user_count(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    /// Make the next `n` store calls fail.
    pub fn fail_next(&self, n: usize) {
        self.faults.arm(n);
    }
}

#[async_trait::async_trait]
impl UserStore for MemoryUserStore {
    async fn count(&self) -> Result<i64, StoreError> {
        self.faults.check()?;
        Ok(i64::try_from(self.user_count()).unwrap())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        self.faults.check()?;
        let users = self.users.lock().unwrap();
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        self.faults.check()?;
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }

    async fn insert(&self, email: &str, password_hash: &str) -> Result<User, StoreError> {
        self.faults.check()?;
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == email) {
            return Err(StoreError::Duplicate);
        }
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_owned(),
            password_hash: password_hash.to_owned(),
            created_at: OffsetDateTime::now_utc(),
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.faults.check()?;
        self.remove(id);
        Ok(())
    }
}

#[derive(Default)]
pub struct MemorySessionStore {
    sessions: Mutex<HashMap<SessionToken, (Uuid, OffsetDateTime)>>,
    faults: Faults,
}

impl MemorySessionStore {
    pub fn session_count(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    /// Force a session past its expiry.
    pub fn expire(&self, token: &SessionToken) {
        if let Some(entry) = self.sessions.lock().unwrap().get_mut(token) {
            entry.1 = OffsetDateTime::now_utc() - time::Duration::seconds(1);
        }
    }

    /// Make the next `n` store calls fail.
    pub fn fail_next(&self, n: usize) {
        self.faults.arm(n);
    }
}

#[async_trait::async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(&self, user_id: Uuid) -> Result<SessionToken, StoreError> {
        self.faults.check()?;
        let now = OffsetDateTime::now_utc();
        let token = SessionToken::generate();
        let mut sessions = self.sessions.lock().unwrap();
        sessions.retain(|_, (_, expires_at)| *expires_at > now);
        sessions.insert(token.clone(), (user_id, now + time::Duration::days(30)));
        Ok(token)
    }

    async fn verify(&self, token: &SessionToken) -> Result<Option<Uuid>, StoreError> {
        self.faults.check()?;
        let sessions = self.sessions.lock().unwrap();
        Ok(sessions
            .get(token)
            .filter(|(_, expires_at)| *expires_at > OffsetDateTime::now_utc())
            .map(|(user_id, _)| *user_id))
    }

    async fn destroy(&self, token: &SessionToken) -> Result<(), StoreError> {
        self.faults.check()?;
        self.sessions.lock().unwrap().remove(token);
        Ok(())
    }
}
