//! Credential auth service: register, login, logout, current user.
//!
//! DESIGN
//! ======
//! Every operation returns a tagged `Result<_, AuthFailure>`; the route layer
//! owns the mapping from failure kind to status code and body. Login never
//! distinguishes "no such user" from "wrong password" so the response cannot
//! be used to enumerate accounts.

use crate::services::password::PasswordError;
use crate::services::session::SessionToken;
use crate::state::AppState;
use crate::store::{PublicUser, StoreError};

pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, thiserror::Error)]
pub enum AuthFailure {
    #[error("{0}")]
    Validation(&'static str),
    #[error("Email already in use")]
    Conflict,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("not authenticated")]
    Unauthenticated,
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Password(#[from] PasswordError),
}

/// A freshly established session.
#[derive(Debug)]
pub struct Session {
    pub user: PublicUser,
    pub token: SessionToken,
}

/// Trim and lowercase an email; `None` if it is empty or has no `@`.
#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_lowercase();
    if normalized.is_empty() || !normalized.contains('@') {
        return None;
    }
    Some(normalized)
}

/// Create an account and log it in.
///
/// # Errors
///
/// `Validation` for a bad email or short password, `Conflict` if the email is
/// taken (including a lost insert race), otherwise store/hash failures.
pub async fn register(state: &AppState, email: &str, password: &str) -> Result<Session, AuthFailure> {
    let email = normalize_email(email).ok_or(AuthFailure::Validation("Invalid email"))?;
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthFailure::Validation("Password must be at least 8 characters"));
    }

    if state.users.find_by_email(&email).await?.is_some() {
        return Err(AuthFailure::Conflict);
    }

    let password_hash = state.passwords.hash(password).await?;
    let user = match state.users.insert(&email, &password_hash).await {
        Ok(user) => user,
        Err(StoreError::Duplicate) => return Err(AuthFailure::Conflict),
        Err(e) => return Err(e.into()),
    };

    let token = match state.sessions.create(user.id).await {
        Ok(token) => token,
        Err(e) => {
            // A registration that could not log in is undone so a retry is not a 409.
            if let Err(undo) = state.users.delete(user.id).await {
                tracing::error!(user_id = %user.id, error = %undo, "failed to remove user after session error");
            }
            return Err(e.into());
        }
    };
    Ok(Session { user: PublicUser::from(&user), token })
}

/// Verify credentials and start a session.
///
/// # Errors
///
/// `InvalidCredentials` for an unknown email or a wrong password, otherwise
/// store/hash failures.
pub async fn login(state: &AppState, email: &str, password: &str) -> Result<Session, AuthFailure> {
    let Some(email) = normalize_email(email) else {
        return Err(AuthFailure::InvalidCredentials);
    };
    let Some(user) = state.users.find_by_email(&email).await? else {
        return Err(AuthFailure::InvalidCredentials);
    };

    if !state.passwords.verify(password, &user.password_hash).await? {
        return Err(AuthFailure::InvalidCredentials);
    }

    let token = state.sessions.create(user.id).await?;
    Ok(Session { user: PublicUser::from(&user), token })
}

/// End the session named by `token`, if any. A failed delete is retried once.
///
/// # Errors
///
/// Returns a store error if the session row could not be deleted on either attempt.
pub async fn logout(state: &AppState, token: Option<&SessionToken>) -> Result<(), AuthFailure> {
    let Some(token) = token else {
        return Ok(());
    };
    if let Err(e) = state.sessions.destroy(token).await {
        tracing::warn!(error = %e, "session delete failed, retrying");
        state.sessions.destroy(token).await?;
    }
    Ok(())
}

/// Resolve the session to its user.
///
/// A session whose user no longer exists is destroyed and reported as
/// `Unauthenticated`, same as a missing or expired one.
///
/// # Errors
///
/// `Unauthenticated` when there is no live session, otherwise store failures.
pub async fn current_user(state: &AppState, token: Option<&SessionToken>) -> Result<PublicUser, AuthFailure> {
    let Some(token) = token else {
        return Err(AuthFailure::Unauthenticated);
    };
    let Some(user_id) = state.sessions.verify(token).await? else {
        return Err(AuthFailure::Unauthenticated);
    };

    if let Some(user) = state.users.find_by_id(user_id).await? {
        return Ok(PublicUser::from(&user));
    }

    tracing::info!(%user_id, "clearing session for missing user");
    state.sessions.destroy(token).await?;
    Err(AuthFailure::Unauthenticated)
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
