//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` creates one [`AuthClient`] and provides it via context. Pages read
//! `user`/`loading` reactively through its signal; the route guard and forms
//! call its async operations.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;

use crate::net::api::{AuthApi, HttpAuthApi};
use crate::net::types::{ApiError, PublicUser};

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<PublicUser>,
    pub loading: bool,
}

impl AuthState {
    #[must_use]
    pub fn is_authed(&self) -> bool {
        self.user.is_some()
    }
}

/// Auth operations bound to a reactive [`AuthState`].
#[derive(Clone, Copy, Debug)]
pub struct AuthClient<A> {
    api: A,
    state: RwSignal<AuthState>,
}

/// The client type the app provides through context.
pub type AppAuth = AuthClient<HttpAuthApi>;

impl<A: AuthApi> AuthClient<A> {
    pub fn new(api: A, state: RwSignal<AuthState>) -> Self {
        Self { api, state }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn state(&self) -> RwSignal<AuthState> {
        self.state
    }

    fn set_loading(&self, loading: bool) {
        self.state.update(|s| s.loading = loading);
    }

    /// Re-read the session from the server. Any failure leaves the user logged out.
    pub async fn refresh(&self) {
        self.set_loading(true);
        let user = self.api.me().await.ok();
        self.state.update(|s| {
            s.user = user;
            s.loading = false;
        });
    }

    /// Create an account; on success the new user becomes current.
    ///
    /// # Errors
    ///
    /// Propagates the server's validation/conflict error or a transport failure.
    pub async fn register(&self, email: &str, password: &str) -> Result<PublicUser, ApiError> {
        self.set_loading(true);
        let result = self.api.register(email, password).await;
        self.finish(result)
    }

    /// Log in; on success the user becomes current.
    ///
    /// # Errors
    ///
    /// Propagates `Invalid credentials` or a transport failure.
    pub async fn login(&self, email: &str, password: &str) -> Result<PublicUser, ApiError> {
        self.set_loading(true);
        let result = self.api.login(email, password).await;
        self.finish(result)
    }

    /// Log out. The local user is cleared even if the server call fails.
    ///
    /// # Errors
    ///
    /// Returns the server/transport error after local state is already cleared.
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.set_loading(true);
        let result = self.api.logout().await;
        self.state.update(|s| {
            s.user = None;
            s.loading = false;
        });
        result
    }

    fn finish(&self, result: Result<PublicUser, ApiError>) -> Result<PublicUser, ApiError> {
        let user = result.as_ref().ok().cloned();
        self.state.update(|s| {
            if user.is_some() {
                s.user = user;
            }
            s.loading = false;
        });
        result
    }
}
