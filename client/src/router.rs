//! Route table metadata and the navigation guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every route declares a [`RouteMeta`]. [`RouteGuard`] wraps the route's view,
//! asks the server whether a session exists (only when the meta needs it),
//! and either renders the children or redirects.

#[cfg(test)]
#[path = "router_test.rs"]
mod router_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::api::AuthApi;
use crate::state::auth::AppAuth;

pub const HOME: &str = "/";
pub const LOGIN: &str = "/login";
pub const REGISTER: &str = "/register";
pub const ACCOUNT: &str = "/account";

/// Access flags attached to a route.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RouteMeta {
    pub requires_auth: bool,
    pub guest_only: bool,
}

impl RouteMeta {
    pub const OPEN: Self = Self { requires_auth: false, guest_only: false };
    pub const GUEST_ONLY: Self = Self { requires_auth: false, guest_only: true };
    pub const REQUIRES_AUTH: Self = Self { requires_auth: true, guest_only: false };

    /// Whether the guard must ask the server before deciding.
    #[must_use]
    pub fn needs_auth_decision(self) -> bool {
        self.requires_auth || self.guest_only
    }
}

/// Outcome of a guard check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(&'static str),
}

/// Pure guard rule.
#[must_use]
pub fn decide(meta: RouteMeta, authed: bool) -> GuardDecision {
    if meta.requires_auth && !authed {
        return GuardDecision::Redirect(LOGIN);
    }
    if meta.guest_only && authed {
        return GuardDecision::Redirect(HOME);
    }
    GuardDecision::Allow
}

/// Run the guard for `meta`, calling `me` only when the route is flagged.
/// Any failure from `me` counts as unauthenticated.
pub async fn check<A: AuthApi>(api: &A, meta: RouteMeta) -> GuardDecision {
    if !meta.needs_auth_decision() {
        return GuardDecision::Allow;
    }
    let authed = api.me().await.is_ok();
    decide(meta, authed)
}

/// Renders `children` once the guard allows navigation, otherwise redirects.
#[component]
pub fn RouteGuard(meta: RouteMeta, children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<AppAuth>();
    let decision = RwSignal::new(None::<GuardDecision>);

    if meta.needs_auth_decision() {
        leptos::task::spawn_local(async move {
            decision.set(Some(check(auth.api(), meta).await));
        });
    } else {
        decision.set(Some(GuardDecision::Allow));
    }

    let navigate = use_navigate();
    Effect::new(move || {
        if let Some(GuardDecision::Redirect(to)) = decision.get() {
            navigate(to, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    view! {
        <Show when=move || decision.get() == Some(GuardDecision::Allow)>
            {children()}
        </Show>
    }
}
