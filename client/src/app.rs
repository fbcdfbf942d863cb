//! Root component: auth context, route table, and per-route guards.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use crate::net::api::HttpAuthApi;
use crate::pages::account::AccountPage;
use crate::pages::home::HomePage;
use crate::pages::login::LoginPage;
use crate::pages::register::RegisterPage;
use crate::router::{RouteGuard, RouteMeta};
use crate::state::auth::{AppAuth, AuthState};

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth: AppAuth = AppAuth::new(HttpAuthApi, RwSignal::new(AuthState::default()));
    provide_context(auth);
    leptos::task::spawn_local(async move { auth.refresh().await });

    view! {
        <Title text="Ugnecooks" />
        <Router>
            <main>
                <Routes fallback=|| view! { <p>"Page not found."</p> }>
                    <Route
                        path=path!("/")
                        view=|| view! { <RouteGuard meta=RouteMeta::OPEN><HomePage /></RouteGuard> }
                    />
                    <Route
                        path=path!("/login")
                        view=|| view! { <RouteGuard meta=RouteMeta::GUEST_ONLY><LoginPage /></RouteGuard> }
                    />
                    <Route
                        path=path!("/register")
                        view=|| view! { <RouteGuard meta=RouteMeta::GUEST_ONLY><RegisterPage /></RouteGuard> }
                    />
                    <Route
                        path=path!("/account")
                        view=|| view! { <RouteGuard meta=RouteMeta::REQUIRES_AUTH><AccountPage /></RouteGuard> }
                    />
                </Routes>
            </main>
        </Router>
    }
}
