//! Account page for the signed-in user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted behind a `REQUIRES_AUTH` guard, so a user is normally present.
//! Logging out clears local state even if the server call fails, then returns
//! to the login page.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::router::LOGIN;
use crate::state::auth::AppAuth;

#[component]
pub fn AccountPage() -> impl IntoView {
    let auth = expect_context::<AppAuth>();
    let state = auth.state();
    let navigate = use_navigate();

    let on_logout = move |_| {
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            if let Err(e) = auth.logout().await {
                leptos::logging::warn!("logout: {e}");
            }
            navigate(LOGIN, NavigateOptions::default());
        });
    };

    view! {
        <div class="account-page">
            <h1>"Account"</h1>
            {move || {
                state
                    .get()
                    .user
                    .map(|user| {
                        view! {
                            <dl>
                                <dt>"Email"</dt>
                                <dd>{user.email}</dd>
                                <dt>"Member since"</dt>
                                <dd>{user.created_at}</dd>
                            </dl>
                        }
                    })
            }}
            <button class="login-button" disabled=move || state.get().loading on:click=on_logout>
                "Log Out"
            </button>
        </div>
    }
}
