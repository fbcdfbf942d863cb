//! Login page and the email + password form shared with registration.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::router::{HOME, REGISTER};
use crate::state::auth::AppAuth;

const MIN_PASSWORD_LEN: usize = 8;

/// Which auth call a [`CredentialsForm`] submits to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormMode {
    Login,
    Register,
}

/// Trim the email and check both fields before hitting the server.
///
/// Registration also enforces the minimum password length locally so the
/// user sees the same message the server would return.
pub(crate) fn validate_credentials_input(
    mode: FormMode,
    email: &str,
    password: &str,
) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Enter both email and password.");
    }
    if mode == FormMode::Register && password.chars().count() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 8 characters");
    }
    Ok((email.to_owned(), password.to_owned()))
}

#[component]
pub fn CredentialsForm(mode: FormMode) -> impl IntoView {
    let auth = expect_context::<AppAuth>();
    let navigate = use_navigate();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = move || auth.state().get().loading;

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if auth.state().get_untracked().loading {
            return;
        }
        let (email_value, password_value) =
            match validate_credentials_input(mode, &email.get_untracked(), &password.get_untracked()) {
                Ok(values) => values,
                Err(msg) => {
                    info.set(msg.to_owned());
                    return;
                }
            };
        info.set(String::new());

        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            let result = match mode {
                FormMode::Login => auth.login(&email_value, &password_value).await,
                FormMode::Register => auth.register(&email_value, &password_value).await,
            };
            match result {
                Ok(_) => navigate(HOME, NavigateOptions::default()),
                Err(e) => info.set(e.message),
            }
        });
    };

    let submit_label = match mode {
        FormMode::Login => "Sign In",
        FormMode::Register => "Create Account",
    };

    view! {
        <form class="login-form" on:submit=on_submit>
            <input
                class="login-input"
                type="email"
                placeholder="you@example.com"
                prop:value=move || email.get()
                on:input=move |ev| email.set(event_target_value(&ev))
            />
            <input
                class="login-input"
                type="password"
                placeholder="Password"
                prop:value=move || password.get()
                on:input=move |ev| password.set(event_target_value(&ev))
            />
            <button class="login-button" type="submit" disabled=busy>
                {submit_label}
            </button>
            <Show when=move || !info.get().is_empty()>
                <p class="login-message">{move || info.get()}</p>
            </Show>
        </form>
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Sign In"</h1>
                <CredentialsForm mode=FormMode::Login />
                <p class="login-card__subtitle">
                    "No account? " <a href=REGISTER>"Register"</a>
                </p>
            </div>
        </div>
    }
}

