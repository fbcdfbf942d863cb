//! Account registration page.

use leptos::prelude::*;

use crate::pages::login::{CredentialsForm, FormMode};
use crate::router::LOGIN;

#[component]
pub fn RegisterPage() -> impl IntoView {
    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Create Account"</h1>
                <p class="login-card__subtitle">"Passwords need at least 8 characters."</p>
                <CredentialsForm mode=FormMode::Register />
                <p class="login-card__subtitle">
                    "Already registered? " <a href=LOGIN>"Sign in"</a>
                </p>
            </div>
        </div>
    }
}
