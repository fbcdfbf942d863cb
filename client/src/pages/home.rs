//! Landing page. Open to everyone; shows who is signed in when known.

use leptos::prelude::*;

use crate::router::{ACCOUNT, LOGIN, REGISTER};
use crate::state::auth::AppAuth;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = expect_context::<AppAuth>();
    let state = auth.state();

    view! {
        <div class="home-page">
            <h1>"Welcome"</h1>
            <Show
                when=move || state.get().is_authed()
                fallback=move || {
                    view! {
                        <p>
                            <a href=LOGIN>"Sign in"</a>
                            " or "
                            <a href=REGISTER>"create an account"</a>
                        </p>
                    }
                }
            >
                <p>
                    "Signed in as "
                    <strong>{move || state.get().user.map(|u| u.email).unwrap_or_default()}</strong>
                    ". "
                    <a href=ACCOUNT>"Account"</a>
                </p>
            </Show>
        </div>
    }
}
