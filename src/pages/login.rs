//! Login page: email + password against the auth service.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
#[cfg(feature = "csr")]
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::app::AppServices;
#[cfg(any(test, feature = "csr"))]
use crate::net::auth::AuthApi;
use crate::net::types::Credentials;
use crate::state::auth::AuthState;

fn validate_login_input(email: &str, password: &str) -> Result<Credentials, &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Enter both email and password.");
    }
    Ok(Credentials { email: email.to_owned(), password: password.to_owned() })
}

#[cfg(any(test, feature = "csr"))]
fn login_failed_message(err: &crate::net::error::ApiError) -> String {
    format!("Login failed: {err}")
}

/// Run the login and return the resulting session snapshot.
#[cfg(any(test, feature = "csr"))]
async fn submit_login<A: AuthApi>(auth: &A, email: &str, password: &str) -> Result<AuthState, String> {
    let credentials = validate_login_input(email, password).map_err(str::to_owned)?;
    auth.login(&credentials).await.map_err(|e| login_failed_message(&e))?;
    let state = AuthState::from_session(auth);
    if !state.authenticated {
        return Err("Login did not start a session.".to_owned());
    }
    Ok(state)
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let services = expect_context::<AppServices>();
    let auth_state = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let email_value = email.get();
        let password_value = password.get();
        if let Err(message) = validate_login_input(&email_value, &password_value) {
            info.set(message.to_owned());
            return;
        }
        busy.set(true);
        info.set("Signing in...".to_owned());

        #[cfg(feature = "csr")]
        {
            let auth = services.auth.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match submit_login(&auth, &email_value, &password_value).await {
                    Ok(state) => {
                        auth_state.set(state);
                        navigate("/", NavigateOptions::default());
                    }
                    Err(e) => {
                        leptos::logging::warn!("{e}");
                        info.set(e);
                        busy.set(false);
                    }
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (&services, &navigate, auth_state);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Cycletrack"</h1>
                <p class="login-card__subtitle">"Sign in"</p>
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
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Sign In"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <a class="login-link" href="/forgot-password">"Forgot your password?"</a>
            </div>
        </div>
    }
}
