//! Forgot-password page: requests a reset email.

#[cfg(test)]
#[path = "forgot_password_test.rs"]
mod forgot_password_test;

use leptos::prelude::*;

use crate::app::AppServices;
#[cfg(any(test, feature = "csr"))]
use crate::net::auth::AuthApi;

fn validate_email_input(email: &str) -> Result<String, &'static str> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err("Enter a valid email address.");
    }
    Ok(email.to_owned())
}

#[cfg(any(test, feature = "csr"))]
fn reset_sent_message(email: &str) -> String {
    format!("If an account exists for {email}, a reset link is on its way.")
}

#[cfg(any(test, feature = "csr"))]
async fn submit_forgot_password<A: AuthApi>(auth: &A, email: &str) -> Result<String, String> {
    let email = validate_email_input(email).map_err(str::to_owned)?;
    auth.forgot_password(&email)
        .await
        .map_err(|e| format!("Request failed: {e}"))?;
    Ok(reset_sent_message(&email))
}

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let services = expect_context::<AppServices>();

    let email = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let submitted = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let email_value = email.get();
        if let Err(message) = validate_email_input(&email_value) {
            info.set(message.to_owned());
            return;
        }
        busy.set(true);
        info.set("Sending reset link...".to_owned());

        #[cfg(feature = "csr")]
        {
            let auth = services.auth.clone();
            leptos::task::spawn_local(async move {
                match submit_forgot_password(&auth, &email_value).await {
                    Ok(message) => {
                        submitted.set(true);
                        info.set(message);
                    }
                    Err(e) => info.set(e),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = &services;
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Reset your password"</h1>
                <form class="login-form" on:submit=on_submit hidden=move || submitted.get()>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Send Reset Link"
                    </button>
                </form>
                <Show when=move || submitted.get()>
                    <p class="login-card__subtitle">"Check your inbox."</p>
                </Show>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <a class="login-link" href="/login">"Back to sign in"</a>
            </div>
        </div>
    }
}
