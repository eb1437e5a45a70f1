//! Reset-password page reached from the emailed link (`?token=...`).

#[cfg(test)]
#[path = "reset_password_test.rs"]
mod reset_password_test;

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::app::AppServices;
#[cfg(any(test, feature = "csr"))]
use crate::net::auth::AuthApi;

const MIN_PASSWORD_LEN: usize = 8;

fn validate_reset_input(token: Option<&str>, password: &str, confirm: &str) -> Result<(String, String), &'static str> {
    let token = token.map(str::trim).filter(|t| !t.is_empty()).ok_or("This reset link is missing its token.")?;
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 8 characters.");
    }
    if password != confirm {
        return Err("Passwords do not match.");
    }
    Ok((token.to_owned(), password.to_owned()))
}

#[cfg(any(test, feature = "csr"))]
async fn submit_reset_password<A: AuthApi>(
    auth: &A,
    token: Option<&str>,
    password: &str,
    confirm: &str,
) -> Result<(), String> {
    let (token, password) = validate_reset_input(token, password, confirm).map_err(str::to_owned)?;
    auth.reset_password(&token, &password)
        .await
        .map_err(|e| format!("Reset failed: {e}"))?;
    Ok(())
}

#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    let services = expect_context::<AppServices>();
    let query = use_query_map();

    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let done = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let token = query.with_untracked(|params| params.get("token"));
        let password_value = password.get();
        let confirm_value = confirm.get();
        if let Err(message) = validate_reset_input(token.as_deref(), &password_value, &confirm_value) {
            info.set(message.to_owned());
            return;
        }
        busy.set(true);
        info.set("Updating password...".to_owned());

        #[cfg(feature = "csr")]
        {
            let auth = services.auth.clone();
            leptos::task::spawn_local(async move {
                match submit_reset_password(&auth, token.as_deref(), &password_value, &confirm_value).await {
                    Ok(()) => {
                        done.set(true);
                        info.set("Password updated. You can sign in now.".to_owned());
                    }
                    Err(e) => info.set(e),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (&services, done);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Choose a new password"</h1>
                <form class="login-form" on:submit=on_submit hidden=move || done.get()>
                    <input
                        class="login-input"
                        type="password"
                        placeholder="New password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Confirm password"
                        prop:value=move || confirm.get()
                        on:input=move |ev| confirm.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Update Password"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <a class="login-link" href="/login">"Back to sign in"</a>
            </div>
        </div>
    }
}
