//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Seeded from the persisted session on startup and refreshed after
//! login/logout. Route guards read it to decide on login redirects.
//!
//! A stored token is only a claim: on startup the state stays `loading`
//! until `/auth/me` confirms it, so guards hold off redirecting meanwhile.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use serde_json::Value;

use crate::net::auth::AuthApi;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<Value>,
    pub authenticated: bool,
    pub loading: bool,
}

impl AuthState {
    /// Snapshot of whatever session the store currently holds.
    pub fn from_session(auth: &impl AuthApi) -> Self {
        Self { user: auth.stored_user(), authenticated: auth.is_authenticated(), loading: false }
    }

    /// Startup snapshot. With a stored token the state starts loading and
    /// shows the stored user until `restore_session` settles it.
    pub fn pending(auth: &impl AuthApi) -> Self {
        let state = Self::from_session(auth);
        Self { loading: state.authenticated, ..state }
    }

    /// Display name for the header, falling back to the email or a generic label.
    pub fn display_name(&self) -> String {
        self.user
            .as_ref()
            .and_then(|user| {
                ["name", "email"]
                    .iter()
                    .find_map(|key| user.get(key).and_then(Value::as_str))
            })
            .unwrap_or("me")
            .to_owned()
    }
}

/// Confirm a stored token against the backend.
///
/// A 401 ends the local session. Other failures keep the stored session so
/// an offline start still shows the dashboard.
pub async fn restore_session(auth: &impl AuthApi) -> AuthState {
    if !auth.is_authenticated() {
        return AuthState::default();
    }
    match auth.current_user().await {
        Ok(body) => {
            let user = match body {
                Value::Object(mut map) if map.contains_key("user") => map.remove("user").unwrap_or_default(),
                other => other,
            };
            let user = if user.is_null() { auth.stored_user() } else { Some(user) };
            AuthState { user, authenticated: true, loading: false }
        }
        Err(e) if e.status() == Some(401) => {
            leptos::logging::warn!("stored session rejected: {e}");
            auth.clear_session();
            AuthState::default()
        }
        Err(e) => {
            leptos::logging::warn!("could not confirm stored session: {e}");
            AuthState::from_session(auth)
        }
    }
}
