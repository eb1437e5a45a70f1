//! Auth endpoints and the persisted client session.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages talk to `AuthApi`; the concrete `AuthService` forwards to the
//! backend and mirrors the session (token + user) into a `SessionStore`.
//!
//! ERROR HANDLING
//! ==============
//! Backend errors propagate untouched. The only swallowed failures are a
//! malformed stored user (read as "no user") and the logout notification,
//! which never blocks the local session from ending.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use serde::Serialize;
use serde_json::{Value, json};

use super::error::ApiError;
use super::http::{HttpClient, Method};
use super::session::{SessionStore, TOKEN_KEY, USER_KEY};
use super::types::{AuthResponse, Credentials};

const LOGIN: &str = "/auth/login";
const REGISTER: &str = "/auth/register";
const LOGOUT: &str = "/auth/logout";
const ME: &str = "/auth/me";
const FORGOT_PASSWORD: &str = "/auth/forgot-password";
const RESET_PASSWORD: &str = "/auth/reset-password";

/// Auth capability the form pages depend on.
#[allow(async_fn_in_trait)]
pub trait AuthApi {
    /// # Errors
    ///
    /// Propagates the HTTP error, or `Storage` if the session could not be saved.
    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError>;

    /// # Errors
    ///
    /// Propagates the HTTP error.
    async fn forgot_password(&self, email: &str) -> Result<Value, ApiError>;

    /// # Errors
    ///
    /// Propagates the HTTP error.
    async fn reset_password(&self, token: &str, password: &str) -> Result<Value, ApiError>;

    /// End the session locally, then tell the backend.
    async fn logout(&self);

    /// # Errors
    ///
    /// Propagates the HTTP error.
    async fn current_user(&self) -> Result<Value, ApiError>;

    /// Drop the stored token and user without contacting the backend.
    fn clear_session(&self);

    fn stored_user(&self) -> Option<Value>;

    fn is_authenticated(&self) -> bool;
}

#[derive(Clone, Debug)]
pub struct AuthService<H, S> {
    http: H,
    store: S,
}

impl<H: HttpClient, S: SessionStore> AuthService<H, S> {
    pub fn new(http: H, store: S) -> Self {
        Self { http, store }
    }

    /// Create an account. Same session contract as `login`.
    ///
    /// # Errors
    ///
    /// Propagates the HTTP error, or `Storage` if the session could not be saved.
    pub async fn register<T: Serialize>(&self, user_data: &T) -> Result<AuthResponse, ApiError> {
        let body = serde_json::to_value(user_data).map_err(|e| ApiError::Invalid(e.to_string()))?;
        let resp = self.http.post(REGISTER, &body).await?;
        self.establish_session(resp)
    }

    /// `GET /auth/me`, never cached.
    ///
    /// # Errors
    ///
    /// Propagates the HTTP error.
    pub async fn get_current_user(&self) -> Result<Value, ApiError> {
        self.http.get(ME).await
    }

    /// Stored user record; `None` when absent, `null`, or unparsable.
    pub fn get_stored_user(&self) -> Option<Value> {
        let raw = self.store.get(USER_KEY)?;
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Null) => None,
            Ok(user) => Some(user),
            Err(e) => {
                leptos::logging::warn!("ignoring malformed stored user: {e}");
                None
            }
        }
    }

    pub fn get_stored_token(&self) -> Option<String> {
        self.store.get(TOKEN_KEY)
    }

    fn establish_session(&self, resp: Value) -> Result<AuthResponse, ApiError> {
        let resp = AuthResponse::from(resp);
        if let Some(token) = resp.token() {
            let user = resp.user().cloned().unwrap_or_default();
            self.save_session(token, &user)?;
        }
        Ok(resp)
    }

    /// User first, token last: the token is what makes the session count,
    /// so it must never land without its user. A failed token write ends
    /// whatever session was there before as well.
    fn save_session(&self, token: &str, user: &Value) -> Result<(), ApiError> {
        if let Err(e) = self
            .store
            .set(USER_KEY, &user.to_string())
            .and_then(|()| self.store.set(TOKEN_KEY, token))
        {
            self.clear_session();
            return Err(e);
        }
        Ok(())
    }

}

impl<H: HttpClient, S: SessionStore> AuthApi for AuthService<H, S> {
    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        let body = json!({ "email": credentials.email, "password": credentials.password });
        let resp = self.http.post(LOGIN, &body).await?;
        self.establish_session(resp)
    }

    async fn forgot_password(&self, email: &str) -> Result<Value, ApiError> {
        self.http.post(FORGOT_PASSWORD, &json!({ "email": email })).await
    }

    async fn reset_password(&self, token: &str, password: &str) -> Result<Value, ApiError> {
        self.http
            .post(RESET_PASSWORD, &json!({ "token": token, "password": password }))
            .await
    }

    async fn logout(&self) {
        self.clear_session();
        if let Err(e) = self.http.request(Method::Post, LOGOUT, None).await {
            leptos::logging::warn!("logout notification failed: {e}");
        }
    }

    async fn current_user(&self) -> Result<Value, ApiError> {
        self.get_current_user().await
    }

    fn clear_session(&self) {
        self.store.remove(TOKEN_KEY);
        self.store.remove(USER_KEY);
    }

    fn stored_user(&self) -> Option<Value> {
        self.get_stored_user()
    }

    fn is_authenticated(&self) -> bool {
        self.get_stored_token().is_some()
    }
}
