//! JSON-over-HTTP client wrapper.
//!
//! Browser build (`csr`): real HTTP calls via `gloo-net`.
//! Elsewhere: every request fails with a network error, since the backend
//! is only reachable from the browser.
//!
//! DESIGN
//! ======
//! Services depend on the `HttpClient` capability rather than on `gloo-net`
//! so they can be driven by a scripted fake in tests.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use serde_json::Value;

use super::error::ApiError;
#[cfg(feature = "csr")]
use super::session::TOKEN_KEY;
use super::session::SessionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// Minimal REST capability used by every service.
///
/// Implementors only provide `request`; the verb helpers forward to it.
#[allow(async_fn_in_trait)]
pub trait HttpClient {
    /// Issue a request and parse the response body as JSON.
    ///
    /// # Errors
    ///
    /// `Network` on transport failure, `Status` on a non-2xx response,
    /// `Decode` when a 2xx body is not JSON.
    async fn request(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value, ApiError>;

    async fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.request(Method::Get, path, None).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        self.request(Method::Post, path, Some(body)).await
    }

    async fn put(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        self.request(Method::Put, path, Some(body)).await
    }

    async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.request(Method::Delete, path, None).await
    }
}

/// Browser HTTP client rooted at a base URL.
///
/// The stored session token, when present, is sent as a bearer token.
#[derive(Clone, Debug)]
pub struct RestClient<S> {
    base_url: String,
    store: S,
}

impl<S: SessionStore> RestClient<S> {
    pub fn new(base_url: impl Into<String>, store: S) -> Self {
        Self { base_url: base_url.into(), store }
    }
}

impl<S: SessionStore> HttpClient for RestClient<S> {
    async fn request(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value, ApiError> {
        #[cfg(feature = "csr")]
        {
            use gloo_net::http::Request;

            let url = join_url(&self.base_url, path);
            let mut builder = match method {
                Method::Get => Request::get(&url),
                Method::Post => Request::post(&url),
                Method::Put => Request::put(&url),
                Method::Delete => Request::delete(&url),
            };
            if let Some(token) = self.store.get(TOKEN_KEY) {
                builder = builder.header("Authorization", &bearer(&token));
            }
            let request = match body {
                Some(body) => builder.json(body),
                None => builder.build(),
            }
            .map_err(|e| ApiError::Network(e.to_string()))?;

            let resp = request.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
            let status = resp.status();
            let text = resp.text().await.map_err(|e| ApiError::Network(e.to_string()))?;
            if !resp.ok() {
                let body = parse_body(&text).unwrap_or(Value::Null);
                return Err(ApiError::from_status(status, &body));
            }
            parse_body(&text)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (&self.store, method, body);
            Err(ApiError::Network(format!(
                "{} is only reachable from the browser",
                join_url(&self.base_url, path)
            )))
        }
    }
}

fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

#[cfg(any(test, feature = "csr"))]
fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Empty bodies (204, bare acks) parse as `null`.
#[cfg(any(test, feature = "csr"))]
fn parse_body(text: &str) -> Result<Value, ApiError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}
