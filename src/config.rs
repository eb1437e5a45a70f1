//! Client configuration resolved at build time.
//!
//! The WASM bundle has no process environment, so base URLs are baked in
//! from `CYCLETRACK_API_URL` / `CYCLETRACK_ML_URL` when the crate is built.
//!
//! The ML URL points at the root of the ML service (or a proxy that strips
//! `/ml`); prediction routes append their own `/api/...` paths.

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

pub const DEFAULT_API_BASE_URL: &str = "/api";
pub const DEFAULT_ML_BASE_URL: &str = "/ml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub ml_base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_values(None, None)
    }
}

impl ClientConfig {
    /// Build config from the variables captured at compile time.
    ///
    /// Optional:
    /// - `CYCLETRACK_API_URL`: default `/api`
    /// - `CYCLETRACK_ML_URL`: default `/ml`
    pub fn from_env() -> Self {
        Self::from_values(option_env!("CYCLETRACK_API_URL"), option_env!("CYCLETRACK_ML_URL"))
    }

    pub fn from_values(api_base_url: Option<&str>, ml_base_url: Option<&str>) -> Self {
        Self {
            api_base_url: base_url_or(api_base_url, DEFAULT_API_BASE_URL),
            ml_base_url: base_url_or(ml_base_url, DEFAULT_ML_BASE_URL),
        }
    }
}

fn base_url_or(raw: Option<&str>, default: &str) -> String {
    let trimmed = raw.map(str::trim).unwrap_or_default().trim_end_matches('/');
    if trimmed.is_empty() {
        default.to_owned()
    } else {
        trimmed.to_owned()
    }
}
