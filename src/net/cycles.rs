//! Cycle endpoints backing the cycle data hook.

#[cfg(test)]
#[path = "cycles_test.rs"]
mod cycles_test;

use serde_json::Value;

use super::error::ApiError;
use super::http::HttpClient;
use super::types::PeriodLogEntry;

const CURRENT: &str = "/cycles/current";
const PERIOD: &str = "/cycles/period";

/// Cycle capability the hook depends on.
#[allow(async_fn_in_trait)]
pub trait CycleApi {
    /// # Errors
    ///
    /// Propagates the HTTP error.
    async fn current_cycle(&self) -> Result<Value, ApiError>;

    /// # Errors
    ///
    /// `Invalid` if the entry fails validation; otherwise the HTTP error.
    async fn log_period(&self, entry: &PeriodLogEntry) -> Result<Value, ApiError>;
}

#[derive(Clone, Debug)]
pub struct CycleService<H> {
    http: H,
}

impl<H: HttpClient> CycleService<H> {
    pub fn new(http: H) -> Self {
        Self { http }
    }
}

impl<H: HttpClient> CycleApi for CycleService<H> {
    async fn current_cycle(&self) -> Result<Value, ApiError> {
        self.http.get(CURRENT).await
    }

    async fn log_period(&self, entry: &PeriodLogEntry) -> Result<Value, ApiError> {
        entry.validate()?;
        let body = serde_json::to_value(entry).map_err(|e| ApiError::Invalid(e.to_string()))?;
        self.http.post(PERIOD, &body).await
    }
}
