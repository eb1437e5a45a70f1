//! Client for the ML prediction API.
//!
//! SYSTEM CONTEXT
//! ==============
//! The ML service lives behind its own base URL and mounts its prediction
//! routes under `/api`. Every payload is wrapped in
//! `{ success, data, error?, message?, timestamp }`; this module unwraps
//! that envelope so callers see `data` or an `ApiError`.

#[cfg(test)]
#[path = "predictions_test.rs"]
mod predictions_test;

use serde::Deserialize;
use serde_json::{Value, json};

use super::error::ApiError;
use super::http::HttpClient;

const NEXT_CYCLE: &str = "/api/predict/next-cycle";
const PCOS_RISK: &str = "/api/predict/pcos-risk";
const ANALYZE_SYMPTOMS: &str = "/api/analyze/symptoms";
const RECOMMENDATIONS: &str = "/api/recommendations/personalized";

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Value,
    error: Option<String>,
    message: Option<String>,
}

#[derive(Clone, Debug)]
pub struct PredictionService<H> {
    http: H,
}

impl<H: HttpClient> PredictionService<H> {
    pub fn new(http: H) -> Self {
        Self { http }
    }

    /// Predict the next cycle from past cycles (oldest first).
    ///
    /// # Errors
    ///
    /// `Invalid` when `cycles` is empty, `Rejected` when the service reports
    /// failure, otherwise the HTTP error.
    pub async fn predict_next_cycle(&self, cycles: &[Value]) -> Result<Value, ApiError> {
        if cycles.is_empty() {
            return Err(ApiError::Invalid("At least one cycle is required".to_owned()));
        }
        self.call(NEXT_CYCLE, &json!({ "cycles": cycles })).await
    }

    /// # Errors
    ///
    /// `Rejected` when the service reports failure, otherwise the HTTP error.
    pub async fn predict_pcos_risk(&self, profile: &Value) -> Result<Value, ApiError> {
        self.call(PCOS_RISK, profile).await
    }

    /// # Errors
    ///
    /// `Invalid` when `symptoms` is empty, `Rejected` when the service
    /// reports failure, otherwise the HTTP error.
    pub async fn analyze_symptoms(&self, symptoms: &[Value]) -> Result<Value, ApiError> {
        if symptoms.is_empty() {
            return Err(ApiError::Invalid("At least one symptom is required".to_owned()));
        }
        self.call(ANALYZE_SYMPTOMS, &json!({ "symptoms": symptoms })).await
    }

    /// Health recommendations for a user profile, posted as-is.
    ///
    /// # Errors
    ///
    /// `Rejected` when the service reports failure, otherwise the HTTP error.
    pub async fn personalized_recommendations(&self, profile: &Value) -> Result<Value, ApiError> {
        self.call(RECOMMENDATIONS, profile).await
    }

    async fn call(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        let raw = self.http.post(path, body).await?;
        unwrap_envelope(raw)
    }
}

fn unwrap_envelope(raw: Value) -> Result<Value, ApiError> {
    let envelope: Envelope = serde_json::from_value(raw).map_err(|e| ApiError::Decode(e.to_string()))?;
    if envelope.success {
        return Ok(envelope.data);
    }
    let message = envelope
        .message
        .or(envelope.error)
        .unwrap_or_else(|| "prediction failed".to_owned());
    Err(ApiError::Rejected(message))
}
