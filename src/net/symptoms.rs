//! Symptom endpoints.
//!
//! Pure passthrough: no caching, every call is a fresh request, and errors
//! come back exactly as the HTTP client reported them.

#[cfg(test)]
#[path = "symptoms_test.rs"]
mod symptoms_test;

use serde_json::{Value, json};

use super::error::ApiError;
use super::http::HttpClient;
use super::types::SymptomQuery;

const SYMPTOMS: &str = "/symptoms";

#[derive(Clone, Debug)]
pub struct SymptomService<H> {
    http: H,
}

impl<H: HttpClient> SymptomService<H> {
    pub fn new(http: H) -> Self {
        Self { http }
    }

    /// `GET /symptoms` filtered by date and/or range.
    ///
    /// # Errors
    ///
    /// Propagates the HTTP error.
    pub async fn get_symptoms(&self, query: &SymptomQuery) -> Result<Value, ApiError> {
        self.http.get(&with_query(SYMPTOMS, &query.pairs())).await
    }

    /// # Errors
    ///
    /// Propagates the HTTP error.
    pub async fn get_symptoms_by_date(&self, date: &str) -> Result<Value, ApiError> {
        self.get_symptoms(&SymptomQuery::on(date)).await
    }

    /// # Errors
    ///
    /// Propagates the HTTP error.
    pub async fn get_symptoms_in_range(&self, start: &str, end: &str) -> Result<Value, ApiError> {
        self.get_symptoms(&SymptomQuery::between(start, end)).await
    }

    /// # Errors
    ///
    /// Propagates the HTTP error.
    pub async fn create_symptom(&self, symptom: &Value) -> Result<Value, ApiError> {
        self.http.post(SYMPTOMS, symptom).await
    }

    /// # Errors
    ///
    /// Propagates the HTTP error.
    pub async fn update_symptom(&self, id: &str, symptom: &Value) -> Result<Value, ApiError> {
        self.http.put(&symptom_path(id), symptom).await
    }

    /// # Errors
    ///
    /// Propagates the HTTP error.
    pub async fn delete_symptom(&self, id: &str) -> Result<Value, ApiError> {
        self.http.delete(&symptom_path(id)).await
    }

    /// Most recent entries, newest first as the backend orders them.
    ///
    /// # Errors
    ///
    /// Propagates the HTTP error.
    pub async fn get_symptom_history(&self, limit: u32) -> Result<Value, ApiError> {
        let limit = limit.to_string();
        self.http
            .get(&with_query(&format!("{SYMPTOMS}/history"), &[("limit", limit.as_str())]))
            .await
    }

    /// Aggregated trends over a named window such as `"30d"`.
    ///
    /// # Errors
    ///
    /// Propagates the HTTP error.
    pub async fn get_symptom_trends(&self, range: &str) -> Result<Value, ApiError> {
        self.http
            .get(&with_query(&format!("{SYMPTOMS}/trends"), &[("range", range)]))
            .await
    }

    /// # Errors
    ///
    /// Propagates the HTTP error.
    pub async fn bulk_create_symptoms(&self, symptoms: &[Value]) -> Result<Value, ApiError> {
        self.http
            .post(&format!("{SYMPTOMS}/bulk"), &json!({ "symptoms": symptoms }))
            .await
    }
}

fn symptom_path(id: &str) -> String {
    format!("{SYMPTOMS}/{}", urlencoding::encode(id))
}

fn with_query(path: &str, pairs: &[(&str, &str)]) -> String {
    if pairs.is_empty() {
        return path.to_owned();
    }
    let query = pairs
        .iter()
        .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{path}?{query}")
}
