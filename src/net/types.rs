//! Request and response DTOs for the REST backend.
//!
//! DESIGN
//! ======
//! Records the backend owns (user, cycle data, symptoms) stay as opaque
//! `serde_json::Value`s; only the inputs this client builds are typed.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::ApiError;

const DATE_FORMAT: &str = "%Y-%m-%d";
const PERIOD_LENGTH_DAYS: std::ops::RangeInclusive<i64> = 1..=10;

/// Login input. Never persisted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Body returned by login/register, kept exactly as the backend sent it.
///
/// A session is only established when `token` is a string; every other
/// shape passes through without being reinterpreted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthResponse(Value);

impl AuthResponse {
    pub fn token(&self) -> Option<&str> {
        self.0.get("token").and_then(Value::as_str)
    }

    /// The `user` record; `None` when absent or `null`.
    pub fn user(&self) -> Option<&Value> {
        self.0.get("user").filter(|user| !user.is_null())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn body(&self) -> &Value {
        &self.0
    }

    pub fn into_body(self) -> Value {
        self.0
    }
}

impl From<Value> for AuthResponse {
    fn from(body: Value) -> Self {
        Self(body)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowIntensity {
    Spotting,
    Light,
    Medium,
    Heavy,
}

/// A period to record. Posting one triggers a full cycle refetch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodLogEntry {
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow: Option<FlowIntensity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl PeriodLogEntry {
    pub fn starting(start_date: impl Into<String>) -> Self {
        Self { start_date: start_date.into(), end_date: None, flow: None, notes: None }
    }

    /// Check dates before anything is sent.
    ///
    /// # Errors
    ///
    /// `ApiError::Invalid` for malformed dates, an end before the start, or
    /// a period longer than ten days.
    pub fn validate(&self) -> Result<(), ApiError> {
        let start = parse_date("start date", &self.start_date)?;
        let Some(end) = self.end_date.as_deref() else {
            return Ok(());
        };
        let end = parse_date("end date", end)?;
        if end < start {
            return Err(ApiError::Invalid("End date cannot be before start date.".to_owned()));
        }
        let length = (end - start).num_days() + 1;
        if !PERIOD_LENGTH_DAYS.contains(&length) {
            return Err(ApiError::Invalid(format!(
                "Period length must be between {} and {} days.",
                PERIOD_LENGTH_DAYS.start(),
                PERIOD_LENGTH_DAYS.end()
            )));
        }
        Ok(())
    }
}

fn parse_date(label: &str, raw: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| ApiError::Invalid(format!("Invalid {label}: expected YYYY-MM-DD.")))
}

/// Filter for `GET /symptoms`. Unset fields are left out of the query.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SymptomQuery {
    pub date: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

impl SymptomQuery {
    pub fn on(date: impl Into<String>) -> Self {
        Self { date: Some(date.into()), ..Self::default() }
    }

    pub fn between(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self { start: Some(start.into()), end: Some(end.into()), ..Self::default() }
    }

    /// Query string pairs in the order the backend documents them.
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        [("date", &self.date), ("startDate", &self.start), ("endDate", &self.end)]
            .into_iter()
            .filter_map(|(key, value)| value.as_deref().map(|v| (key, v)))
            .collect()
    }
}

/// Phase of the menstrual cycle for a 1-based cycle day.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CyclePhase {
    Menstrual,
    Follicular,
    Ovulation,
    Luteal,
}

impl CyclePhase {
    /// `None` for day 0. Days past 28 stay luteal until the next period.
    pub fn for_day(day: u32) -> Option<Self> {
        match day {
            0 => None,
            1..=5 => Some(Self::Menstrual),
            6..=13 => Some(Self::Follicular),
            14..=16 => Some(Self::Ovulation),
            _ => Some(Self::Luteal),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Menstrual => "Menstrual",
            Self::Follicular => "Follicular",
            Self::Ovulation => "Ovulation",
            Self::Luteal => "Luteal",
        }
    }
}
