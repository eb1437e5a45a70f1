//! Next-cycle prediction panel.
//!
//! SYSTEM CONTEXT
//! ==============
//! Watches the dashboard's cycle state. Whenever the backend reports past
//! cycles, they are sent to the ML service and the prediction is shown
//! under the cycle card. Without history there is nothing to predict from,
//! so no request is made.

#[cfg(test)]
#[path = "cycle_prediction_test.rs"]
mod cycle_prediction_test;

use leptos::prelude::*;
use serde_json::Value;
#[cfg(any(test, feature = "csr"))]
use serde_json::{Map, json};

use crate::app::AppServices;
use crate::state::cycle::CycleDataState;

#[cfg(any(test, feature = "csr"))]
fn first_of<'a>(record: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| record.get(key).filter(|v| !v.is_null()))
}

/// Past cycles from the backend's cycle record, in the shape the ML
/// service validates (`start_date` + `cycle_length`, optional
/// `period_length`). Entries missing either required field are skipped.
#[cfg(any(test, feature = "csr"))]
fn prediction_cycles(cycle_data: &Value) -> Vec<Value> {
    let Some(history) = first_of(cycle_data, &["history", "cycles", "pastCycles"]).and_then(Value::as_array) else {
        return Vec::new();
    };
    history
        .iter()
        .filter_map(|cycle| {
            let start = first_of(cycle, &["startDate", "start_date"])?.as_str()?;
            let length = first_of(cycle, &["cycleLength", "cycle_length"])?.as_u64()?;
            let mut entry = Map::new();
            entry.insert("start_date".to_owned(), json!(start));
            entry.insert("cycle_length".to_owned(), json!(length));
            if let Some(period) = first_of(cycle, &["periodLength", "period_length"]).and_then(Value::as_u64) {
                entry.insert("period_length".to_owned(), json!(period));
            }
            Some(Value::Object(entry))
        })
        .collect()
}

/// Date part of an ISO timestamp.
fn day_of(raw: &str) -> &str {
    raw.get(..10).unwrap_or(raw)
}

fn prediction_summary(prediction: &Value) -> Option<String> {
    let start = day_of(prediction.get("predicted_start_date")?.as_str()?);
    let mut summary = format!("Next period around {start}");
    if let Some(length) = prediction.get("predicted_cycle_length").and_then(Value::as_u64) {
        summary.push_str(&format!(" · {length}-day cycle"));
    }
    if let Some(confidence) = prediction.get("confidence").and_then(Value::as_f64) {
        summary.push_str(&format!(" · {:.0}% confidence", confidence.clamp(0.0, 1.0) * 100.0));
    }
    Some(summary)
}

fn fertile_window_label(prediction: &Value) -> Option<String> {
    let window = prediction.get("fertile_window")?;
    let start = day_of(window.get("start")?.as_str()?);
    let end = day_of(window.get("end")?.as_str()?);
    Some(format!("Fertile window {start} to {end}"))
}

#[component]
pub fn CyclePrediction(cycle_state: RwSignal<CycleDataState>) -> impl IntoView {
    let services = expect_context::<AppServices>();
    let prediction = RwSignal::new(None::<Value>);
    let error = RwSignal::new(None::<String>);

    #[cfg(feature = "csr")]
    {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

        let alive = Arc::new(AtomicBool::new(true));
        let latest = Arc::new(AtomicU64::new(0));
        let alive_effect = alive.clone();
        let predictions = services.predictions.clone();
        Effect::new(move || {
            let cycles = cycle_state.with(|s| s.cycle_data.as_ref().map(prediction_cycles).unwrap_or_default());
            if cycles.is_empty() {
                return;
            }
            let request = latest.fetch_add(1, Ordering::Relaxed) + 1;
            let latest = latest.clone();
            let alive = alive_effect.clone();
            let predictions = predictions.clone();
            leptos::task::spawn_local(async move {
                let result = predictions.predict_next_cycle(&cycles).await;
                if !alive.load(Ordering::Relaxed) || latest.load(Ordering::Relaxed) != request {
                    return;
                }
                match result {
                    Ok(data) => {
                        error.set(None);
                        prediction.set(Some(data));
                    }
                    Err(e) => {
                        leptos::logging::warn!("cycle prediction failed: {e}");
                        error.set(Some(e.to_string()));
                    }
                }
            });
        });
        on_cleanup(move || alive.store(false, Ordering::Relaxed));
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (services, cycle_state);
    }

    view! {
        <section class="prediction-card">
            <h2>"Prediction"</h2>
            <Show when=move || error.get().is_some()>
                <p class="prediction-card__error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <p class="prediction-card__summary">
                {move || {
                    prediction
                        .get()
                        .as_ref()
                        .and_then(prediction_summary)
                        .unwrap_or_else(|| "Log a few cycles to see predictions.".to_owned())
                }}
            </p>
            <p class="prediction-card__window">
                {move || prediction.get().as_ref().and_then(fertile_window_label).unwrap_or_default()}
            </p>
        </section>
    }
}
