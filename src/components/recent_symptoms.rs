//! Recent symptom entries shown under the cycle card.

#[cfg(test)]
#[path = "recent_symptoms_test.rs"]
mod recent_symptoms_test;

use leptos::prelude::*;
use serde_json::Value;

use crate::app::AppServices;

#[cfg(any(test, feature = "csr"))]
const RECENT_LIMIT: u32 = 5;

/// History may come back bare or wrapped in `symptoms` / `data`.
#[cfg(any(test, feature = "csr"))]
fn symptom_entries(body: Value) -> Vec<Value> {
    match body {
        Value::Array(items) => items,
        Value::Object(mut map) => ["symptoms", "data"]
            .iter()
            .find_map(|key| match map.remove(*key) {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            })
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

fn symptom_label(symptom: &Value) -> String {
    let name = ["type", "name", "symptom"]
        .iter()
        .find_map(|key| symptom.get(key).and_then(Value::as_str))
        .unwrap_or("symptom")
        .replace('_', " ");
    let date = symptom.get("date").and_then(Value::as_str);
    let severity = symptom.get("severity").and_then(Value::as_u64);
    match (date, severity) {
        (Some(date), Some(severity)) => format!("{date}: {name} ({severity}/10)"),
        (Some(date), None) => format!("{date}: {name}"),
        (None, Some(severity)) => format!("{name} ({severity}/10)"),
        (None, None) => name,
    }
}

#[component]
pub fn RecentSymptoms() -> impl IntoView {
    let services = expect_context::<AppServices>();
    let items = RwSignal::new(Vec::<Value>::new());
    let error = RwSignal::new(None::<String>);

    #[cfg(feature = "csr")]
    {
        let alive = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(true));
        let alive_task = alive.clone();
        let symptoms = services.symptoms.clone();
        leptos::task::spawn_local(async move {
            let result = symptoms.get_symptom_history(RECENT_LIMIT).await;
            if !alive_task.load(std::sync::atomic::Ordering::Relaxed) {
                return;
            }
            match result {
                Ok(body) => items.set(symptom_entries(body)),
                Err(e) => {
                    leptos::logging::warn!("symptom history failed: {e}");
                    error.set(Some(e.to_string()));
                }
            }
        });
        on_cleanup(move || alive.store(false, std::sync::atomic::Ordering::Relaxed));
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = services;
    }

    view! {
        <section class="symptom-card">
            <h2>"Recent symptoms"</h2>
            <Show when=move || error.get().is_some()>
                <p class="symptom-card__error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <Show
                when=move || !items.get().is_empty()
                fallback=|| view! { <p class="symptom-card__empty">"Nothing logged yet."</p> }
            >
                <ul class="symptom-card__list">
                    {move || {
                        items
                            .get()
                            .iter()
                            .map(|symptom| view! { <li>{symptom_label(symptom)}</li> })
                            .collect_view()
                    }}
                </ul>
            </Show>
        </section>
    }
}
