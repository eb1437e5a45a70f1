//! Dashboard: current cycle, next-cycle prediction, period logging, and logout.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the authenticated landing route. It mounts the cycle data hook,
//! which fetches on mount and refetches after every logged period.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::app::AppServices;
use crate::components::cycle_prediction::CyclePrediction;
use crate::components::recent_symptoms::RecentSymptoms;
use crate::net::types::PeriodLogEntry;
use crate::state::auth::AuthState;
use crate::state::cycle::{CycleDataState, CycleStatus, use_cycle_data};
use crate::util::auth::install_unauth_redirect;

fn build_period_entry(start: &str, end: &str) -> Result<PeriodLogEntry, String> {
    let start = start.trim();
    if start.is_empty() {
        return Err("Pick the first day of your period.".to_owned());
    }
    let end = end.trim();
    let entry = PeriodLogEntry {
        end_date: (!end.is_empty()).then(|| end.to_owned()),
        ..PeriodLogEntry::starting(start)
    };
    entry.validate().map_err(|e| e.to_string())?;
    Ok(entry)
}

fn cycle_summary(state: &CycleDataState) -> String {
    match (state.current_day(), state.phase()) {
        (Some(day), Some(phase)) => format!("Day {day} · {}", phase.label()),
        _ if state.status() == CycleStatus::Loading && state.cycle_data.is_none() => "Loading cycle...".to_owned(),
        _ if state.cycle_data.is_some() => "No active cycle.".to_owned(),
        _ => "No cycle data yet.".to_owned(),
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let services = expect_context::<AppServices>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();
    install_unauth_redirect(auth, navigate);

    let cycle = use_cycle_data(services.cycles.clone());
    let cycle_state = *cycle.state();

    let start_date = RwSignal::new(String::new());
    let end_date = RwSignal::new(String::new());
    let form_message = RwSignal::new(String::new());

    let log_cycle = cycle.clone();
    let on_log_period = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if cycle_state.get_untracked().loading {
            return;
        }
        let entry = match build_period_entry(&start_date.get(), &end_date.get()) {
            Ok(entry) => entry,
            Err(message) => {
                form_message.set(message);
                return;
            }
        };
        form_message.set(String::new());

        #[cfg(feature = "csr")]
        {
            let hook = log_cycle.clone();
            leptos::task::spawn_local(async move {
                match hook.log_period(&entry).await {
                    Ok(_) => {
                        start_date.set(String::new());
                        end_date.set(String::new());
                        form_message.set("Period logged.".to_owned());
                    }
                    Err(e) => form_message.set(format!("Could not log period: {e}")),
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (&log_cycle, entry);
        }
    };

    let refresh_cycle = cycle.clone();
    let on_refresh = move |_| {
        #[cfg(feature = "csr")]
        {
            let hook = refresh_cycle.clone();
            leptos::task::spawn_local(async move { hook.fetch_cycle_data().await });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = &refresh_cycle;
        }
    };

    let logout_services = services.clone();
    let on_logout = move |_| {
        #[cfg(feature = "csr")]
        {
            use crate::net::auth::AuthApi;

            let auth_service = logout_services.auth.clone();
            leptos::task::spawn_local(async move {
                auth_service.logout().await;
                auth.set(AuthState::default());
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = &logout_services;
        }
    };

    view! {
        <Show
            when=move || auth.get().authenticated
            fallback=|| view! { <div class="dashboard-page">"Redirecting..."</div> }
        >
            <div class="dashboard-page">
                <header class="dashboard-header">
                    <h1>"Cycletrack"</h1>
                    <span class="dashboard-user">{move || auth.get().display_name()}</span>
                    <button class="btn" on:click=on_logout.clone()>"Log out"</button>
                </header>
                <section class="cycle-card">
                    <h2>"Current cycle"</h2>
                    <p class="cycle-card__summary">{move || cycle_summary(&cycle_state.get())}</p>
                    <Show when=move || cycle_state.get().error.is_some()>
                        <p class="cycle-card__error">{move || cycle_state.get().error.unwrap_or_default()}</p>
                    </Show>
                    <button class="btn" on:click=on_refresh.clone() disabled=move || cycle_state.get().loading>
                        "Refresh"
                    </button>
                </section>
                <section class="period-card">
                    <h2>"Log a period"</h2>
                    <form class="period-form" on:submit=on_log_period.clone()>
                        <label>
                            "Start"
                            <input
                                type="date"
                                prop:value=move || start_date.get()
                                on:input=move |ev| start_date.set(event_target_value(&ev))
                            />
                        </label>
                        <label>
                            "End (optional)"
                            <input
                                type="date"
                                prop:value=move || end_date.get()
                                on:input=move |ev| end_date.set(event_target_value(&ev))
                            />
                        </label>
                        <button class="btn btn--primary" type="submit" disabled=move || cycle_state.get().loading>
                            "Save"
                        </button>
                    </form>
                    <Show when=move || !form_message.get().is_empty()>
                        <p class="period-card__message">{move || form_message.get()}</p>
                    </Show>
                </section>
                <CyclePrediction cycle_state=cycle_state/>
                <RecentSymptoms/>
            </div>
        </Show>
    }
}
