//! Cycle data state and the hook that keeps it in sync with the backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! The dashboard mounts `use_cycle_data`, which fetches once on mount and
//! exposes refetch and period logging. Writes are followed by a full refetch
//! rather than a local merge, so the view always shows server-confirmed data.
//!
//! CANCELLATION
//! ============
//! Every operation captures a generation number. A response is applied only
//! if its generation is still the latest and the owning component is still
//! mounted; anything else is dropped.

#[cfg(test)]
#[path = "cycle_test.rs"]
mod cycle_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use leptos::prelude::*;
use serde_json::Value;

use crate::net::cycles::CycleApi;
use crate::net::error::ApiError;
use crate::net::types::{CyclePhase, PeriodLogEntry};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleStatus {
    Idle,
    Loading,
    Ready,
    Error,
}

/// Component-local view of the current cycle.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CycleDataState {
    pub cycle_data: Option<Value>,
    pub loading: bool,
    pub error: Option<String>,
}

impl CycleDataState {
    pub fn status(&self) -> CycleStatus {
        if self.loading {
            CycleStatus::Loading
        } else if self.error.is_some() {
            CycleStatus::Error
        } else if self.cycle_data.is_some() {
            CycleStatus::Ready
        } else {
            CycleStatus::Idle
        }
    }

    /// Day of the current cycle, if the backend reported one.
    pub fn current_day(&self) -> Option<u32> {
        let data = self.cycle_data.as_ref()?;
        ["currentDay", "cycleDay", "day"]
            .iter()
            .find_map(|key| data.get(key).and_then(Value::as_u64))
            .and_then(|day| u32::try_from(day).ok())
    }

    pub fn phase(&self) -> Option<CyclePhase> {
        self.current_day().and_then(CyclePhase::for_day)
    }

    fn begin(&mut self) {
        self.loading = true;
    }

    fn succeed(&mut self, data: Value) {
        self.cycle_data = Some(data);
        self.error = None;
        self.loading = false;
    }

    fn fail(&mut self, message: String) {
        self.error = Some(message);
        self.loading = false;
    }
}

/// Somewhere the hook can write its state.
///
/// Components use an `RwSignal`; tests use a plain cell.
pub trait StateCell<T> {
    fn modify(&self, f: impl FnOnce(&mut T));
}

impl<T: Send + Sync + 'static> StateCell<T> for RwSignal<T> {
    fn modify(&self, f: impl FnOnce(&mut T)) {
        self.update(f);
    }
}

/// Marks a hook as unmounted. Cheap to clone into cleanup callbacks.
#[derive(Clone, Debug)]
pub struct Disposer {
    alive: Arc<AtomicBool>,
    generation: Arc<AtomicU64>,
}

impl Disposer {
    pub fn dispose(&self) {
        self.alive.store(false, Ordering::Relaxed);
        self.generation.fetch_add(1, Ordering::Relaxed);
    }
}

#[derive(Clone, Debug)]
pub struct CycleDataHook<A, C> {
    api: A,
    state: C,
    alive: Arc<AtomicBool>,
    generation: Arc<AtomicU64>,
}

impl<A: CycleApi, C: StateCell<CycleDataState>> CycleDataHook<A, C> {
    pub fn new(api: A, state: C) -> Self {
        Self { api, state, alive: Arc::new(AtomicBool::new(true)), generation: Arc::new(AtomicU64::new(0)) }
    }

    pub fn state(&self) -> &C {
        &self.state
    }

    pub fn disposer(&self) -> Disposer {
        Disposer { alive: Arc::clone(&self.alive), generation: Arc::clone(&self.generation) }
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Relaxed)
    }

    /// Reload the current cycle. Prior data survives a failed fetch.
    pub async fn fetch_cycle_data(&self) {
        let generation = self.begin();
        let result = self.api.current_cycle().await;
        let applied = self.apply(generation, move |s| match result {
            Ok(data) => s.succeed(data),
            Err(e) => s.fail(e.to_string()),
        });
        if !applied {
            leptos::logging::log!("discarding stale cycle data response");
        }
    }

    /// Post a period entry, then refetch the full cycle.
    ///
    /// # Errors
    ///
    /// Returns the post error after recording its message in state. No
    /// refetch happens on failure.
    pub async fn log_period(&self, entry: &PeriodLogEntry) -> Result<Value, ApiError> {
        let generation = self.begin();
        match self.api.log_period(entry).await {
            Ok(resp) => {
                if self.is_alive() {
                    self.fetch_cycle_data().await;
                }
                Ok(resp)
            }
            Err(e) => {
                let message = e.to_string();
                self.apply(generation, move |s| s.fail(message));
                Err(e)
            }
        }
    }

    fn begin(&self) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::Relaxed) + 1;
        if self.is_alive() {
            self.state.modify(CycleDataState::begin);
        }
        generation
    }

    fn apply(&self, generation: u64, f: impl FnOnce(&mut CycleDataState)) -> bool {
        if !self.is_alive() || self.generation.load(Ordering::Relaxed) != generation {
            return false;
        }
        self.state.modify(f);
        true
    }
}

impl<A, C> CycleDataHook<A, C>
where
    A: CycleApi + Clone + 'static,
    C: StateCell<CycleDataState> + Clone + 'static,
{
    /// The initial load a freshly mounted component runs.
    pub fn mount_fetch(&self) -> impl Future<Output = ()> + 'static {
        let hook = self.clone();
        async move { hook.fetch_cycle_data().await }
    }
}

/// Mount-time hook: fetches immediately and stops applying results once the
/// calling component is cleaned up.
pub fn use_cycle_data<A>(api: A) -> CycleDataHook<A, RwSignal<CycleDataState>>
where
    A: CycleApi + Clone + 'static,
{
    let hook = CycleDataHook::new(api, RwSignal::new(CycleDataState::default()));
    let disposer = hook.disposer();
    on_cleanup(move || disposer.dispose());

    #[cfg(feature = "csr")]
    {
        leptos::task::spawn_local(hook.mount_fetch());
    }

    hook
}
