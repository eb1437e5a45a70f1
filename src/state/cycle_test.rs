use super::*;
use crate::net::fake::server_error;
use futures::channel::oneshot;
use futures::executor::block_on;
use futures::future::join;
use leptos::reactive::owner::Owner;
use serde_json::json;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

#[derive(Clone, Default)]
struct TestCell(Rc<RefCell<CycleDataState>>);

impl TestCell {
    fn snapshot(&self) -> CycleDataState {
        self.0.borrow().clone()
    }
}

impl StateCell<CycleDataState> for TestCell {
    fn modify(&self, f: impl FnOnce(&mut CycleDataState)) {
        f(&mut self.0.borrow_mut());
    }
}

#[derive(Default)]
struct FakeInner {
    current: VecDeque<Result<Value, ApiError>>,
    posts: VecDeque<Result<Value, ApiError>>,
    calls: Vec<&'static str>,
    seen_loading: Vec<bool>,
    on_fetch: Option<Box<dyn FnOnce()>>,
    gate: Option<oneshot::Receiver<()>>,
}

/// Scripted `CycleApi` that also records whether loading was set mid-call.
#[derive(Clone, Default)]
struct FakeCycles {
    inner: Rc<RefCell<FakeInner>>,
    observed: TestCell,
}

impl FakeCycles {
    fn observing(observed: &TestCell) -> Self {
        Self { inner: Rc::default(), observed: observed.clone() }
    }

    fn fetch_returns(&self, result: Result<Value, ApiError>) -> &Self {
        self.inner.borrow_mut().current.push_back(result);
        self
    }

    fn post_returns(&self, result: Result<Value, ApiError>) -> &Self {
        self.inner.borrow_mut().posts.push_back(result);
        self
    }

    fn calls(&self) -> Vec<&'static str> {
        self.inner.borrow().calls.clone()
    }

    fn record(&self, call: &'static str) {
        let loading = self.observed.snapshot().loading;
        let mut inner = self.inner.borrow_mut();
        inner.calls.push(call);
        inner.seen_loading.push(loading);
    }
}

impl CycleApi for FakeCycles {
    async fn current_cycle(&self) -> Result<Value, ApiError> {
        self.record("current");
        let hook = self.inner.borrow_mut().on_fetch.take();
        if let Some(hook) = hook {
            hook();
        }
        let (result, gate) = {
            let mut inner = self.inner.borrow_mut();
            (inner.current.pop_front().unwrap_or_else(|| Ok(json!({}))), inner.gate.take())
        };
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        result
    }

    async fn log_period(&self, _entry: &PeriodLogEntry) -> Result<Value, ApiError> {
        self.record("post");
        self.inner.borrow_mut().posts.pop_front().unwrap_or_else(|| Ok(json!({})))
    }
}

fn hook() -> (CycleDataHook<FakeCycles, TestCell>, FakeCycles, TestCell) {
    let cell = TestCell::default();
    let api = FakeCycles::observing(&cell);
    (CycleDataHook::new(api.clone(), cell.clone()), api, cell)
}

// =============================================================
// CycleDataState
// =============================================================

#[test]
fn state_default_is_idle() {
    let state = CycleDataState::default();
    assert_eq!(state.status(), CycleStatus::Idle);
    assert!(!state.loading);
}

#[test]
fn state_reads_current_day_and_phase() {
    let state = CycleDataState { cycle_data: Some(json!({ "currentDay": 15 })), ..CycleDataState::default() };
    assert_eq!(state.current_day(), Some(15));
    assert_eq!(state.phase(), Some(CyclePhase::Ovulation));
    assert_eq!(state.status(), CycleStatus::Ready);

    let fallback = CycleDataState { cycle_data: Some(json!({ "cycleDay": 2 })), ..CycleDataState::default() };
    assert_eq!(fallback.phase(), Some(CyclePhase::Menstrual));

    let missing = CycleDataState { cycle_data: Some(json!({ "note": "x" })), ..CycleDataState::default() };
    assert_eq!(missing.current_day(), None);
}

// =============================================================
// fetch_cycle_data
// =============================================================

#[test]
fn fetch_success_stores_data_and_clears_loading() {
    let (hook, api, cell) = hook();
    api.fetch_returns(Ok(json!({ "currentDay": 3 })));

    block_on(hook.fetch_cycle_data());

    let state = cell.snapshot();
    assert_eq!(state.cycle_data, Some(json!({ "currentDay": 3 })));
    assert_eq!(state.error, None);
    assert!(!state.loading);
    assert_eq!(api.inner.borrow().seen_loading, vec![true]);
}

#[test]
fn fetch_success_clears_previous_error() {
    let (hook, api, cell) = hook();
    api.fetch_returns(Err(server_error("down"))).fetch_returns(Ok(json!({ "currentDay": 4 })));

    block_on(hook.fetch_cycle_data());
    assert_eq!(cell.snapshot().status(), CycleStatus::Error);

    block_on(hook.fetch_cycle_data());
    assert_eq!(cell.snapshot().error, None);
    assert_eq!(cell.snapshot().status(), CycleStatus::Ready);
}

#[test]
fn fetch_failure_keeps_prior_data_and_sets_error() {
    let (hook, api, cell) = hook();
    api.fetch_returns(Ok(json!({ "currentDay": 9 })))
        .fetch_returns(Err(ApiError::Network("offline".to_owned())));

    block_on(hook.fetch_cycle_data());
    block_on(hook.fetch_cycle_data());

    let state = cell.snapshot();
    assert_eq!(state.cycle_data, Some(json!({ "currentDay": 9 })));
    assert_eq!(state.error.as_deref(), Some("network error: offline"));
    assert!(!state.loading);
}

#[test]
fn fetch_result_discarded_after_dispose() {
    let (hook, api, cell) = hook();
    let disposer = hook.disposer();
    api.inner.borrow_mut().on_fetch = Some(Box::new(move || disposer.dispose()));
    api.fetch_returns(Ok(json!({ "currentDay": 1 })));

    block_on(hook.fetch_cycle_data());

    let state = cell.snapshot();
    assert_eq!(state.cycle_data, None);
    assert!(!hook.is_alive());
}

#[test]
fn calls_after_dispose_do_not_touch_state() {
    let (hook, api, cell) = hook();
    hook.disposer().dispose();
    api.fetch_returns(Ok(json!({ "currentDay": 1 })));

    block_on(hook.fetch_cycle_data());

    assert_eq!(cell.snapshot(), CycleDataState::default());
}

#[test]
fn superseded_fetch_is_dropped_and_newer_one_settles_state() {
    let (hook, api, cell) = hook();
    let (release, gate) = oneshot::channel();
    api.inner.borrow_mut().gate = Some(gate);
    api.fetch_returns(Ok(json!({ "currentDay": 3 })))
        .fetch_returns(Ok(json!({ "currentDay": 4 })));

    let older = hook.fetch_cycle_data();
    let newer = {
        let hook = hook.clone();
        let cell = cell.clone();
        async move {
            hook.fetch_cycle_data().await;
            let settled = cell.snapshot();
            let _ = release.send(());
            settled
        }
    };
    let ((), settled) = block_on(join(older, newer));

    assert_eq!(settled.cycle_data, Some(json!({ "currentDay": 4 })));
    assert!(!settled.loading);
    let state = cell.snapshot();
    assert_eq!(state.cycle_data, Some(json!({ "currentDay": 4 })));
    assert!(!state.loading);
    assert_eq!(api.calls(), vec!["current", "current"]);
}

#[test]
fn use_cycle_data_fetches_on_mount_and_stops_on_cleanup() {
    let owner = Owner::new();
    let api = FakeCycles::default();
    api.fetch_returns(Ok(json!({ "currentDay": 6 })))
        .fetch_returns(Ok(json!({ "currentDay": 7 })));

    let hook = owner.with(|| use_cycle_data(api.clone()));
    block_on(hook.mount_fetch());
    let mounted = hook.state().get_untracked();
    assert_eq!(mounted.current_day(), Some(6));
    assert!(!mounted.loading);

    owner.cleanup();
    assert!(!hook.is_alive());
    block_on(hook.fetch_cycle_data());
    assert_eq!(api.calls(), vec!["current", "current"]);
}

// =============================================================
// log_period
// =============================================================

#[test]
fn log_period_success_refetches_and_returns_post_result() {
    let (hook, api, cell) = hook();
    api.post_returns(Ok(json!({ "id": "p-1" })))
        .fetch_returns(Ok(json!({ "currentDay": 1, "periodStart": "2024-05-02" })));

    let resp = block_on(hook.log_period(&PeriodLogEntry::starting("2024-05-02"))).unwrap();

    assert_eq!(resp, json!({ "id": "p-1" }));
    assert_eq!(api.calls(), vec!["post", "current"]);
    let state = cell.snapshot();
    assert_eq!(state.cycle_data, Some(json!({ "currentDay": 1, "periodStart": "2024-05-02" })));
    assert!(!state.loading);
    assert_eq!(api.inner.borrow().seen_loading, vec![true, true]);
}

#[test]
fn log_period_failure_reraises_without_refetch() {
    let (hook, api, cell) = hook();
    api.fetch_returns(Ok(json!({ "currentDay": 20 })));
    block_on(hook.fetch_cycle_data());

    api.post_returns(Err(server_error("duplicate period")));
    let err = block_on(hook.log_period(&PeriodLogEntry::starting("2024-05-02"))).unwrap_err();

    assert_eq!(err.to_string(), "duplicate period");
    assert_eq!(api.calls(), vec!["current", "post"]);
    let state = cell.snapshot();
    assert_eq!(state.cycle_data, Some(json!({ "currentDay": 20 })));
    assert_eq!(state.error.as_deref(), Some("duplicate period"));
    assert!(!state.loading);
}

#[test]
fn log_period_is_not_deduplicated() {
    let (hook, api, _) = hook();
    let entry = PeriodLogEntry::starting("2024-05-02");

    block_on(hook.log_period(&entry)).unwrap();
    block_on(hook.log_period(&entry)).unwrap();

    assert_eq!(api.calls(), vec!["post", "current", "post", "current"]);
}
