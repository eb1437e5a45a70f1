//! Scripted `HttpClient` for service tests.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use serde_json::{Value, json};

use super::error::ApiError;
use super::http::{HttpClient, Method};

#[derive(Clone, Debug, PartialEq)]
pub struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Default)]
struct Inner {
    calls: Vec<RecordedCall>,
    scripted: HashMap<(Method, String), VecDeque<Result<Value, ApiError>>>,
}

/// Records every request and replays queued responses per `(method, path)`.
/// Unscripted requests succeed with `{}`.
#[derive(Clone, Default)]
pub struct FakeHttp {
    inner: Rc<RefCell<Inner>>,
}

impl FakeHttp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, method: Method, path: &str, result: Result<Value, ApiError>) -> &Self {
        self.inner
            .borrow_mut()
            .scripted
            .entry((method, path.to_owned()))
            .or_default()
            .push_back(result);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.inner.borrow().calls.clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.inner.borrow().calls.iter().map(|c| c.path.clone()).collect()
    }
}

impl HttpClient for FakeHttp {
    async fn request(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value, ApiError> {
        let mut inner = self.inner.borrow_mut();
        inner.calls.push(RecordedCall { method, path: path.to_owned(), body: body.cloned() });
        inner
            .scripted
            .get_mut(&(method, path.to_owned()))
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Ok(json!({})))
    }
}

pub fn server_error(message: &str) -> ApiError {
    ApiError::Status { status: 500, message: message.to_owned() }
}
