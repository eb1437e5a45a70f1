//! Networking and session modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` wraps the REST transport and `session` the persisted key-value
//! store. `auth`, `cycles`, `symptoms`, and `predictions` are thin services
//! on top, and `types` defines the request/response shapes.

pub mod auth;
pub mod cycles;
pub mod error;
#[cfg(test)]
pub(crate) mod fake;
pub mod http;
pub mod predictions;
pub mod session;
pub mod symptoms;
pub mod types;
