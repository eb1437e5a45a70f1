//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain (`auth`, `cycle`) so pages depend on small
//! focused models.

pub mod auth;
pub mod cycle;
