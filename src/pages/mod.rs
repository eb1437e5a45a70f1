//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns local form state and calls services from context. Submit
//! logic lives in plain async helpers generic over the service traits.

pub mod dashboard;
pub mod forgot_password;
pub mod login;
pub mod reset_password;
