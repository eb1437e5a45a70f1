//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render dashboard panels and read services from Leptos context.

pub mod cycle_prediction;
pub mod recent_symptoms;
