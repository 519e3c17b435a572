//! Derived values of an indicator.
//!
//! The current value is never stored: it is always
//! `initial_value + Σ contribution(completed actions)`.

use crate::models::ActionItem;

/// Tolerance used when comparing aggregated floating-point amounts.
pub const EPSILON: f64 = 1e-6;

/// Sum of the contributions of completed actions.
pub fn completed_sum(actions: &[ActionItem]) -> f64 {
    actions
        .iter()
        .filter(|a| a.completed)
        .map(|a| a.contribution)
        .sum()
}

/// Sum of the contributions still planned (not yet completed).
pub fn pending_sum(actions: &[ActionItem]) -> f64 {
    actions
        .iter()
        .filter(|a| !a.completed)
        .map(|a| a.contribution)
        .sum()
}

pub fn compute_current_value(initial_value: f64, actions: &[ActionItem]) -> f64 {
    initial_value + completed_sum(actions)
}

pub fn gap(target_value: f64, current_value: f64) -> f64 {
    target_value - current_value
}

/// Gap left after every pending action lands.
/// Positive: under-planned. Negative: over-planned.
pub fn compute_missing_planned(
    target_value: f64,
    current_value: f64,
    actions: &[ActionItem],
) -> f64 {
    gap(target_value, current_value) - pending_sum(actions)
}

/// Inverse of [`compute_current_value`]: the initial value that makes the
/// indicator show `current_value` with the given completed actions.
pub fn initial_from_current(current_value: f64, actions: &[ActionItem]) -> f64 {
    current_value - completed_sum(actions)
}
