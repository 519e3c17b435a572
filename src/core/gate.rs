//! Plan-based feature gates. Callers show the upgrade prompt on denial.

use crate::models::PlanType;

/// Number of indicators a free profile may own.
pub const FREE_INDICATOR_LIMIT: usize = 2;

pub fn can_create_indicator(plan: PlanType, current_count: usize) -> bool {
    match plan {
        PlanType::Basic => true,
        PlanType::Free => current_count < FREE_INDICATOR_LIMIT,
    }
}

pub fn can_toggle_notifications(plan: PlanType) -> bool {
    plan.is_basic()
}

/// Non-blocking banner condition: a free profile holds more indicators than
/// its plan allows (e.g. after a downgrade).
pub fn is_over_limit(plan: PlanType, indicator_count: usize) -> bool {
    matches!(plan, PlanType::Free) && indicator_count > FREE_INDICATOR_LIMIT
}
