//! Persistence boundary used by the command layer.
//!
//! Every call is one request/response pair against the record store and may
//! fail with a store-level error. Derived values are never written.

use crate::errors::AppResult;
use crate::models::{
    ActionDraft, Indicator, IndicatorFields, ProfilePatch, SubTaskDraft, SubscriptionUpdate,
    UserProfile,
};
use chrono::{DateTime, Local};

/// Audit trail for completed mutations. Recording never fails a command.
pub trait AuditLog {
    fn record(&self, _operation: &str, _target: &str, _message: &str) {}
}

pub trait IndicatorStore: AuditLog {
    /// Full tree (indicators → actions → sub-tasks) owned by `user_id`,
    /// each level in creation order.
    fn list_indicators(&self, user_id: i64) -> AppResult<Vec<Indicator>>;
    fn create_indicator(&self, user_id: i64, fields: &IndicatorFields) -> AppResult<i64>;
    fn update_indicator(&self, id: i64, fields: &IndicatorFields) -> AppResult<()>;
    /// Removes the indicator together with its actions and their sub-tasks.
    fn delete_indicator(&self, id: i64) -> AppResult<()>;

    fn create_action(&self, indicator_id: i64, draft: &ActionDraft) -> AppResult<i64>;
    fn update_action(&self, id: i64, draft: &ActionDraft) -> AppResult<()>;
    fn set_action_completed(
        &self,
        id: i64,
        completed: bool,
        completed_at: Option<DateTime<Local>>,
    ) -> AppResult<()>;
    fn delete_action(&self, id: i64) -> AppResult<()>;

    fn create_sub_task(&self, action_id: i64, draft: &SubTaskDraft) -> AppResult<i64>;
    fn update_sub_task(&self, id: i64, draft: &SubTaskDraft) -> AppResult<()>;
    fn set_sub_task_completed(&self, id: i64, completed: bool) -> AppResult<()>;
    fn delete_sub_task(&self, id: i64) -> AppResult<()>;
}

pub trait ProfileStore: AuditLog {
    fn load_profile(&self, user_id: i64) -> AppResult<UserProfile>;
    fn update_profile(&self, user_id: i64, patch: &ProfilePatch) -> AppResult<()>;
    fn set_notifications(&self, user_id: i64, enabled: bool) -> AppResult<()>;

    fn find_profile_by_email(&self, email: &str) -> AppResult<Option<i64>>;
    fn find_profile_by_customer(&self, customer_id: &str) -> AppResult<Option<i64>>;
    fn profile_exists(&self, user_id: i64) -> AppResult<bool>;
    fn apply_subscription(&self, user_id: i64, update: &SubscriptionUpdate) -> AppResult<()>;
}
