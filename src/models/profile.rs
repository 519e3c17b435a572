use super::plan::PlanType;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub plan: PlanType,
    /// Stored preference; only honoured while the plan is basic.
    pub whatsapp_notifications: bool,
    pub stripe_customer_id: Option<String>,
    pub stripe_subscription_id: Option<String>,
    pub subscription_status: Option<String>,
}

impl UserProfile {
    pub fn notifications_active(&self) -> bool {
        self.plan.is_basic() && self.whatsapp_notifications
    }
}

/// Profile fields editable from the `profile` command.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<Option<String>>,
}

/// Subscription fields written by the webhook sync.
#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptionUpdate {
    pub stripe_customer_id: Option<String>,
    pub stripe_subscription_id: Option<String>,
    pub subscription_status: String,
    pub plan: PlanType,
}
