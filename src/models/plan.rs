use serde::{Deserialize, Serialize};
use std::fmt;

/// Subscription tier of a user profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanType {
    #[default]
    Free,
    Basic,
}

impl PlanType {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            PlanType::Free => "free",
            PlanType::Basic => "basic",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "free" => Some(PlanType::Free),
            "basic" => Some(PlanType::Basic),
            _ => None,
        }
    }

    /// Map a payment-provider subscription status to the plan it grants.
    /// Only an `active` subscription keeps the paid tier.
    pub fn from_subscription_status(status: &str) -> Self {
        if status == "active" {
            PlanType::Basic
        } else {
            PlanType::Free
        }
    }

    pub fn is_basic(&self) -> bool {
        matches!(self, PlanType::Basic)
    }
}

impl fmt::Display for PlanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}
