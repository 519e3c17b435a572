pub mod action;
pub mod indicator;
pub mod plan;
pub mod profile;
pub mod sub_task;
pub mod unit;

pub use action::{ActionDraft, ActionItem, ActionPatch};
pub use indicator::{Baseline, Indicator, IndicatorFields, IndicatorPatch};
pub use plan::PlanType;
pub use profile::{ProfilePatch, SubscriptionUpdate, UserProfile};
pub use sub_task::{SubTask, SubTaskDraft, SubTaskPatch};
pub use unit::IndicatorUnit;
