use super::action::ActionItem;
use super::unit::IndicatorUnit;
use crate::core::aggregator;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Indicator {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub unit: IndicatorUnit,
    pub initial_value: f64,
    pub target_value: f64,
    pub actions: Vec<ActionItem>,
}

impl Indicator {
    /// Derived on every call; there is no stored current value.
    pub fn current_value(&self) -> f64 {
        aggregator::compute_current_value(self.initial_value, &self.actions)
    }

    /// Distance still to cover: target − current.
    pub fn gap(&self) -> f64 {
        aggregator::gap(self.target_value, self.current_value())
    }

    pub fn missing_planned(&self) -> f64 {
        aggregator::compute_missing_planned(self.target_value, self.current_value(), &self.actions)
    }

    /// Warning state: pending actions are not enough to reach the target.
    pub fn is_under_planned(&self) -> bool {
        self.missing_planned() > aggregator::EPSILON
    }

    pub fn action(&self, id: i64) -> Option<&ActionItem> {
        self.actions.iter().find(|a| a.id == id)
    }

    pub fn completed_actions(&self) -> impl Iterator<Item = &ActionItem> {
        self.actions.iter().filter(|a| a.completed)
    }
}

/// Stored fields of an indicator, as written on create and update.
#[derive(Debug, Clone)]
pub struct IndicatorFields {
    pub title: String,
    pub description: Option<String>,
    pub unit: IndicatorUnit,
    pub initial_value: f64,
    pub target_value: f64,
}

/// Baseline change requested by the edit form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Baseline {
    /// Value shown to the user as "current"; the stored initial value is
    /// derived from it by subtracting completed contributions.
    Current(f64),
    Initial(f64),
}

/// Partial update of an indicator; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct IndicatorPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub unit: Option<IndicatorUnit>,
    pub baseline: Option<Baseline>,
    pub target_value: Option<f64>,
}
